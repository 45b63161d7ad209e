pub mod chunks;
pub mod device;
pub mod errors;
pub mod header;
pub mod midi_file;
pub mod patch_resolver;
pub mod readers;
pub mod track_parser;

pub use chunks::{scan_chunks, Chunk, ChunkKind, MAX_CHUNKS};
pub use device::MIDIDevice;
pub use errors::{warn_fn, MIDILoadError, TrackWarning, WarnFn, Warning, WarningSink};
pub use header::{Format, Header};
pub use midi_file::{parse, read_midi, EventIter, MIDIFile, ParsedMidi};
pub use readers::{read_var_length, VarLengthError};
