use crossbeam_channel::Sender;
use thiserror::Error;

/// The only condition that stops a parse. Nothing is decoded when it is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MIDILoadError {
    #[error("Invalid header (data does not start with an MThd chunk)")]
    InvalidHeader,
}

/// An advisory raised while decoding. The parse always recovers and continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error("Chunk misaligned by {offset} bytes (expected at {expected:#06x}, found at {found:#06x})")]
    ChunkMisaligned {
        expected: usize,
        found: usize,
        offset: isize,
    },
    #[error("Chunk at {position:#06x} declares an implausible length of {length} bytes")]
    ChunkTooLarge { position: usize, length: u32 },
    #[error("Chunk at {position:#06x} is truncated (declared {declared} bytes, {available} available)")]
    ChunkTruncated {
        position: usize,
        declared: usize,
        available: usize,
    },
    #[error("Unrecognized trailing data ({length} bytes at {position:#06x})")]
    TrailingData { position: usize, length: usize },
    #[error("Too many chunks, ignoring data from {position:#06x}")]
    TooManyChunks { position: usize },

    #[error("Header format missing, assuming format 1")]
    FormatMissing,
    #[error("Header format {format} is invalid, assuming format 1")]
    FormatInvalid { format: u16 },
    #[error("Header track count missing")]
    TrackCountMissing,
    #[error("Header division missing, assuming 1 tick per quarter note")]
    DivisionMissing,
    #[error("SMPTE timing ({division:#06x}) is unsupported, assuming 1 tick per quarter note")]
    SmpteUnsupported { division: u16 },
    #[error("Format 2 is unsupported, skipping {tracks} tracks")]
    Format2Unsupported { tracks: usize },
    #[error("Header declares {declared} tracks, but {found} were found")]
    TrackCountMismatch { declared: u16, found: usize },
    #[error("Format 0 file has {found} tracks, merging them anyway")]
    Format0MultipleTracks { found: usize },

    #[error("Track {track}: {warning}")]
    Track { track: usize, warning: TrackWarning },
    #[error("Device: {0}")]
    Device(TrackWarning),
}

/// An advisory scoped to a single track (or to a live device stream).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackWarning {
    #[error("Invalid data byte {byte:#04x} in {message}, clearing high bit")]
    InvalidDataByte { message: &'static str, byte: u8 },
    #[error("Truncated {message}")]
    TruncatedMessage { message: &'static str },
    #[error("Data byte {byte:#04x} without running status")]
    MissingStatus { byte: u8 },
    #[error("Unknown message type {status:#04x}")]
    UnknownMessage { status: u8 },

    #[error("SysEx length is longer than 4 bytes")]
    SysExLengthOverflow,

    #[error("End of Track has non-zero length {length}")]
    EndOfTrackLength { length: u8 },
    #[error("{length} bytes of data after End of Track")]
    DataAfterEndOfTrack { length: usize },
    #[error("Set Tempo has length {length}, expected 3")]
    TempoLength { length: u8 },
    #[error("Set Tempo of zero is invalid")]
    ZeroTempo,

    #[error("Channel {channel}: empty bank, assuming default")]
    EmptyBank { channel: u8 },
    #[error("Channel {channel}: incomplete bank {bank:#06x}")]
    IncompleteBank { channel: u8, bank: u16 },
    #[error("Channel {channel}: unknown bank {bank:#06x}")]
    UnknownBank { channel: u8, bank: u16 },
    #[error("Channel {channel}: unknown patch (program {program}, bank {bank:#06x}), ignoring")]
    UnknownPatch { channel: u8, program: u8, bank: u16 },
    #[error("Channel {channel}: unknown patch (program {program}, bank {bank:#06x}), using patch {patch}")]
    PatchFallback {
        channel: u8,
        program: u8,
        bank: u16,
        patch: u16,
    },

    #[error("Invalid delta time")]
    InvalidDelta,
    #[error("Missing message after delta time")]
    MissingMessage,
    #[error("Track ended before End of Track")]
    MissingEndOfTrack,
}

/// Receives advisories as they are raised.
pub trait WarningSink {
    fn warn(&mut self, warning: Warning);
}

impl WarningSink for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}

impl WarningSink for Sender<Warning> {
    fn warn(&mut self, warning: Warning) {
        // A dropped receiver means nobody is listening anymore.
        self.send(warning).ok();
    }
}

/// Discards every advisory.
impl WarningSink for () {
    fn warn(&mut self, _warning: Warning) {}
}

impl<W: WarningSink + ?Sized> WarningSink for &mut W {
    fn warn(&mut self, warning: Warning) {
        (**self).warn(warning);
    }
}

/// Adapts a closure into a [`WarningSink`].
pub struct WarnFn<F: FnMut(Warning)>(pub F);

impl<F: FnMut(Warning)> WarningSink for WarnFn<F> {
    fn warn(&mut self, warning: Warning) {
        (self.0)(warning);
    }
}

/// Wraps a closure so it can be used as a [`WarningSink`].
pub fn warn_fn<F: FnMut(Warning)>(f: F) -> WarnFn<F> {
    WarnFn(f)
}
