//! Decodes Standard MIDI Files into a single, time ordered stream of high level events.
//!
//! Corrupt or non-conformant input is recovered from wherever possible. Problems are reported as
//! [`io::Warning`]s next to the events instead of aborting the parse; the only fatal error is a
//! buffer that does not start with an `MThd` header.
//!
//! ```
//! use midi_timeline::{events::Event, io::parse};
//!
//! let bytes = [
//!     b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0, 96, //
//!     b'M', b'T', b'r', b'k', 0, 0, 0, 8, 0x00, 0x90, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00,
//! ];
//! let parsed = parse(&bytes).unwrap();
//! assert_eq!(parsed.events[0].event, Event::new_reset_event(96));
//! assert_eq!(parsed.events[1].event, Event::new_note_on_event(0, 0x3C, 0x40));
//! assert!(parsed.warnings.is_empty());
//! ```

pub mod events;
pub mod io;
pub mod num;
pub mod patches;
pub mod sequence;
