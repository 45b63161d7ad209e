use tracing::debug;

use super::{
    errors::{Warning, WarningSink},
    readers::bytes_to_val,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Format 0, one multi-channel track.
    SingleTrack,
    /// Format 1, simultaneous tracks.
    MultiTrack,
    /// Format 2, independent patterns. Only skipped over.
    Sequential,
}

impl Format {
    fn from_val(val: u16) -> Option<Format> {
        match val {
            0 => Some(Format::SingleTrack),
            1 => Some(Format::MultiTrack),
            2 => Some(Format::Sequential),
            _ => None,
        }
    }
}

/// The decoded payload of an `MThd` chunk, with defaults substituted for anything unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub format: Format,
    /// `None` when the chunk is too short to hold it.
    pub track_count: Option<u16>,
    /// Ticks per quarter note.
    pub division: u16,
}

impl Header {
    pub fn read<W: WarningSink>(data: &[u8], mut warnings: W) -> Header {
        let format = match data.get(0..2) {
            None => {
                warnings.warn(Warning::FormatMissing);
                Format::MultiTrack
            }
            Some(bytes) => {
                let format = bytes_to_val(bytes) as u16;
                match Format::from_val(format) {
                    Some(format) => format,
                    None => {
                        warnings.warn(Warning::FormatInvalid { format });
                        Format::MultiTrack
                    }
                }
            }
        };

        let track_count = match data.get(2..4) {
            None => {
                warnings.warn(Warning::TrackCountMissing);
                None
            }
            Some(bytes) => Some(bytes_to_val(bytes) as u16),
        };

        let division = match data.get(4..6) {
            None => {
                warnings.warn(Warning::DivisionMissing);
                1
            }
            Some(bytes) => {
                let division = bytes_to_val(bytes) as u16;
                if division & 0x8000 != 0 {
                    warnings.warn(Warning::SmpteUnsupported { division });
                    1
                } else {
                    division
                }
            }
        };

        let header = Header {
            format,
            track_count,
            division,
        };
        debug!("Read header {header:?}");
        header
    }
}
