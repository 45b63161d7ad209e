use tracing::debug;

use crate::{
    events::Event,
    io::{
        errors::{TrackWarning, Warning, WarningSink},
        readers::TrackReader,
        track_parser::{decode_message, DeviceState},
    },
};

use super::Delta;

struct OpenTrack<'a> {
    index: usize,
    reader: TrackReader<'a>,
    state: DeviceState,
    /// Ticks until this track's next message, relative to the last selected message.
    pending: u32,
    saw_end: bool,
}

fn track_warning(track: usize, warning: TrackWarning) -> Warning {
    Warning::Track { track, warning }
}

/// Merges the tracks of one song into a single stream ordered by time.
///
/// Each call to [`TrackMerger::next_event`] decodes messages from whichever open track is due
/// next (the lowest track index wins ties) until one of them yields an event. Deltas of messages
/// that produce no event are carried into the next emitted event, so the sum of all emitted
/// deltas is the time of the last emitted event. Time after that event, such as a delayed End of
/// Track, is reported by [`TrackMerger::trailing_ticks`].
pub struct TrackMerger<'a> {
    tracks: Vec<OpenTrack<'a>>,
    carried: u64,
}

impl<'a> TrackMerger<'a> {
    /// Opens every track, reading its first delta time. Track indexes are used for warnings only
    /// and must be ascending.
    pub fn new<I, W>(tracks: I, mut warnings: W) -> Self
    where
        I: IntoIterator<Item = (usize, TrackReader<'a>)>,
        W: WarningSink,
    {
        let mut open = Vec::new();
        for (index, mut reader) in tracks {
            match reader.read_var_length() {
                Ok(pending) => open.push(OpenTrack {
                    index,
                    reader,
                    state: DeviceState::new(),
                    pending,
                    saw_end: false,
                }),
                Err(_) => {
                    warnings.warn(track_warning(index, TrackWarning::InvalidDelta));
                    debug!("Track {index} closed before its first message");
                }
            }
        }

        Self {
            tracks: open,
            carried: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Ticks decoded since the last emitted event. Once the merger is finished this is the time
    /// between the last event and the end of the longest track.
    pub fn trailing_ticks(&self) -> u64 {
        self.carried
    }

    fn select_next(&self) -> Option<usize> {
        let mut selected: Option<(usize, u32)> = None;
        for (i, track) in self.tracks.iter().enumerate() {
            match selected {
                Some((_, pending)) if pending <= track.pending => {}
                _ => selected = Some((i, track.pending)),
            }
        }
        selected.map(|(i, _)| i)
    }

    fn close(&mut self, selected: usize) {
        let track = self.tracks.remove(selected);
        debug!(
            "Track {} closed at {:#06x}{}",
            track.index,
            track.reader.file_pos(),
            if track.saw_end { "" } else { " without End of Track" }
        );
    }

    /// Decodes until the next event is produced, or returns `None` once every track is closed.
    pub fn next_event<W: WarningSink>(&mut self, mut warnings: W) -> Option<Delta<u64, Event>> {
        loop {
            let selected = self.select_next()?;

            let delta = self.tracks[selected].pending;
            for (i, track) in self.tracks.iter_mut().enumerate() {
                if i != selected {
                    track.pending -= delta;
                }
            }
            self.carried += delta as u64;

            let track = &mut self.tracks[selected];
            track.pending = 0;
            let index = track.index;

            if track.reader.is_empty() {
                warnings.warn(track_warning(index, TrackWarning::MissingMessage));
                self.close(selected);
                continue;
            }

            let decoded = decode_message(&mut track.state, track.reader.remaining(), |w| {
                warnings.warn(track_warning(index, w))
            });
            track.reader.advance(decoded.consumed);

            let closed = if decoded.end_of_track {
                track.saw_end = true;
                let leftover = track.reader.remaining().len();
                if leftover > 0 {
                    warnings.warn(track_warning(
                        index,
                        TrackWarning::DataAfterEndOfTrack { length: leftover },
                    ));
                }
                true
            } else if track.reader.is_empty() {
                warnings.warn(track_warning(index, TrackWarning::MissingEndOfTrack));
                true
            } else {
                match track.reader.read_var_length() {
                    Ok(pending) => {
                        track.pending = pending;
                        false
                    }
                    Err(_) => {
                        warnings.warn(track_warning(index, TrackWarning::InvalidDelta));
                        true
                    }
                }
            };

            if closed {
                self.close(selected);
            }

            if let Some(event) = decoded.event {
                let delta = std::mem::take(&mut self.carried);
                return Some(Delta::new(delta, event));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{events::MIDIDelta, io::readers::TrackReader};

    fn open<'a>(tracks: &[&'a [u8]], warnings: &mut Vec<Warning>) -> TrackMerger<'a> {
        let readers = tracks
            .iter()
            .copied()
            .enumerate()
            .map(|(i, bytes)| (i, TrackReader::new(bytes, 0)));
        TrackMerger::new(readers, warnings)
    }

    fn merge(tracks: &[&[u8]]) -> (Vec<Delta<u64, Event>>, Vec<Warning>) {
        let mut warnings = Vec::new();
        let mut merger = open(tracks, &mut warnings);
        let mut events = Vec::new();
        while let Some(event) = merger.next_event(&mut warnings) {
            events.push(event);
        }
        assert!(merger.is_finished());
        (events, warnings)
    }

    fn cumulative(events: &[Delta<u64, Event>]) -> Vec<u64> {
        let mut time = 0;
        events
            .iter()
            .map(|e| {
                time += e.delta();
                time
            })
            .collect()
    }

    #[test]
    fn merges_by_time_with_index_tie_break() {
        let first: &[u8] = &[
            0x00, 0x90, 0x3C, 0x40, //
            0x0A, 0x90, 0x3D, 0x40, //
            0x0A, 0x90, 0x3E, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ];
        let second: &[u8] = &[
            0x00, 0x91, 0x48, 0x40, //
            0x05, 0x91, 0x49, 0x40, //
            0x0A, 0x91, 0x4A, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ];
        let (events, warnings) = merge(&[first, second]);
        assert!(warnings.is_empty());
        assert_eq!(cumulative(&events), vec![0, 0, 5, 10, 15, 20]);
        let notes: Vec<_> = events
            .iter()
            .map(|e| match e.event {
                Event::NoteOn(n) => n.note,
                _ => 0,
            })
            .collect();
        assert_eq!(notes, vec![0x3C, 0x48, 0x49, 0x3D, 0x4A, 0x3E]);
    }

    #[test]
    fn carries_delta_of_silent_messages() {
        let track: &[u8] = &[
            0x10, 0xB0, 0x01, 0x20, // modulation, not surfaced
            0x20, 0x90, 0x3C, 0x40, //
            0x00, 0xFF, 0x2F, 0x00,
        ];
        let (events, _) = merge(&[track]);
        assert_eq!(events, vec![Event::new_delta_note_on_event(0x30, 0, 0x3C, 0x40)]);
    }

    #[test]
    fn trailing_time_is_kept_after_the_last_event() {
        let short: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x10, 0xFF, 0x2F, 0x00];
        let long: &[u8] = &[0x08, 0x91, 0x3C, 0x40, 0x40, 0xB1, 0x01, 0x10, 0x20, 0xFF, 0x2F, 0x00];
        let mut warnings = Vec::new();
        let mut merger = open(&[short, long], &mut warnings);

        let mut events = Vec::new();
        while let Some(event) = merger.next_event(&mut warnings) {
            events.push(event);
            assert_eq!(merger.trailing_ticks(), 0);
        }
        assert!(warnings.is_empty());
        assert_eq!(cumulative(&events), vec![0, 8]);
        assert_eq!(merger.trailing_ticks(), 0x40 + 0x20);
    }

    #[test]
    fn missing_end_of_track_does_not_block_other_tracks() {
        let unterminated: &[u8] = &[0x00, 0x90, 0x3C, 0x40];
        let terminated: &[u8] = &[0x60, 0x91, 0x3C, 0x40, 0x00, 0xFF, 0x2F, 0x00];
        let (events, warnings) = merge(&[unterminated, terminated]);
        assert_eq!(cumulative(&events), vec![0, 0x60]);
        assert_eq!(
            warnings,
            vec![Warning::Track {
                track: 0,
                warning: TrackWarning::MissingEndOfTrack
            }]
        );
    }

    #[test]
    fn broken_deltas_close_tracks() {
        let empty: &[u8] = &[];
        let dangling: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x05];
        let truncated: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x85];
        let trailing: &[u8] = &[0x00, 0xFF, 0x2F, 0x00, 0x12, 0x34];
        let (events, warnings) = merge(&[empty, dangling, truncated, trailing]);
        assert_eq!(events.len(), 2);
        assert_eq!(
            warnings,
            vec![
                Warning::Track {
                    track: 0,
                    warning: TrackWarning::InvalidDelta
                },
                Warning::Track {
                    track: 2,
                    warning: TrackWarning::InvalidDelta
                },
                Warning::Track {
                    track: 3,
                    warning: TrackWarning::DataAfterEndOfTrack { length: 2 }
                },
                Warning::Track {
                    track: 1,
                    warning: TrackWarning::MissingMessage
                },
            ]
        );
    }
}
