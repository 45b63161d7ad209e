use tracing::debug;

use crate::{
    events::Event,
    sequence::event::{Delta, TrackMerger},
};

use super::{
    chunks::{scan_chunks, Chunk, ChunkKind},
    errors::{warn_fn, MIDILoadError, Warning, WarningSink},
    header::{Format, Header},
    readers::TrackReader,
};

/// A scanned MIDI file held in memory.
///
/// Creating one only splits the bytes into chunks; messages are decoded lazily by
/// [`MIDIFile::iter_events`].
#[derive(Debug, Clone)]
pub struct MIDIFile<'a> {
    bytes: &'a [u8],
    chunks: Vec<Chunk>,
    scan_warnings: Vec<Warning>,
}

impl<'a> MIDIFile<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, MIDILoadError> {
        let mut scan_warnings = Vec::new();
        let chunks = scan_chunks(bytes, &mut scan_warnings)?;
        debug!(
            "Loaded MIDI file: {} chunks, {} scan warnings",
            chunks.len(),
            scan_warnings.len()
        );

        Ok(MIDIFile {
            bytes,
            chunks,
            scan_warnings,
        })
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Warnings raised while splitting the file into chunks.
    pub fn scan_warnings(&self) -> &[Warning] {
        &self.scan_warnings
    }

    pub fn track_count(&self) -> usize {
        self.chunks
            .iter()
            .filter(|c| c.kind == ChunkKind::Track)
            .count()
    }

    /// The header of every song in the file, with defaults substituted and warnings discarded.
    pub fn headers(&self) -> impl Iterator<Item = Header> + '_ {
        self.chunks
            .iter()
            .filter(|c| c.kind == ChunkKind::Header)
            .map(move |c| Header::read(c.data(self.bytes), ()))
    }

    /// Decodes every song in the file into one stream of events.
    ///
    /// The scan warnings are passed to `warnings` first, the remaining warnings are passed as
    /// they are raised while iterating.
    pub fn iter_events<W: WarningSink>(&self, mut warnings: W) -> EventIter<'_, W> {
        for warning in &self.scan_warnings {
            warnings.warn(warning.clone());
        }

        EventIter {
            bytes: self.bytes,
            chunks: &self.chunks,
            next_chunk: 0,
            merger: None,
            trailing_ticks: 0,
            warnings,
        }
    }
}

/// Iterator over the events of a [`MIDIFile`], in playback order.
///
/// Every song starts with a [`Event::Reset`] carrying its division, followed by the merged events
/// of the track chunks directly after its header.
pub struct EventIter<'a, W: WarningSink> {
    bytes: &'a [u8],
    chunks: &'a [Chunk],
    next_chunk: usize,
    merger: Option<TrackMerger<'a>>,
    trailing_ticks: u64,
    warnings: W,
}

impl<'a, W: WarningSink> EventIter<'a, W> {
    pub fn into_sink(self) -> W {
        self.warnings
    }

    /// Ticks between the last event of the current (or last finished) song and the end of its
    /// longest track. Emitted deltas only add up to the time of the last event, so add this to
    /// get the full length of a song ending in silence.
    pub fn trailing_ticks(&self) -> u64 {
        match &self.merger {
            Some(merger) => merger.trailing_ticks(),
            None => self.trailing_ticks,
        }
    }

    /// Reads the header at `chunk` and opens the tracks that follow it. Returns the song's Reset.
    fn start_song(&mut self, chunk: &Chunk) -> Delta<u64, Event> {
        let chunks = self.chunks;
        let header = Header::read(chunk.data(self.bytes), &mut self.warnings);
        self.trailing_ticks = 0;

        let first = self.next_chunk;
        while chunks
            .get(self.next_chunk)
            .map_or(false, |c| c.kind == ChunkKind::Track)
        {
            self.next_chunk += 1;
        }
        let tracks = &chunks[first..self.next_chunk];
        debug!(
            "Starting song at {:#06x}: {:?}, {} tracks",
            chunk.start,
            header.format,
            tracks.len()
        );

        if header.format == Format::Sequential {
            self.warnings.warn(Warning::Format2Unsupported {
                tracks: tracks.len(),
            });
        } else {
            if let Some(declared) = header.track_count {
                if declared as usize != tracks.len() {
                    self.warnings.warn(Warning::TrackCountMismatch {
                        declared,
                        found: tracks.len(),
                    });
                }
            }
            if header.format == Format::SingleTrack && tracks.len() > 1 {
                self.warnings.warn(Warning::Format0MultipleTracks {
                    found: tracks.len(),
                });
            }

            let bytes = self.bytes;
            let readers = tracks
                .iter()
                .enumerate()
                .map(|(i, c)| (i, TrackReader::new(c.data(bytes), c.start)));
            self.merger = Some(TrackMerger::new(readers, &mut self.warnings));
        }

        Event::new_delta_reset_event(0, header.division)
    }
}

impl<'a, W: WarningSink> Iterator for EventIter<'a, W> {
    type Item = Delta<u64, Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(merger) = self.merger.as_mut() {
                if let Some(event) = merger.next_event(&mut self.warnings) {
                    return Some(event);
                }
                debug!("Song finished, {} trailing ticks", merger.trailing_ticks());
                self.trailing_ticks = merger.trailing_ticks();
                self.merger = None;
            }

            let chunk = *self.chunks.get(self.next_chunk)?;
            self.next_chunk += 1;
            // Track chunks are always claimed by the header before them.
            if chunk.kind == ChunkKind::Header {
                return Some(self.start_song(&chunk));
            }
        }
    }
}

/// Everything decoded from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMidi {
    pub events: Vec<Delta<u64, Event>>,
    pub warnings: Vec<Warning>,
    /// Silent time after the last event of the last song.
    pub trailing_ticks: u64,
}

/// Decodes a whole file into memory.
pub fn parse(bytes: &[u8]) -> Result<ParsedMidi, MIDILoadError> {
    let file = MIDIFile::from_bytes(bytes)?;
    let mut warnings = Vec::new();
    let (events, trailing_ticks) = {
        let mut iter = file.iter_events(&mut warnings);
        let events: Vec<_> = iter.by_ref().collect();
        (events, iter.trailing_ticks())
    };
    Ok(ParsedMidi {
        events,
        warnings,
        trailing_ticks,
    })
}

/// Decodes a file, passing each event and warning to a callback as soon as it is produced.
pub fn read_midi<E, F>(bytes: &[u8], mut on_event: E, on_warning: F) -> Result<(), MIDILoadError>
where
    E: FnMut(Delta<u64, Event>),
    F: FnMut(Warning),
{
    let file = MIDIFile::from_bytes(bytes)?;
    for event in file.iter_events(warn_fn(on_warning)) {
        on_event(event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::errors::TrackWarning;

    fn header(format: u16, tracks: u16, division: u16) -> Vec<u8> {
        let mut bytes = b"MThd\0\0\0\x06".to_vec();
        bytes.extend_from_slice(&format.to_be_bytes());
        bytes.extend_from_slice(&tracks.to_be_bytes());
        bytes.extend_from_slice(&division.to_be_bytes());
        bytes
    }

    fn track(payload: &[u8]) -> Vec<u8> {
        let mut bytes = b"MTrk".to_vec();
        bytes.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        bytes.extend_from_slice(payload);
        bytes
    }

    const NOTE_TRACK: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x60, 0x80, 0x3C, 0x00, 0x00, 0xFF, 0x2F, 0x00];

    #[test]
    fn reset_precedes_each_song() {
        let mut bytes = header(0, 1, 96);
        bytes.extend(track(NOTE_TRACK));
        bytes.extend(header(1, 1, 480));
        bytes.extend(track(NOTE_TRACK));

        let parsed = parse(&bytes).unwrap();
        assert!(parsed.warnings.is_empty());
        assert_eq!(
            parsed.events,
            vec![
                Event::new_delta_reset_event(0, 96),
                Event::new_delta_note_on_event(0, 0, 0x3C, 0x40),
                Event::new_delta_note_off_event(0x60, 0, 0x3C),
                Event::new_delta_reset_event(0, 480),
                Event::new_delta_note_on_event(0, 0, 0x3C, 0x40),
                Event::new_delta_note_off_event(0x60, 0, 0x3C),
            ]
        );

        let file = MIDIFile::from_bytes(&bytes).unwrap();
        assert_eq!(file.track_count(), 2);
        let divisions: Vec<_> = file.headers().map(|h| h.division).collect();
        assert_eq!(divisions, vec![96, 480]);
    }

    #[test]
    fn format_2_is_skipped() {
        let mut bytes = header(2, 2, 96);
        bytes.extend(track(NOTE_TRACK));
        bytes.extend(track(NOTE_TRACK));
        bytes.extend(header(0, 1, 24));
        bytes.extend(track(NOTE_TRACK));

        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.events.len(), 4);
        assert_eq!(parsed.events[0], Event::new_delta_reset_event(0, 96));
        assert_eq!(parsed.events[1], Event::new_delta_reset_event(0, 24));
        assert_eq!(
            parsed.warnings,
            vec![Warning::Format2Unsupported { tracks: 2 }]
        );
    }

    #[test]
    fn format_0_with_several_tracks() {
        let mut bytes = header(0, 2, 96);
        bytes.extend(track(NOTE_TRACK));
        bytes.extend(track(NOTE_TRACK));

        let parsed = parse(&bytes).unwrap();
        assert_eq!(parsed.events.len(), 5);
        assert_eq!(
            parsed.warnings,
            vec![Warning::Format0MultipleTracks { found: 2 }]
        );
    }

    #[test]
    fn warnings_arrive_in_order() {
        let mut bytes = header(1, 1, 96);
        bytes.extend(track(&[0x00, 0x90, 0x3C, 0x40]));
        bytes.extend_from_slice(b"??");

        let mut events = 0;
        let mut warnings = Vec::new();
        read_midi(&bytes, |_| events += 1, |w| warnings.push(w)).unwrap();
        assert_eq!(events, 2);
        assert_eq!(
            warnings,
            vec![
                Warning::TrailingData {
                    position: 26,
                    length: 2
                },
                Warning::Track {
                    track: 0,
                    warning: TrackWarning::MissingEndOfTrack
                },
            ]
        );
    }

    #[test]
    fn invalid_header_produces_nothing() {
        let mut events = 0;
        let result = read_midi(b"RIFF....", |_| events += 1, |_| {});
        assert_eq!(result, Err(MIDILoadError::InvalidHeader));
        assert_eq!(events, 0);
    }
}
