use midi_timeline::{
    events::{Event, MIDIEvent},
    io::{parse, MIDIFile, MIDILoadError, TrackWarning, Warning},
    patches::{ACOUSTIC_GRAND_PIANO, STANDARD_PERCUSSION_KIT},
    sequence::event::{to_absolute_ticks, total_ticks},
};
use pretty_assertions::assert_eq;

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

fn file(format: u16, division: u16, tracks: &[&[u8]]) -> Vec<u8> {
    let mut bytes = header(format, tracks.len() as u16, division);
    for payload in tracks {
        bytes.extend(track(payload));
    }
    bytes
}

/// Encodes a delta time the way a MIDI file does.
fn var_length(mut value: u32) -> Vec<u8> {
    let mut bytes = vec![(value & 0x7F) as u8];
    value >>= 7;
    while value > 0 {
        bytes.insert(0, (value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    bytes
}

/// Builds a track of note-ons at the given absolute times, terminated by End of Track.
fn notes_at(channel: u8, times: &[u32]) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut last = 0;
    for (i, &time) in times.iter().enumerate() {
        bytes.extend(var_length(time - last));
        bytes.extend([0x90 | channel, 0x30 + i as u8, 0x40]);
        last = time;
    }
    bytes.extend([0x00, 0xFF, 0x2F, 0x00]);
    bytes
}

#[test]
fn delta_sum_equals_track_duration() {
    let payload = [
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
        0x83, 0x60, 0x90, 0x3C, 0x40, // 480
        0x40, 0xB0, 0x40, 0x7F, // 64, sustain, not surfaced
        0x81, 0x00, 0x80, 0x3C, 0x00, // 128
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let parsed = parse(&file(0, 480, &[&payload])).unwrap();
    assert_eq!(parsed.warnings, vec![]);
    assert_eq!(total_ticks::<u64, _, _>(parsed.events.iter().copied()), 480 + 64 + 128);
    assert_eq!(
        parsed.events,
        vec![
            Event::new_delta_reset_event(0, 480),
            Event::new_delta_tempo_event(0, 500_000),
            Event::new_delta_note_on_event(480, 0, 0x3C, 0x40),
            Event::new_delta_note_off_event(64 + 128, 0, 0x3C),
        ]
    );
}

#[test]
fn delayed_end_of_track_is_trailing_time() {
    let payload = [
        0x00, 0x90, 0x3C, 0x40, //
        0x64, 0xFF, 0x2F, 0x00,
    ];
    let parsed = parse(&file(0, 96, &[&payload])).unwrap();
    assert_eq!(parsed.warnings, vec![]);
    assert_eq!(total_ticks::<u64, _, _>(parsed.events.iter().copied()), 0);
    assert_eq!(parsed.trailing_ticks, 100);

    let bytes = file(0, 96, &[&payload]);
    let file = MIDIFile::from_bytes(&bytes).unwrap();
    let mut iter = file.iter_events(());
    assert_eq!(iter.by_ref().count(), 2);
    assert_eq!(iter.trailing_ticks(), 100);
}

#[test]
fn running_status_repeats_note_on() {
    let payload = [
        0x00, 0x94, 0x3C, 0x40, //
        0x10, 0x3E, 0x50, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let parsed = parse(&file(0, 96, &[&payload])).unwrap();
    assert_eq!(
        &parsed.events[1..],
        &[
            Event::new_delta_note_on_event(0, 4, 0x3C, 0x40),
            Event::new_delta_note_on_event(0x10, 4, 0x3E, 0x50),
        ]
    );
}

#[test]
fn zero_velocity_is_note_off() {
    let payload = [
        0x00, 0x90, 0x3C, 0x40, //
        0x10, 0x90, 0x3C, 0x00, //
        0x00, 0x3E, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let parsed = parse(&file(0, 96, &[&payload])).unwrap();
    let kinds: Vec<_> = parsed.events.iter().map(|e| e.name()).collect();
    assert_eq!(kinds, vec!["RESET", "NOTEON", "NOTEOFF", "NOTEOFF"]);
}

#[test]
fn merges_tracks_in_time_order() {
    let bytes = file(1, 96, &[&notes_at(0, &[0, 10, 20]), &notes_at(1, &[0, 5, 15])]);
    let parsed = parse(&bytes).unwrap();
    assert_eq!(parsed.warnings, vec![]);

    let timeline: Vec<(u64, Option<u8>)> = to_absolute_ticks(parsed.events.iter().copied())
        .skip(1)
        .map(|(time, event)| (time, event.channel()))
        .collect();
    assert_eq!(
        timeline,
        vec![
            (0, Some(0)),
            (0, Some(1)),
            (5, Some(1)),
            (10, Some(0)),
            (15, Some(1)),
            (20, Some(0)),
        ]
    );
}

#[test]
fn percussion_channel_defaults() {
    let payload = [
        0x00, 0xC9, 0x00, //
        0x00, 0xC0, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let parsed = parse(&file(0, 96, &[&payload])).unwrap();
    assert_eq!(
        &parsed.events[1..],
        &[
            Event::new_delta_patch_change_event(0, 9, STANDARD_PERCUSSION_KIT),
            Event::new_delta_patch_change_event(0, 0, ACOUSTIC_GRAND_PIANO),
        ]
    );
    assert_eq!(
        parsed.warnings,
        vec![
            Warning::Track {
                track: 0,
                warning: TrackWarning::EmptyBank { channel: 9 }
            },
            Warning::Track {
                track: 0,
                warning: TrackWarning::EmptyBank { channel: 0 }
            },
        ]
    );
}

#[test]
fn corrupted_track_tag_resyncs() {
    let first = notes_at(0, &[0]);
    let second = notes_at(1, &[0]);
    let mut bytes = file(1, 96, &[&first, &second]);
    // Corrupt the first MTrk tag.
    bytes[14..18].copy_from_slice(b"MTrx");

    let parsed = parse(&bytes).unwrap();
    assert_eq!(parsed.warnings.len(), 2);
    assert!(matches!(
        parsed.warnings[0],
        Warning::ChunkMisaligned { expected: 14, .. }
    ));
    assert_eq!(
        parsed.warnings[1],
        Warning::TrackCountMismatch {
            declared: 2,
            found: 1
        }
    );
    // The second track still decodes.
    assert_eq!(
        &parsed.events[1..],
        &[Event::new_delta_note_on_event(0, 1, 0x30, 0x40)]
    );
}

#[test]
fn track_count_mismatch_warns_once() {
    let mut bytes = header(1, 3, 96);
    bytes.extend(track(&notes_at(0, &[0, 4])));
    bytes.extend(track(&notes_at(1, &[2])));

    let parsed = parse(&bytes).unwrap();
    assert_eq!(
        parsed.warnings,
        vec![Warning::TrackCountMismatch {
            declared: 3,
            found: 2
        }]
    );
    assert_eq!(parsed.events.len(), 4);
}

#[test]
fn unterminated_track_closes_cleanly() {
    let unterminated: &[u8] = &[0x00, 0x90, 0x3C, 0x40, 0x08, 0x80, 0x3C, 0x00];
    let bytes = file(1, 96, &[unterminated, &notes_at(1, &[2, 30])]);

    let parsed = parse(&bytes).unwrap();
    let times: Vec<u64> = to_absolute_ticks(parsed.events.iter().copied())
        .map(|(time, _)| time)
        .collect();
    assert_eq!(times, vec![0, 0, 2, 8, 30]);
    assert_eq!(
        parsed.warnings,
        vec![Warning::Track {
            track: 0,
            warning: TrackWarning::MissingEndOfTrack
        }]
    );
}

#[test]
fn pitch_bend_is_centred_on_0x1000() {
    let payload = [
        0x00, 0xE0, 0x00, 0x20, //
        0x00, 0xE0, 0x00, 0x40, //
        0x00, 0xFF, 0x2F, 0x00,
    ];
    let parsed = parse(&file(0, 96, &[&payload])).unwrap();
    assert_eq!(
        &parsed.events[1..],
        &[
            Event::new_delta_bend_event(0, 0, 0),
            Event::new_delta_bend_event(0, 0, 0x1000),
        ]
    );
}

#[test]
fn invalid_header_is_fatal() {
    assert_eq!(parse(b"MTrk\0\0\0\0").unwrap_err(), MIDILoadError::InvalidHeader);
    assert!(MIDIFile::from_bytes(b"").is_err());
}

#[test]
fn scan_warnings_are_replayed() {
    let mut bytes = file(0, 96, &[&notes_at(0, &[0])]);
    bytes.extend_from_slice(&[0xDE, 0xAD]);

    let file = MIDIFile::from_bytes(&bytes).unwrap();
    assert_eq!(file.scan_warnings().len(), 1);

    let (sender, receiver) = crossbeam_channel::unbounded();
    let events = file.iter_events(sender).count();
    assert_eq!(events, 2);
    assert_eq!(
        receiver.try_iter().collect::<Vec<_>>(),
        file.scan_warnings().to_vec()
    );
}
