use std::time::Instant;

use midi_timeline::{
    io::MIDIFile,
    patches::patch_name,
    sequence::{event::total_ticks, MIDIState},
};

pub fn main() {
    let path = std::env::args().nth(1).expect("Usage: mixer input.mid");
    let bytes = std::fs::read(&path).unwrap();

    let now = Instant::now();
    let file = MIDIFile::from_bytes(&bytes).unwrap();
    let mut iter = file.iter_events(());
    let events: Vec<_> = iter.by_ref().collect();
    let length = total_ticks::<u64, _, _>(events.iter().copied()) + iter.trailing_ticks();
    println!("Decoded {} events in {:?}", events.len(), now.elapsed());

    let mut state = MIDIState::new();
    state.apply_all(&events);

    println!("Length: {length} ticks");
    println!(
        "Divisor: {}, tempo: {}us per quarter note",
        state.divisor, state.tempo
    );
    println!(
        "Master volume: {}, master pan: {}",
        state.master_volume, state.master_pan
    );

    for (i, channel) in state.channels.iter().enumerate() {
        let held: Vec<_> = channel.notes_down().map(|(note, _)| note).collect();
        println!(
            "{{{i:X}}} {:<40} vol {:5} pan {:6} bend {:6} notes held {:?}",
            patch_name(channel.patch),
            channel.volume,
            channel.pan,
            channel.bend,
            held
        );
    }
}
