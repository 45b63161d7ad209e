#![no_main]

use libfuzzer_sys::fuzz_target;

use midi_timeline::{io::parse, sequence::MIDIState};

fuzz_target!(|data: &[u8]| {
    if let Ok(parsed) = parse(data) {
        let mut state = MIDIState::new();
        state.apply_all(&parsed.events);
    }
});
