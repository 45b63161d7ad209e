use std::process::ExitCode;

use midi_timeline::{
    events::{Event, MIDIEvent},
    io::read_midi,
    patches::patch_name,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    All,
    Warnings,
    Events,
}

fn print_help() {
    println!("Usage:");
    println!("  dump [-w|-e|--] input.mid");
    println!();
    println!("Where:");
    println!("  -w   Only print warnings");
    println!("  -e   Only print events");
    println!("  --   Default, print both warnings and events");
}

fn describe(event: &Event) -> String {
    match event {
        Event::Reset(e) => e.division.to_string(),
        Event::Tempo(e) => e.tempo.to_string(),
        Event::MasterVolume(e) => e.volume.to_string(),
        Event::MasterPan(e) => e.pan.to_string(),
        Event::NoteOn(e) => format!("{} {}", e.note, e.velocity),
        Event::NoteOff(e) => e.note.to_string(),
        Event::PedalOn(e) => e.pedal.index().to_string(),
        Event::PedalOff(e) => e.pedal.index().to_string(),
        Event::ChannelVolume(e) => e.volume.to_string(),
        Event::ChannelPan(e) => e.pan.to_string(),
        Event::PatchChange(e) => format!("{} # {}", e.patch, patch_name(e.patch)),
        Event::Bend(e) => e.bend.to_string(),
        Event::Mod(e) => e.modulation.to_string(),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (mode, path) = match args.as_slice() {
        [flag, path, ..] if flag == "-w" => (Mode::Warnings, path),
        [flag, path, ..] if flag == "-e" => (Mode::Events, path),
        [flag, path, ..] if flag == "--" => (Mode::All, path),
        [flag] if flag == "-w" || flag == "-e" || flag == "--" => {
            print_help();
            return ExitCode::FAILURE;
        }
        [path, ..] => (Mode::All, path),
        [] => {
            print_help();
            return ExitCode::SUCCESS;
        }
    };

    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Failed to read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = read_midi(
        &bytes,
        |event| {
            if mode == Mode::Warnings {
                return;
            }
            let channel = match event.channel() {
                Some(channel) => format!("{channel:X}"),
                None => "*".to_string(),
            };
            println!(
                "[{:4}] {{{}}} {:<8} {}",
                event.delta,
                channel,
                event.name(),
                describe(&event)
            );
        },
        |warning| {
            if mode != Mode::Events {
                println!("WARNING: {warning}");
            }
        },
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
