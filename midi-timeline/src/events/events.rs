use crate::sequence::event::Delta;

use super::event::Event;
use super::{MIDIEvent, MIDINum};
use derive::{MIDIEvent, NewEvent};

/// The foot pedals a channel tracks. The discriminant is the pedal index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pedal {
    Damper = 0,
    Portamento = 1,
    Sostenuto = 2,
    Soft = 3,
    Legato = 4,
    Hold = 5,
}

impl Pedal {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Reset all sound. `division` is the number of ticks per quarter note.
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct ResetEvent {
    pub division: u16,
}

/// Microseconds per quarter note (24 bit).
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct TempoEvent {
    pub tempo: u32,
}

/// Master volume, 14 bit unsigned.
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct MasterVolumeEvent {
    pub volume: u16,
}

/// Master balance, 14 bit value recentred around zero.
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct MasterPanEvent {
    pub pan: i16,
}

#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct NoteOnEvent {
    #[channel]
    pub channel: u8,
    #[note]
    pub note: u8,
    pub velocity: u8,
}

#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct NoteOffEvent {
    #[channel]
    pub channel: u8,
    #[note]
    pub note: u8,
}

#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct PedalOnEvent {
    #[channel]
    pub channel: u8,
    pub pedal: Pedal,
}

#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct PedalOffEvent {
    #[channel]
    pub channel: u8,
    pub pedal: Pedal,
}

/// Channel volume, 14 bit unsigned (controller 0x07 as MSB, 0x27 as LSB).
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct ChannelVolumeEvent {
    #[channel]
    pub channel: u8,
    pub volume: u16,
}

/// Channel pan, 14 bit value recentred by 0x2000.
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct ChannelPanEvent {
    #[channel]
    pub channel: u8,
    pub pan: i16,
}

/// A patch from the canonical table, see [`crate::patches`].
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct PatchChangeEvent {
    #[channel]
    pub channel: u8,
    pub patch: u16,
}

/// Pitch bend, 14 bit value recentred by 0x1000.
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct BendEvent {
    #[channel]
    pub channel: u8,
    pub bend: i16,
}

/// Modulation wheel, 14 bit unsigned.
#[derive(Debug, MIDIEvent, Clone, Copy, NewEvent, PartialEq, Eq)]
pub struct ModEvent {
    #[channel]
    pub channel: u8,
    pub modulation: u16,
}
