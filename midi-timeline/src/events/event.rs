use super::events::*;
use super::MIDIEvent;

use derive::EventImpl;

#[derive(EventImpl, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Reset(ResetEvent),
    Tempo(TempoEvent),
    MasterVolume(MasterVolumeEvent),
    MasterPan(MasterPanEvent),
    #[note]
    #[channel]
    NoteOn(NoteOnEvent),
    #[note]
    #[channel]
    NoteOff(NoteOffEvent),
    #[channel]
    PedalOn(PedalOnEvent),
    #[channel]
    PedalOff(PedalOffEvent),
    #[channel]
    ChannelVolume(ChannelVolumeEvent),
    #[channel]
    ChannelPan(ChannelPanEvent),
    #[channel]
    PatchChange(PatchChangeEvent),
    #[channel]
    Bend(BendEvent),
    #[channel]
    Mod(ModEvent),
}

impl Event {
    /// Short upper case name of the event kind, as used by console dumps.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Reset(_) => "RESET",
            Event::Tempo(_) => "TEMPO",
            Event::MasterVolume(_) => "MASTVOL",
            Event::MasterPan(_) => "MASTPAN",
            Event::NoteOn(_) => "NOTEON",
            Event::NoteOff(_) => "NOTEOFF",
            Event::PedalOn(_) => "PEDALON",
            Event::PedalOff(_) => "PEDALOFF",
            Event::ChannelVolume(_) => "CHANVOL",
            Event::ChannelPan(_) => "CHANPAN",
            Event::PatchChange(_) => "PATCH",
            Event::Bend(_) => "BEND",
            Event::Mod(_) => "MOD",
        }
    }
}
