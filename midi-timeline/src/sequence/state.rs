use crate::{
    events::{Event, MIDIEventEnum, Pedal},
    patches::{ACOUSTIC_GRAND_PIANO, PERCUSSION_CHANNEL, STANDARD_PERCUSSION_KIT},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteState {
    pub down: bool,
    pub velocity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelState {
    pub volume: u16,
    pub pan: i16,
    pub patch: u16,
    pub bend: i16,
    pub modulation: u16,
    pub pedals: [bool; Pedal::COUNT],
    pub notes: [NoteState; 128],
}

impl ChannelState {
    fn new(channel: u8) -> Self {
        Self {
            volume: 0x3FFF,
            pan: 0,
            patch: if channel == PERCUSSION_CHANNEL {
                STANDARD_PERCUSSION_KIT
            } else {
                ACOUSTIC_GRAND_PIANO
            },
            bend: 0,
            modulation: 0,
            pedals: [false; Pedal::COUNT],
            notes: [NoteState::default(); 128],
        }
    }

    pub fn pedal(&self, pedal: Pedal) -> bool {
        self.pedals[pedal.index()]
    }

    /// Notes currently held, with their velocities.
    pub fn notes_down(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.down)
            .map(|(key, n)| (key as u8, n.velocity))
    }
}

/// A snapshot of everything a synthesizer needs to know to render the current moment.
///
/// Built by folding events into it with [`MIDIState::apply`]. Applying an event twice has the
/// same effect as applying it once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MIDIState {
    /// Ticks per quarter note.
    pub divisor: u16,
    /// Microseconds per quarter note.
    pub tempo: u32,
    pub master_volume: u16,
    pub master_pan: i16,
    pub channels: [ChannelState; 16],
}

impl MIDIState {
    pub fn new() -> Self {
        Self {
            divisor: 1,
            tempo: 500_000,
            master_volume: 0x3FFF,
            master_pan: 0,
            channels: std::array::from_fn(|channel| ChannelState::new(channel as u8)),
        }
    }

    /// Folds one event into the state. Channels above 15 and notes above 127 are ignored.
    pub fn apply<E: MIDIEventEnum>(&mut self, event: &E) {
        match *event.as_event() {
            Event::Reset(e) => {
                *self = Self::new();
                self.divisor = e.division;
            }
            Event::Tempo(e) => self.tempo = e.tempo,
            Event::MasterVolume(e) => self.master_volume = e.volume,
            Event::MasterPan(e) => self.master_pan = e.pan,
            Event::NoteOn(e) => {
                if let Some(note) = self.note_mut(e.channel, e.note) {
                    *note = NoteState {
                        down: true,
                        velocity: e.velocity,
                    };
                }
            }
            Event::NoteOff(e) => {
                if let Some(note) = self.note_mut(e.channel, e.note) {
                    *note = NoteState::default();
                }
            }
            Event::PedalOn(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.pedals[e.pedal.index()] = true;
                }
            }
            Event::PedalOff(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.pedals[e.pedal.index()] = false;
                }
            }
            Event::ChannelVolume(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.volume = e.volume;
                }
            }
            Event::ChannelPan(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.pan = e.pan;
                }
            }
            Event::PatchChange(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.patch = e.patch;
                }
            }
            Event::Bend(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.bend = e.bend;
                }
            }
            Event::Mod(e) => {
                if let Some(channel) = self.channels.get_mut(e.channel as usize) {
                    channel.modulation = e.modulation;
                }
            }
        }
    }

    fn note_mut(&mut self, channel: u8, note: u8) -> Option<&mut NoteState> {
        self.channels
            .get_mut(channel as usize)?
            .notes
            .get_mut(note as usize)
    }

    pub fn apply_all<'a, E: MIDIEventEnum + 'a>(&mut self, events: impl IntoIterator<Item = &'a E>) {
        for event in events {
            self.apply(event);
        }
    }
}

impl Default for MIDIState {
    fn default() -> Self {
        Self::new()
    }
}
