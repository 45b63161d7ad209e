use crate::num::MIDINum;
pub use event::Event;
pub use events::*;

mod event;
mod events;

/// Common accessors shared by every event payload and by [`Event`] itself.
pub trait MIDIEvent: std::fmt::Debug {
    fn note(&self) -> Option<u8>;
    fn note_mut(&mut self) -> Option<&mut u8>;

    fn channel(&self) -> Option<u8>;
    fn channel_mut(&mut self) -> Option<&mut u8>;
}

pub trait MIDIEventEnum: MIDIEvent {
    fn as_event(&self) -> &Event;
    fn as_event_mut(&mut self) -> &mut Event;
}

pub trait MIDIDelta<D: MIDINum> {
    fn delta(&self) -> D;
    fn delta_mut(&mut self) -> &mut D;
}

impl MIDIEventEnum for Event {
    fn as_event(&self) -> &Event {
        self
    }

    fn as_event_mut(&mut self) -> &mut Event {
        self
    }
}
