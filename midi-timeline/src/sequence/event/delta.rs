use std::ops::{Deref, DerefMut};

use crate::{
    events::{Event, MIDIDelta, MIDIEvent, MIDIEventEnum},
    num::MIDINum,
};

/// An event paired with the number of ticks since the previous event of the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delta<D: MIDINum, E> {
    pub delta: D,
    pub event: E,
}

impl<D: MIDINum, E> MIDIDelta<D> for Delta<D, E> {
    #[inline(always)]
    fn delta(&self) -> D {
        self.delta
    }

    #[inline(always)]
    fn delta_mut(&mut self) -> &mut D {
        &mut self.delta
    }
}

impl<D: MIDINum, E> Delta<D, E> {
    #[inline(always)]
    pub fn new(delta: D, event: E) -> Self {
        Self { delta, event }
    }
}

impl<D: MIDINum, E> Deref for Delta<D, E> {
    type Target = E;

    fn deref(&self) -> &Self::Target {
        &self.event
    }
}

impl<D: MIDINum, E> DerefMut for Delta<D, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.event
    }
}

impl<D: MIDINum, E: MIDIEventEnum> MIDIEvent for Delta<D, E> {
    fn note(&self) -> Option<u8> {
        self.event.note()
    }

    fn note_mut(&mut self) -> Option<&mut u8> {
        self.event.note_mut()
    }

    fn channel(&self) -> Option<u8> {
        self.event.channel()
    }

    fn channel_mut(&mut self) -> Option<&mut u8> {
        self.event.channel_mut()
    }
}

impl<D: MIDINum, E: MIDIEventEnum> MIDIEventEnum for Delta<D, E> {
    #[inline(always)]
    fn as_event(&self) -> &Event {
        self.event.as_event()
    }

    #[inline(always)]
    fn as_event_mut(&mut self) -> &mut Event {
        self.event.as_event_mut()
    }
}
