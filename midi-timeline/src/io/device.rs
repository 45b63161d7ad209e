use crate::events::Event;

use super::{
    errors::{Warning, WarningSink},
    track_parser::{decode_message, DeviceState},
};

/// Decodes a live stream of MIDI messages, such as bytes arriving from a device.
///
/// Running status and the per channel controller state carry over between calls to
/// [`MIDIDevice::decode`]. End of Track meta events are meaningless here and are ignored.
#[derive(Debug, Clone, Default)]
pub struct MIDIDevice {
    state: DeviceState,
}

impl MIDIDevice {
    pub fn new() -> Self {
        Self {
            state: DeviceState::new(),
        }
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Decodes every message in `bytes`. Warnings are wrapped in [`Warning::Device`].
    pub fn decode<W: WarningSink>(&mut self, bytes: &[u8], mut warnings: W) -> Vec<Event> {
        let mut events = Vec::new();
        let mut pos = 0;
        while pos < bytes.len() {
            let decoded = decode_message(&mut self.state, &bytes[pos..], |w| {
                warnings.warn(Warning::Device(w))
            });
            events.extend(decoded.event);
            pos += decoded.consumed.max(1);
        }
        events
    }
}
