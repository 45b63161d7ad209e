use crate::events::Event;

use super::{
    errors::TrackWarning,
    patch_resolver::{resolve_patch, BankRegister},
    readers::{bytes_to_val, read_var_length, VarLengthError},
};

/// Subtracted from the 14 bit pitch bend and master pan values.
pub const BEND_CENTRE: i16 = 0x1000;
/// Subtracted from the 14 bit channel pan value.
pub const CHANNEL_PAN_CENTRE: i16 = 0x2000;

/// Controller state a decoder keeps per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelControls {
    pub bank: BankRegister,
    /// Raw 14 bit volume, assembled from controllers 0x07 and 0x27.
    pub volume: u16,
    /// Raw 14 bit pan, assembled from controllers 0x0A and 0x2A.
    pub pan: u16,
}

impl Default for ChannelControls {
    fn default() -> Self {
        Self {
            bank: BankRegister::default(),
            volume: 0,
            pan: CHANNEL_PAN_CENTRE as u16,
        }
    }
}

/// Everything a message decoder remembers between messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    pub running_status: Option<u8>,
    pub channels: [ChannelControls; 16],
}

impl DeviceState {
    pub fn new() -> Self {
        Self {
            running_status: None,
            channels: [ChannelControls::default(); 16],
        }
    }
}

impl Default for DeviceState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of decoding a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    /// Bytes of the window the message occupied. Only zero for an empty window.
    pub consumed: usize,
    pub event: Option<Event>,
    /// Set by the End of Track meta event.
    pub end_of_track: bool,
}

impl Decoded {
    fn skip(consumed: usize) -> Self {
        Self {
            consumed,
            event: None,
            end_of_track: false,
        }
    }

    fn event(consumed: usize, event: Option<Event>) -> Self {
        Self {
            consumed,
            event,
            end_of_track: false,
        }
    }
}

fn channel_message_name(kind: u8) -> &'static str {
    match kind {
        0x80 => "Note Off",
        0x90 => "Note On",
        0xA0 => "Note Pressure",
        0xB0 => "Control Change",
        0xC0 => "Program Change",
        0xD0 => "Channel Pressure",
        _ => "Pitch Bend",
    }
}

#[inline(always)]
fn data_byte<F: FnMut(TrackWarning)>(byte: u8, message: &'static str, warn: &mut F) -> u8 {
    if byte & 0x80 != 0 {
        warn(TrackWarning::InvalidDataByte { message, byte });
        byte & 0x7F
    } else {
        byte
    }
}

/// Decodes one message from the start of `window`, updating `state`.
///
/// Malformed input never fails: the problem is reported through `warn` and the message is
/// skipped (or, when truncated, the rest of the window is consumed).
pub fn decode_message<F: FnMut(TrackWarning)>(
    state: &mut DeviceState,
    window: &[u8],
    mut warn: F,
) -> Decoded {
    let first = match window.first() {
        Some(&first) => first,
        None => return Decoded::skip(0),
    };

    let (status, data) = if first & 0x80 != 0 {
        (first, &window[1..])
    } else {
        match state.running_status {
            Some(status) => (status, window),
            None => {
                warn(TrackWarning::MissingStatus { byte: first });
                return Decoded::skip(1);
            }
        }
    };

    match status {
        0x80..=0xEF => {
            state.running_status = Some(status);
            let status_len = window.len() - data.len();
            decode_channel_message(state, status, data, status_len, &mut warn)
                .unwrap_or_else(|| Decoded::skip(window.len()))
        }
        0xF0 | 0xF7 => {
            state.running_status = None;
            decode_sysex(status, data, &mut warn).unwrap_or_else(|| Decoded::skip(window.len()))
        }
        0xFF => {
            state.running_status = None;
            decode_meta(data, &mut warn).unwrap_or_else(|| Decoded::skip(window.len()))
        }
        _ => {
            state.running_status = None;
            warn(TrackWarning::UnknownMessage { status });
            Decoded::skip(1)
        }
    }
}

/// Returns `None` (after warning) when the message is truncated.
fn decode_channel_message<F: FnMut(TrackWarning)>(
    state: &mut DeviceState,
    status: u8,
    data: &[u8],
    status_len: usize,
    warn: &mut F,
) -> Option<Decoded> {
    let kind = status & 0xF0;
    let channel = status & 0x0F;
    let message = channel_message_name(kind);
    let len = match kind {
        0xC0 | 0xD0 => 1,
        _ => 2,
    };

    let raw = match data.get(..len) {
        Some(raw) => raw,
        None => {
            warn(TrackWarning::TruncatedMessage { message });
            return None;
        }
    };
    let mut bytes = [0u8; 2];
    for (out, &byte) in bytes.iter_mut().zip(raw) {
        *out = data_byte(byte, message, warn);
    }
    let [var1, var2] = bytes;

    let controls = &mut state.channels[channel as usize];
    let event = match kind {
        0x80 => Some(Event::new_note_off_event(channel, var1)),
        0x90 => {
            if var2 == 0 {
                Some(Event::new_note_off_event(channel, var1))
            } else {
                Some(Event::new_note_on_event(channel, var1, var2))
            }
        }
        0xB0 => control_change(controls, channel, var1, var2),
        0xC0 => resolve_patch(&controls.bank, channel, var1, warn)
            .map(|patch| Event::new_patch_change_event(channel, patch)),
        0xE0 => {
            let bend = ((var2 as i16) << 7) | var1 as i16;
            Some(Event::new_bend_event(channel, bend - BEND_CENTRE))
        }
        // Note and channel pressure only advance the cursor.
        _ => None,
    };

    Some(Decoded::event(status_len + len, event))
}

fn control_change(
    controls: &mut ChannelControls,
    channel: u8,
    controller: u8,
    value: u8,
) -> Option<Event> {
    let value = value as u16;
    match controller {
        0x00 => {
            controls.bank.set_msb(value as u8);
            None
        }
        0x20 => {
            controls.bank.set_lsb(value as u8);
            None
        }
        0x07 => {
            controls.volume = (controls.volume & 0x007F) | (value << 7);
            Some(Event::new_channel_volume_event(channel, controls.volume))
        }
        0x27 => {
            controls.volume = (controls.volume & 0x3F80) | value;
            Some(Event::new_channel_volume_event(channel, controls.volume))
        }
        0x0A => {
            controls.pan = (controls.pan & 0x007F) | (value << 7);
            Some(Event::new_channel_pan_event(
                channel,
                controls.pan as i16 - CHANNEL_PAN_CENTRE,
            ))
        }
        0x2A => {
            controls.pan = (controls.pan & 0x3F80) | value;
            Some(Event::new_channel_pan_event(
                channel,
                controls.pan as i16 - CHANNEL_PAN_CENTRE,
            ))
        }
        _ => None,
    }
}

/// `data` starts after the status byte. Returns `None` (after warning) when the payload runs past
/// the window.
fn decode_sysex<F: FnMut(TrackWarning)>(
    status: u8,
    data: &[u8],
    warn: &mut F,
) -> Option<Decoded> {
    let (len, len_bytes) = match read_var_length(data) {
        Ok(len) => len,
        Err(VarLengthError::TooLong) => {
            warn(TrackWarning::SysExLengthOverflow);
            return Some(Decoded::skip(1));
        }
        Err(VarLengthError::Truncated) => {
            warn(TrackWarning::TruncatedMessage { message: "SysEx" });
            return None;
        }
    };

    let payload = match data.get(len_bytes..len_bytes + len as usize) {
        Some(payload) => payload,
        None => {
            warn(TrackWarning::TruncatedMessage { message: "SysEx" });
            return None;
        }
    };

    let event = match (status, payload) {
        // Universal Real Time, Device Control
        (0xF0, &[0x7F, _device, 0x04, sub_id, lo, hi, 0xF7]) => {
            let lo = data_byte(lo, "SysEx", warn) as u16;
            let hi = data_byte(hi, "SysEx", warn) as u16;
            let value = (hi << 7) | lo;
            match sub_id {
                0x01 => Some(Event::new_master_volume_event(value)),
                0x02 => Some(Event::new_master_pan_event(value as i16 - BEND_CENTRE)),
                _ => None,
            }
        }
        _ => None,
    };

    Some(Decoded::event(1 + len_bytes + payload.len(), event))
}

/// `data` starts after the 0xFF status byte.
fn decode_meta<F: FnMut(TrackWarning)>(data: &[u8], warn: &mut F) -> Option<Decoded> {
    let (kind, len) = match data {
        &[kind, len, ..] => (kind, len),
        _ => {
            warn(TrackWarning::TruncatedMessage {
                message: "Meta Event",
            });
            return None;
        }
    };

    let payload = match data.get(2..2 + len as usize) {
        Some(payload) => payload,
        None => {
            warn(TrackWarning::TruncatedMessage {
                message: "Meta Event",
            });
            return None;
        }
    };
    let consumed = 3 + payload.len();

    match kind {
        0x2F => {
            if len != 0 {
                warn(TrackWarning::EndOfTrackLength { length: len });
            }
            Some(Decoded {
                consumed,
                event: None,
                end_of_track: true,
            })
        }
        0x51 => {
            if len != 3 {
                warn(TrackWarning::TempoLength { length: len });
            }
            let event = match payload.get(..3) {
                Some(bytes) => match bytes_to_val(bytes) {
                    0 => {
                        warn(TrackWarning::ZeroTempo);
                        None
                    }
                    tempo => Some(Event::new_tempo_event(tempo)),
                },
                None => None,
            };
            Some(Decoded::event(consumed, event))
        }
        _ => Some(Decoded::skip(consumed)),
    }
}
