use crate::patches::{
    ACOUSTIC_GRAND_PIANO, PATCHES, PATCH_COUNT, PERCUSSION_CHANNEL, PERCUSSION_START,
    STANDARD_PERCUSSION_KIT,
};

use super::errors::TrackWarning;

/// Bank select MSB of the General MIDI 2 melody banks.
pub const MELODY_BANK: u8 = 0x79;
/// Bank select MSB of the General MIDI 2 percussion banks.
pub const PERCUSSION_BANK: u8 = 0x78;

/// Bank select state of one channel.
///
/// Controller 0x00 writes the MSB into bits 8-14 of `value`, controller 0x20 writes the LSB into
/// bits 0-7.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BankRegister {
    pub value: u16,
    pub msb_received: bool,
    pub lsb_received: bool,
}

impl BankRegister {
    pub fn set_msb(&mut self, msb: u8) {
        self.value = (self.value & 0x00FF) | ((msb as u16) << 8);
        self.msb_received = true;
    }

    pub fn set_lsb(&mut self, lsb: u8) {
        self.value = (self.value & 0xFF00) | lsb as u16;
        self.lsb_received = true;
    }

    pub fn msb(&self) -> u8 {
        (self.value >> 8) as u8
    }

    pub fn lsb(&self) -> u8 {
        (self.value & 0xFF) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.msb_received && self.lsb_received
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BankFamily {
    Melody,
    Percussion,
}

impl BankFamily {
    fn patches(self) -> std::ops::Range<u16> {
        match self {
            BankFamily::Melody => 0..PERCUSSION_START,
            BankFamily::Percussion => PERCUSSION_START..PATCH_COUNT as u16,
        }
    }
}

/// Maps a program change on `channel` to a canonical patch id.
///
/// The register holds controller 0x00 in its high byte and controller 0x20 in its low byte. The
/// high byte picks the family ([`MELODY_BANK`] or [`PERCUSSION_BANK`]) and the low byte is the
/// variation, so the lookup key is `program << 8 | lsb`.
///
/// Returns `None` when the program should be ignored. Every unusual outcome (empty, incomplete or
/// unknown bank, missing patch, fallback patch) is reported through `warn`.
pub fn resolve_patch<F: FnMut(TrackWarning)>(
    bank: &BankRegister,
    channel: u8,
    program: u8,
    warn: &mut F,
) -> Option<u16> {
    if bank.msb_received != bank.lsb_received {
        warn(TrackWarning::IncompleteBank {
            channel,
            bank: bank.value,
        });
    }

    let (family, variation) = if bank.value == 0 {
        warn(TrackWarning::EmptyBank { channel });
        if channel == PERCUSSION_CHANNEL {
            (BankFamily::Percussion, 0)
        } else {
            (BankFamily::Melody, 0)
        }
    } else {
        match bank.msb() {
            MELODY_BANK => (BankFamily::Melody, bank.lsb()),
            PERCUSSION_BANK => (BankFamily::Percussion, bank.lsb()),
            _ => {
                warn(TrackWarning::UnknownBank {
                    channel,
                    bank: bank.value,
                });
                return None;
            }
        }
    };

    let key = ((program as u16) << 8) | variation as u16;
    if let Some(patch) = family
        .patches()
        .find(|&patch| PATCHES[patch as usize].program_bank == key)
    {
        return Some(patch);
    }

    let fallback = match (family, channel == PERCUSSION_CHANNEL) {
        (BankFamily::Percussion, false) => Some(STANDARD_PERCUSSION_KIT),
        (BankFamily::Melody, true) => Some(ACOUSTIC_GRAND_PIANO),
        _ => None,
    };
    match fallback {
        Some(patch) => warn(TrackWarning::PatchFallback {
            channel,
            program,
            bank: bank.value,
            patch,
        }),
        None => warn(TrackWarning::UnknownPatch {
            channel,
            program,
            bank: bank.value,
        }),
    }
    fallback
}
