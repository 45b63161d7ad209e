//! The canonical patch set.
//!
//! Every patch id is an index into [`PATCHES`]. Ids below [`PERCUSSION_START`] are melodic
//! instruments (the 128 General MIDI programs plus their bank variations), the remaining ids are
//! percussion kits.

/// Number of canonical patches.
pub const PATCH_COUNT: usize = 265;

/// First percussion kit id.
pub const PERCUSSION_START: u16 = 256;

pub const ACOUSTIC_GRAND_PIANO: u16 = 0;
pub const STANDARD_PERCUSSION_KIT: u16 = 256;

/// The channel conventionally reserved for percussion (channel 10, zero based).
pub const PERCUSSION_CHANNEL: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchInfo {
    /// `0xQQRR`, where `QQ` is the program change code and `RR` the bank variation.
    pub program_bank: u16,
    pub name: &'static str,
}

impl PatchInfo {
    const fn new(program_bank: u16, name: &'static str) -> Self {
        Self { program_bank, name }
    }

    pub fn program(&self) -> u8 {
        (self.program_bank >> 8) as u8
    }

    pub fn bank(&self) -> u8 {
        (self.program_bank & 0xFF) as u8
    }
}

pub static PATCHES: [PatchInfo; PATCH_COUNT] = [
    PatchInfo::new(0x0000, "Acoustic Grand Piano"),
    PatchInfo::new(0x0001, "Acoustic Grand Piano (wide)"),
    PatchInfo::new(0x0002, "Acoustic Grand Piano (dark)"),
    PatchInfo::new(0x0100, "Bright Acoustic Piano"),
    PatchInfo::new(0x0101, "Bright Acoustic Piano (wide)"),
    PatchInfo::new(0x0200, "Electric Grand Piano"),
    PatchInfo::new(0x0201, "Electric Grand Piano (wide)"),
    PatchInfo::new(0x0300, "Honky-tonk Piano"),
    PatchInfo::new(0x0301, "Honky-tonk Piano (wide)"),
    PatchInfo::new(0x0400, "Electric Piano 1"),
    PatchInfo::new(0x0401, "Electric Piano 1 (detuned)"),
    PatchInfo::new(0x0402, "Electric Piano 1 (velocity mix)"),
    PatchInfo::new(0x0403, "Electric Piano 1 (60's)"),
    PatchInfo::new(0x0500, "Electric Piano 2"),
    PatchInfo::new(0x0501, "Electric Piano 2 (detuned)"),
    PatchInfo::new(0x0502, "Electric Piano 2 (velocity mix)"),
    PatchInfo::new(0x0503, "Electric Piano 2 (legend)"),
    PatchInfo::new(0x0504, "Electric Piano 2 (phase)"),
    PatchInfo::new(0x0600, "Harpsichord"),
    PatchInfo::new(0x0601, "Harpsichord (octave mix)"),
    PatchInfo::new(0x0602, "Harpsichord (wide)"),
    PatchInfo::new(0x0603, "Harpsichord (with key off)"),
    PatchInfo::new(0x0700, "Clavi"),
    PatchInfo::new(0x0701, "Clavi (pulse)"),
    PatchInfo::new(0x0800, "Celesta"),
    PatchInfo::new(0x0900, "Glockenspiel"),
    PatchInfo::new(0x0A00, "Music Box"),
    PatchInfo::new(0x0B00, "Vibraphone"),
    PatchInfo::new(0x0B01, "Vibraphone (wide)"),
    PatchInfo::new(0x0C00, "Marimba"),
    PatchInfo::new(0x0C01, "Marimba (wide)"),
    PatchInfo::new(0x0D00, "Xylophone"),
    PatchInfo::new(0x0E00, "Tubular Bells"),
    PatchInfo::new(0x0E01, "Tubular Bells (church)"),
    PatchInfo::new(0x0E02, "Tubular Bells (carillon)"),
    PatchInfo::new(0x0F00, "Dulcimer"),
    PatchInfo::new(0x1000, "Drawbar Organ"),
    PatchInfo::new(0x1001, "Drawbar Organ (detuned)"),
    PatchInfo::new(0x1002, "Drawbar Organ (60's)"),
    PatchInfo::new(0x1003, "Drawbar Organ (alternative)"),
    PatchInfo::new(0x1100, "Percussive Organ"),
    PatchInfo::new(0x1101, "Percussive Organ (detuned)"),
    PatchInfo::new(0x1102, "Percussive Organ 2"),
    PatchInfo::new(0x1200, "Rock Organ"),
    PatchInfo::new(0x1300, "Church Organ"),
    PatchInfo::new(0x1301, "Church Organ (octave mix)"),
    PatchInfo::new(0x1302, "Church Organ (detuned)"),
    PatchInfo::new(0x1400, "Reed Organ"),
    PatchInfo::new(0x1401, "Reed Organ (puff)"),
    PatchInfo::new(0x1500, "Accordion"),
    PatchInfo::new(0x1501, "Accordion (alternative)"),
    PatchInfo::new(0x1600, "Harmonica"),
    PatchInfo::new(0x1700, "Tango Accordion"),
    PatchInfo::new(0x1800, "Nylon Acoustic Guitar"),
    PatchInfo::new(0x1801, "Nylon Acoustic Guitar (ukulele)"),
    PatchInfo::new(0x1802, "Nylon Acoustic Guitar (key off)"),
    PatchInfo::new(0x1803, "Nylon Acoustic Guitar (alternative)"),
    PatchInfo::new(0x1900, "Steel Acoustic Guitar"),
    PatchInfo::new(0x1901, "Steel Acoustic Guitar (12-string)"),
    PatchInfo::new(0x1902, "Steel Acoustic Guitar (mandolin)"),
    PatchInfo::new(0x1903, "Steel Acoustic Guitar (body sound)"),
    PatchInfo::new(0x1A00, "Jazz Electric Guitar"),
    PatchInfo::new(0x1A01, "Jazz Electric Guitar (pedal steel)"),
    PatchInfo::new(0x1B00, "Clean Electric Guitar"),
    PatchInfo::new(0x1B01, "Clean Electric Guitar (detuned)"),
    PatchInfo::new(0x1B02, "Clean Electric Guitar (midtone)"),
    PatchInfo::new(0x1C00, "Muted Electric Guitar"),
    PatchInfo::new(0x1C01, "Muted Electric Guitar (funky cutting)"),
    PatchInfo::new(0x1C02, "Muted Electric Guitar (velo-sw)"),
    PatchInfo::new(0x1C03, "Muted Electric Guitar (jazz man)"),
    PatchInfo::new(0x1D00, "Overdriven Guitar"),
    PatchInfo::new(0x1D01, "Overdriven Guitar (pinch)"),
    PatchInfo::new(0x1E00, "Distortion Guitar"),
    PatchInfo::new(0x1E01, "Distortion Guitar (feedback)"),
    PatchInfo::new(0x1E02, "Distortion Guitar (rhythm)"),
    PatchInfo::new(0x1F00, "Guitar Harmonics"),
    PatchInfo::new(0x1F01, "Guitar Harmonics (feedback)"),
    PatchInfo::new(0x2000, "Acoustic Bass"),
    PatchInfo::new(0x2100, "Finger Electric Bass"),
    PatchInfo::new(0x2101, "Finger Electric Bass (slap)"),
    PatchInfo::new(0x2200, "Pick Electric Bass"),
    PatchInfo::new(0x2300, "Fretless Bass"),
    PatchInfo::new(0x2400, "Slap Bass 1"),
    PatchInfo::new(0x2500, "Slap Bass 2"),
    PatchInfo::new(0x2600, "Synth Bass 1"),
    PatchInfo::new(0x2601, "Synth Bass 1 (warm)"),
    PatchInfo::new(0x2602, "Synth Bass 1 (resonance)"),
    PatchInfo::new(0x2603, "Synth Bass 1 (clavi)"),
    PatchInfo::new(0x2604, "Synth Bass 1 (hammer)"),
    PatchInfo::new(0x2700, "Synth Bass 2"),
    PatchInfo::new(0x2701, "Synth Bass 2 (attack)"),
    PatchInfo::new(0x2702, "Synth Bass 2 (rubber)"),
    PatchInfo::new(0x2703, "Synth Bass 2 (attack pulse)"),
    PatchInfo::new(0x2800, "Violin"),
    PatchInfo::new(0x2801, "Violin (slow attack)"),
    PatchInfo::new(0x2900, "Viola"),
    PatchInfo::new(0x2A00, "Cello"),
    PatchInfo::new(0x2B00, "Contrabass"),
    PatchInfo::new(0x2C00, "Tremolo Strings"),
    PatchInfo::new(0x2D00, "Pizzicato Strings"),
    PatchInfo::new(0x2E00, "Orchestral Harp"),
    PatchInfo::new(0x2E01, "Orchestral Harp (yang chin)"),
    PatchInfo::new(0x2F00, "Timpani"),
    PatchInfo::new(0x3000, "String Ensembles 1"),
    PatchInfo::new(0x3001, "String Ensembles 1 (strings and brass)"),
    PatchInfo::new(0x3002, "String Ensembles 1 (60s strings)"),
    PatchInfo::new(0x3100, "String Ensembles 2"),
    PatchInfo::new(0x3200, "SynthStrings 1"),
    PatchInfo::new(0x3201, "SynthStrings 1 (alternative)"),
    PatchInfo::new(0x3300, "SynthStrings 2"),
    PatchInfo::new(0x3400, "Choir Aahs"),
    PatchInfo::new(0x3401, "Choir Aahs (alternative)"),
    PatchInfo::new(0x3500, "Voice Oohs"),
    PatchInfo::new(0x3501, "Voice Oohs (humming)"),
    PatchInfo::new(0x3600, "Synth Voice"),
    PatchInfo::new(0x3601, "Synth Voice (analog)"),
    PatchInfo::new(0x3700, "Orchestra Hit"),
    PatchInfo::new(0x3701, "Orchestra Hit (bass hit plus)"),
    PatchInfo::new(0x3702, "Orchestra Hit (6th)"),
    PatchInfo::new(0x3703, "Orchestra Hit (euro)"),
    PatchInfo::new(0x3800, "Trumpet"),
    PatchInfo::new(0x3801, "Trumpet (dark soft)"),
    PatchInfo::new(0x3900, "Trombone"),
    PatchInfo::new(0x3901, "Trombone (alternative)"),
    PatchInfo::new(0x3902, "Trombone (bright)"),
    PatchInfo::new(0x3A00, "Tuba"),
    PatchInfo::new(0x3B00, "Muted Trumpet"),
    PatchInfo::new(0x3B01, "Muted Trumpet (alternative)"),
    PatchInfo::new(0x3C00, "French Horn"),
    PatchInfo::new(0x3C01, "French Horn (warm)"),
    PatchInfo::new(0x3D00, "Brass Section"),
    PatchInfo::new(0x3D01, "Brass Section (octave mix)"),
    PatchInfo::new(0x3E00, "Synth Brass 1"),
    PatchInfo::new(0x3E01, "Synth Brass 1 (alternative)"),
    PatchInfo::new(0x3E02, "Synth Brass 1 (analog)"),
    PatchInfo::new(0x3E03, "Synth Brass 1 (jump)"),
    PatchInfo::new(0x3F00, "Synth Brass 2"),
    PatchInfo::new(0x3F01, "Synth Brass 2 (alternative)"),
    PatchInfo::new(0x3F02, "Synth Brass 2 (analog)"),
    PatchInfo::new(0x4000, "Soprano Sax"),
    PatchInfo::new(0x4100, "Alto Sax"),
    PatchInfo::new(0x4200, "Tenor Sax"),
    PatchInfo::new(0x4300, "Baritone Sax"),
    PatchInfo::new(0x4400, "Oboe"),
    PatchInfo::new(0x4500, "English Horn"),
    PatchInfo::new(0x4600, "Bassoon"),
    PatchInfo::new(0x4700, "Clarinet"),
    PatchInfo::new(0x4800, "Piccolo"),
    PatchInfo::new(0x4900, "Flute"),
    PatchInfo::new(0x4A00, "Recorder"),
    PatchInfo::new(0x4B00, "Pan Flute"),
    PatchInfo::new(0x4C00, "Blown Bottle"),
    PatchInfo::new(0x4D00, "Shakuhachi"),
    PatchInfo::new(0x4E00, "Whistle"),
    PatchInfo::new(0x4F00, "Ocarina"),
    PatchInfo::new(0x5000, "Oscillator 1"),
    PatchInfo::new(0x5001, "Oscillator 1 (square)"),
    PatchInfo::new(0x5002, "Oscillator 1 (sine)"),
    PatchInfo::new(0x5100, "Oscillator 2"),
    PatchInfo::new(0x5101, "Oscillator 2 (sawtooth)"),
    PatchInfo::new(0x5102, "Oscillator 2 (saw + pulse)"),
    PatchInfo::new(0x5103, "Oscillator 2 (double sawtooth)"),
    PatchInfo::new(0x5104, "Oscillator 2 (sequenced analog)"),
    PatchInfo::new(0x5200, "Calliope"),
    PatchInfo::new(0x5300, "Chiff"),
    PatchInfo::new(0x5400, "Charang"),
    PatchInfo::new(0x5401, "Charang (wire lead)"),
    PatchInfo::new(0x5500, "Voice"),
    PatchInfo::new(0x5600, "Fifths"),
    PatchInfo::new(0x5700, "Bass + Lead"),
    PatchInfo::new(0x5701, "Bass + Lead (soft wrl)"),
    PatchInfo::new(0x5800, "New Age"),
    PatchInfo::new(0x5900, "Warm"),
    PatchInfo::new(0x5901, "Warm (sine)"),
    PatchInfo::new(0x5A00, "Polysynth"),
    PatchInfo::new(0x5B00, "Choir"),
    PatchInfo::new(0x5B01, "Choir (itopia)"),
    PatchInfo::new(0x5C00, "Bowed"),
    PatchInfo::new(0x5D00, "Metallic"),
    PatchInfo::new(0x5E00, "Halo"),
    PatchInfo::new(0x5F00, "Sweep"),
    PatchInfo::new(0x6000, "Rain"),
    PatchInfo::new(0x6100, "Soundtrack"),
    PatchInfo::new(0x6200, "Crystal"),
    PatchInfo::new(0x6201, "Crystal (mallet)"),
    PatchInfo::new(0x6300, "Atmosphere"),
    PatchInfo::new(0x6400, "Brightness"),
    PatchInfo::new(0x6500, "Goblins"),
    PatchInfo::new(0x6600, "Echoes"),
    PatchInfo::new(0x6601, "Echoes (bell)"),
    PatchInfo::new(0x6602, "Echoes (pan)"),
    PatchInfo::new(0x6700, "Sci-Fi"),
    PatchInfo::new(0x6800, "Sitar"),
    PatchInfo::new(0x6801, "Sitar (bend)"),
    PatchInfo::new(0x6900, "Banjo"),
    PatchInfo::new(0x6A00, "Shamisen"),
    PatchInfo::new(0x6B00, "Koto"),
    PatchInfo::new(0x6B01, "Koto (taisho)"),
    PatchInfo::new(0x6C00, "Kalimba"),
    PatchInfo::new(0x6D00, "Bag Pipe"),
    PatchInfo::new(0x6E00, "Fiddle"),
    PatchInfo::new(0x6F00, "Shanai"),
    PatchInfo::new(0x7000, "Tinkle Bell"),
    PatchInfo::new(0x7100, "Agogo"),
    PatchInfo::new(0x7200, "Steel Drums"),
    PatchInfo::new(0x7300, "Woodblock"),
    PatchInfo::new(0x7301, "Woodblock (castanets)"),
    PatchInfo::new(0x7400, "Taiko Drum"),
    PatchInfo::new(0x7401, "Taiko Drum (concert bass)"),
    PatchInfo::new(0x7500, "Melodic Tom"),
    PatchInfo::new(0x7501, "Melodic Tom (power)"),
    PatchInfo::new(0x7600, "Synth Drum"),
    PatchInfo::new(0x7601, "Synth Drum (rhythm box tom)"),
    PatchInfo::new(0x7602, "Synth Drum (electric)"),
    PatchInfo::new(0x7700, "Reverse Cymbal"),
    PatchInfo::new(0x7800, "Guitar Fret Noise"),
    PatchInfo::new(0x7801, "Guitar Cutting Noise (GM2)"),
    PatchInfo::new(0x7802, "Acoustic Bass String Slap (GM2)"),
    PatchInfo::new(0x7900, "Breath Noise"),
    PatchInfo::new(0x7901, "Flute Key Click (GM2)"),
    PatchInfo::new(0x7A00, "Seashore"),
    PatchInfo::new(0x7A01, "Rain (GM2)"),
    PatchInfo::new(0x7A02, "Thunder (GM2)"),
    PatchInfo::new(0x7A03, "Wind (GM2)"),
    PatchInfo::new(0x7A04, "Stream (GM2)"),
    PatchInfo::new(0x7A05, "Bubble (GM2)"),
    PatchInfo::new(0x7B00, "Bird Tweet 1"),
    PatchInfo::new(0x7B01, "Dog (GM2)"),
    PatchInfo::new(0x7B02, "Horse Gallop (GM2)"),
    PatchInfo::new(0x7B03, "Bird Tweet 2 (GM2)"),
    PatchInfo::new(0x7C00, "Telephone Ring 1"),
    PatchInfo::new(0x7C01, "Telephone Ring 2 (GM2)"),
    PatchInfo::new(0x7C02, "Door Creaking (GM2)"),
    PatchInfo::new(0x7C03, "Door (GM2)"),
    PatchInfo::new(0x7C04, "Scratch (GM2)"),
    PatchInfo::new(0x7C05, "Wind Chime (GM2)"),
    PatchInfo::new(0x7D00, "Helicopter"),
    PatchInfo::new(0x7D01, "Car Engine (GM2)"),
    PatchInfo::new(0x7D02, "Car Stop (GM2)"),
    PatchInfo::new(0x7D03, "Car Pass (GM2)"),
    PatchInfo::new(0x7D04, "Car Crash (GM2)"),
    PatchInfo::new(0x7D05, "Siren (GM2)"),
    PatchInfo::new(0x7D06, "Train (GM2)"),
    PatchInfo::new(0x7D07, "Jetplane (GM2)"),
    PatchInfo::new(0x7D08, "Starship (GM2)"),
    PatchInfo::new(0x7D09, "Burst Noise (GM2)"),
    PatchInfo::new(0x7E00, "Applause"),
    PatchInfo::new(0x7E01, "Laughing (GM2)"),
    PatchInfo::new(0x7E02, "Screaming (GM2)"),
    PatchInfo::new(0x7E03, "Punch (GM2)"),
    PatchInfo::new(0x7E04, "Heart Beat (GM2)"),
    PatchInfo::new(0x7E05, "Footsteps (GM2)"),
    PatchInfo::new(0x7F00, "Gun Shot"),
    PatchInfo::new(0x7F01, "Machine Gun (GM2)"),
    PatchInfo::new(0x7F02, "Laser Gun (GM2)"),
    PatchInfo::new(0x7F03, "Explosion (GM2)"),
    PatchInfo::new(0x0000, "PSS Standard"),
    PatchInfo::new(0x0800, "PSS Room"),
    PatchInfo::new(0x1000, "PSS Power"),
    PatchInfo::new(0x1800, "PSS Electronic"),
    PatchInfo::new(0x1900, "PSS Analog"),
    PatchInfo::new(0x2000, "PSS Jazz"),
    PatchInfo::new(0x2800, "PSS Brush"),
    PatchInfo::new(0x3000, "PSS Orchestra"),
    PatchInfo::new(0x3800, "PSS Sound Effects"),
];

/// Returns the `0xQQRR` program/bank code of a patch.
pub fn patch_program_bank(patch: u16) -> Option<u16> {
    PATCHES.get(patch as usize).map(|p| p.program_bank)
}

/// Display name of a patch, or `"Invalid patch"` for ids outside the table.
pub fn patch_name(patch: u16) -> &'static str {
    match PATCHES.get(patch as usize) {
        Some(p) => p.name,
        None => "Invalid patch",
    }
}

pub fn is_percussion(patch: u16) -> bool {
    patch >= PERCUSSION_START && (patch as usize) < PATCH_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_ids() {
        assert_eq!(patch_name(ACOUSTIC_GRAND_PIANO), "Acoustic Grand Piano");
        assert_eq!(patch_name(STANDARD_PERCUSSION_KIT), "PSS Standard");
        assert_eq!(patch_name(PATCH_COUNT as u16), "Invalid patch");
        assert!(is_percussion(STANDARD_PERCUSSION_KIT));
        assert!(!is_percussion(255));
        assert!(!is_percussion(265));
    }

    #[test]
    fn melodic_codes_are_unique() {
        let melodic = &PATCHES[..PERCUSSION_START as usize];
        for (i, a) in melodic.iter().enumerate() {
            for b in &melodic[i + 1..] {
                assert_ne!(a.program_bank, b.program_bank, "{} / {}", a.name, b.name);
            }
        }
    }

    #[test]
    fn every_program_has_a_base_patch() {
        for program in 0..=127u16 {
            let code = program << 8;
            assert!(
                PATCHES[..PERCUSSION_START as usize]
                    .iter()
                    .any(|p| p.program_bank == code),
                "program {program} missing"
            );
        }
    }

    #[test]
    fn program_and_bank_split() {
        let sitar_bend = &PATCHES[193];
        assert_eq!(sitar_bend.name, "Sitar (bend)");
        assert_eq!(sitar_bend.program(), 104);
        assert_eq!(sitar_bend.bank(), 1);
        assert_eq!(patch_program_bank(262), Some(0x2800));
    }
}
