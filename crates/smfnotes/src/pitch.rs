//! Pitch number to note name and octave.
//!
//! Pitch 60 is C4. Pitches below 21 (A0, the lowest piano key) have no
//! name in this table and get the "N/A" sentinel with octave 99.

use serde::Serialize;

const NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Lowest pitch with a name in the table (A0).
pub const LOWEST_NAMED_PITCH: u8 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PitchLabel {
    pub name: &'static str,
    pub octave: u8,
}

impl PitchLabel {
    pub const UNAVAILABLE: PitchLabel = PitchLabel {
        name: "N/A",
        octave: 99,
    };

    pub fn is_available(&self) -> bool {
        *self != PitchLabel::UNAVAILABLE
    }
}

static TABLE: [PitchLabel; 128] = build_table();

const fn build_table() -> [PitchLabel; 128] {
    let mut table = [PitchLabel::UNAVAILABLE; 128];
    let mut pitch = LOWEST_NAMED_PITCH as usize;
    while pitch < 128 {
        table[pitch] = PitchLabel {
            name: NAMES[pitch % 12],
            octave: (pitch / 12 - 1) as u8,
        };
        pitch += 1;
    }
    table
}

/// Name and octave for a MIDI pitch. Values above 127 get the sentinel.
pub fn label(pitch: u8) -> PitchLabel {
    TABLE
        .get(pitch as usize)
        .copied()
        .unwrap_or(PitchLabel::UNAVAILABLE)
}
