//! Pitch classes on the fixed 12-tone naming table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};

/// Canonical note names, indexed by semitones above C
pub const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// One of the 12 chromatic tones, independent of octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: Self = Self(0);
    pub const C_SHARP: Self = Self(1);
    pub const D: Self = Self(2);
    pub const D_SHARP: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const F_SHARP: Self = Self(6);
    pub const G: Self = Self(7);
    pub const G_SHARP: Self = Self(8);
    pub const A: Self = Self(9);
    pub const A_SHARP: Self = Self(10);
    pub const B: Self = Self(11);

    /// All pitch classes in table order
    pub const ALL: [PitchClass; 12] = [
        Self::C,
        Self::C_SHARP,
        Self::D,
        Self::D_SHARP,
        Self::E,
        Self::F,
        Self::F_SHARP,
        Self::G,
        Self::G_SHARP,
        Self::A,
        Self::A_SHARP,
        Self::B,
    ];

    /// Pitch class for any semitone count, wrapped modulo 12
    pub fn new(semitone: u8) -> Self {
        Self(semitone % 12)
    }

    /// Position in the table (0-11)
    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    /// Move up by `semitones`, wrapping around the octave
    pub fn transpose(self, semitones: u8) -> Self {
        Self((self.0 + semitones % 12) % 12)
    }

    /// Exact lookup against the naming table
    pub fn from_name(name: &str) -> Option<Self> {
        NOTE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|idx| Self(idx as u8))
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| HarmonyError::UnknownNote(s.to_string()))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = HarmonyError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}
