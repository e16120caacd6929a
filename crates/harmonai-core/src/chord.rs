//! Chord qualities and the chord builder

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};
use crate::pitch::PitchClass;

/// Degree label for a chord carried into a key where it is not diatonic
pub const NON_DIATONIC: &str = "N/A";

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 5] = [
        Self::Major,
        Self::Minor,
        Self::Diminished,
        Self::Augmented,
        Self::Dominant7,
    ];

    /// Get chord intervals from root
    pub fn intervals(&self) -> &'static [u8] {
        match self {
            Self::Major => &[0, 4, 7],
            Self::Minor => &[0, 3, 7],
            Self::Diminished => &[0, 3, 6],
            Self::Augmented => &[0, 4, 8],
            Self::Dominant7 => &[0, 4, 7, 10],
        }
    }

    /// Suffix appended to the root name
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Major => "",
            Self::Minor => "m",
            Self::Diminished => "°",
            Self::Augmented => "+",
            Self::Dominant7 => "7",
        }
    }

    /// Parse a name suffix; `dim` and `aug` are accepted for `°` and `+`
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Self::Major),
            "m" => Some(Self::Minor),
            "°" | "dim" => Some(Self::Diminished),
            "+" | "aug" => Some(Self::Augmented),
            "7" => Some(Self::Dominant7),
            _ => None,
        }
    }

    /// Only plain major and minor triads can anchor a key change
    pub fn is_pivotable(&self) -> bool {
        matches!(self, Self::Major | Self::Minor)
    }
}

/// A chord as plain data
///
/// `degree` is the Roman-numeral label within some key, empty for chords
/// that belong to no key, or [`NON_DIATONIC`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub name: String,
    pub notes: Vec<PitchClass>,
    pub degree: String,
    pub quality: ChordQuality,
}

impl Chord {
    pub fn root(&self) -> Option<PitchClass> {
        self.notes.first().copied()
    }

    /// Copy of this chord with a different degree label
    pub fn with_degree(&self, degree: impl Into<String>) -> Self {
        Self {
            degree: degree.into(),
            ..self.clone()
        }
    }

    /// True when `pc` sounds in this chord
    pub fn contains(&self, pc: PitchClass) -> bool {
        self.notes.contains(&pc)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for Chord {
    type Err = HarmonyError;

    /// Parse a chord name such as `C#m`, `B°` or `G7`
    fn from_str(s: &str) -> Result<Self> {
        let unknown = || HarmonyError::UnknownChord(s.to_string());
        let split = if s.get(1..2) == Some("#") { 2 } else { 1 };
        let root = s
            .get(..split)
            .and_then(PitchClass::from_name)
            .ok_or_else(unknown)?;
        let quality = ChordQuality::from_suffix(&s[split..]).ok_or_else(unknown)?;
        Ok(build_chord(root, quality))
    }
}

/// Build the chord of `quality` on `root`, without a degree label
pub fn build_chord(root: PitchClass, quality: ChordQuality) -> Chord {
    Chord {
        name: format!("{}{}", root.name(), quality.suffix()),
        notes: quality
            .intervals()
            .iter()
            .map(|&interval| root.transpose(interval))
            .collect(),
        degree: String::new(),
        quality,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass as P;

    #[test]
    fn test_build_chord() {
        let c = build_chord(P::C, ChordQuality::Major);
        assert_eq!(c.name, "C");
        assert_eq!(c.notes, vec![P::C, P::E, P::G]);
        assert_eq!(c.degree, "");

        let am = build_chord(P::A, ChordQuality::Minor);
        assert_eq!(am.name, "Am");
        assert_eq!(am.notes, vec![P::A, P::C, P::E]);
    }

    #[test]
    fn test_suffixes_and_wrapping() {
        let b_dim = build_chord(P::B, ChordQuality::Diminished);
        assert_eq!(b_dim.name, "B°");
        assert_eq!(b_dim.notes, vec![P::B, P::D, P::F]);

        let g_sharp_aug = build_chord(P::G_SHARP, ChordQuality::Augmented);
        assert_eq!(g_sharp_aug.name, "G#+");
        assert_eq!(g_sharp_aug.notes, vec![P::G_SHARP, P::C, P::E]);

        let a7 = build_chord(P::A, ChordQuality::Dominant7);
        assert_eq!(a7.name, "A7");
        assert_eq!(a7.notes, vec![P::A, P::C_SHARP, P::E, P::G]);
    }

    #[test]
    fn test_notes_are_distinct() {
        for root in P::ALL {
            for quality in ChordQuality::ALL {
                let chord = build_chord(root, quality);
                let mut notes = chord.notes.clone();
                notes.sort();
                notes.dedup();
                assert_eq!(notes.len(), quality.intervals().len());
                assert_eq!(chord.root(), Some(root));
            }
        }
    }

    #[test]
    fn test_parse_chord_names() {
        for root in P::ALL {
            for quality in ChordQuality::ALL {
                let chord = build_chord(root, quality);
                assert_eq!(chord.name.parse::<Chord>(), Ok(chord.clone()));
            }
        }
        assert_eq!("Bdim".parse::<Chord>().map(|c| c.name), Ok("B°".to_string()));
        assert_eq!("Caug".parse::<Chord>().map(|c| c.name), Ok("C+".to_string()));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(
            "Hm".parse::<Chord>(),
            Err(HarmonyError::UnknownChord("Hm".to_string()))
        );
        assert!("Cmaj9".parse::<Chord>().is_err());
        assert!("°".parse::<Chord>().is_err());
        assert!("".parse::<Chord>().is_err());
    }

    #[test]
    fn test_with_degree_copies() {
        let g = build_chord(P::G, ChordQuality::Major);
        let relabelled = g.with_degree(NON_DIATONIC);
        assert_eq!(relabelled.degree, "N/A");
        assert_eq!(relabelled.name, g.name);
        assert_eq!(g.degree, "");
    }

    #[test]
    fn test_contains() {
        let d7 = build_chord(P::D, ChordQuality::Dominant7);
        assert!(d7.contains(P::C));
        assert!(d7.contains(P::F_SHARP));
        assert!(!d7.contains(P::F));
    }

    #[test]
    fn test_pivotable_qualities() {
        assert!(ChordQuality::Major.is_pivotable());
        assert!(ChordQuality::Minor.is_pivotable());
        assert!(!ChordQuality::Diminished.is_pivotable());
        assert!(!ChordQuality::Augmented.is_pivotable());
        assert!(!ChordQuality::Dominant7.is_pivotable());
    }
}
