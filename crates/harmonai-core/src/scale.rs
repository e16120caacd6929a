//! Scale formula registry
//!
//! Each scale carries its own hand-specified offsets, triad qualities and
//! degree labels. The quality and degree tables are conventions, not
//! something derived from the interval content, so they live side by side
//! in one lookup table keyed by [`ScaleType`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::ChordQuality;
use crate::error::{HarmonyError, Result};
use crate::pitch::PitchClass;

// ============================================================================
// Formula Table
// ============================================================================

/// Offsets, qualities and degree labels for one scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFormula {
    /// Semitone offsets from the root (first is always 0)
    pub offsets: &'static [u8],
    /// Chord quality per scale degree
    pub qualities: &'static [ChordQuality],
    /// Roman-numeral label per scale degree
    pub degrees: &'static [&'static str],
}

impl ScaleFormula {
    /// Number of notes in the scale
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Quality for a degree index, wrapping around the quality table
    pub fn quality_at(&self, degree: usize) -> Option<ChordQuality> {
        if self.qualities.is_empty() {
            return None;
        }
        Some(self.qualities[degree % self.qualities.len()])
    }

    /// Degree label for a degree index, wrapping around the label table
    pub fn degree_at(&self, degree: usize) -> Option<&'static str> {
        if self.degrees.is_empty() {
            return None;
        }
        Some(self.degrees[degree % self.degrees.len()])
    }
}

const MAJ: ChordQuality = ChordQuality::Major;
const MIN: ChordQuality = ChordQuality::Minor;
const DIM: ChordQuality = ChordQuality::Diminished;
const AUG: ChordQuality = ChordQuality::Augmented;
const DOM7: ChordQuality = ChordQuality::Dominant7;

static MAJOR: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 4, 5, 7, 9, 11],
    qualities: &[MAJ, MIN, MIN, MAJ, MAJ, MIN, DIM],
    degrees: &["I", "ii", "iii", "IV", "V", "vi", "vii°"],
};

static NATURAL_MINOR: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 3, 5, 7, 8, 10],
    qualities: &[MIN, DIM, MAJ, MIN, MIN, MAJ, MAJ],
    degrees: &["i", "ii°", "III", "iv", "v", "VI", "VII"],
};

static HARMONIC_MINOR: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 3, 5, 7, 8, 11],
    qualities: &[MIN, DIM, AUG, MIN, DOM7, MAJ, DIM],
    degrees: &["i", "ii°", "III+", "iv", "V", "VI", "vii°"],
};

static MELODIC_MINOR: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 3, 5, 7, 9, 11],
    qualities: &[MIN, MIN, AUG, DOM7, DOM7, DIM, DIM],
    degrees: &["i", "ii", "III+", "IV", "V", "vi°", "vii°"],
};

static MAJOR_PENTATONIC: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 4, 7, 9],
    qualities: &[MAJ, MIN, MAJ, MAJ, MIN],
    degrees: &["I", "ii", "iii", "V", "vi"],
};

static MINOR_PENTATONIC: ScaleFormula = ScaleFormula {
    offsets: &[0, 3, 5, 7, 10],
    qualities: &[MIN, MAJ, MIN, MIN, MAJ],
    degrees: &["i", "III", "iv", "v", "VII"],
};

// Six qualities against five labels: the sixth degree wraps back to "I7".
static BLUES: ScaleFormula = ScaleFormula {
    offsets: &[0, 3, 5, 6, 7, 10],
    qualities: &[DOM7, MAJ, DOM7, DIM, DOM7, MAJ],
    degrees: &["I7", "IV", "V7", "vii°", "I7(2)"],
};

static DORIAN: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 3, 5, 7, 9, 10],
    qualities: &[MIN, MIN, MAJ, DOM7, MIN, DIM, MAJ],
    degrees: &["i", "ii", "III", "IV", "v", "vi°", "VII"],
};

static PHRYGIAN: ScaleFormula = ScaleFormula {
    offsets: &[0, 1, 3, 5, 7, 8, 10],
    qualities: &[MIN, MAJ, DOM7, MIN, DIM, MAJ, MIN],
    degrees: &["i", "II", "III", "iv", "v°", "VI", "vii"],
};

static LYDIAN: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 4, 6, 7, 9, 11],
    qualities: &[MAJ, DOM7, MIN, DIM, MAJ, MIN, MIN],
    degrees: &["I", "II", "iii", "iv°", "V", "vi", "vii"],
};

static MIXOLYDIAN: ScaleFormula = ScaleFormula {
    offsets: &[0, 2, 4, 5, 7, 9, 10],
    qualities: &[DOM7, MIN, DIM, MAJ, MIN, MIN, MAJ],
    degrees: &["I", "ii", "iii°", "IV", "v", "vi", "VII"],
};

static LOCRIAN: ScaleFormula = ScaleFormula {
    offsets: &[0, 1, 3, 5, 6, 8, 10],
    qualities: &[DIM, MAJ, MIN, MIN, MAJ, MAJ, MIN],
    degrees: &["i°", "II", "iii", "iv", "v", "VI", "vii"],
};

// ============================================================================
// Scale Types
// ============================================================================

/// Scale identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
    MajorPentatonic,
    MinorPentatonic,
    Blues,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
}

impl ScaleType {
    pub const ALL: [ScaleType; 12] = [
        Self::Major,
        Self::NaturalMinor,
        Self::HarmonicMinor,
        Self::MelodicMinor,
        Self::MajorPentatonic,
        Self::MinorPentatonic,
        Self::Blues,
        Self::Dorian,
        Self::Phrygian,
        Self::Lydian,
        Self::Mixolydian,
        Self::Locrian,
    ];

    pub fn formula(&self) -> &'static ScaleFormula {
        match self {
            Self::Major => &MAJOR,
            Self::NaturalMinor => &NATURAL_MINOR,
            Self::HarmonicMinor => &HARMONIC_MINOR,
            Self::MelodicMinor => &MELODIC_MINOR,
            Self::MajorPentatonic => &MAJOR_PENTATONIC,
            Self::MinorPentatonic => &MINOR_PENTATONIC,
            Self::Blues => &BLUES,
            Self::Dorian => &DORIAN,
            Self::Phrygian => &PHRYGIAN,
            Self::Lydian => &LYDIAN,
            Self::Mixolydian => &MIXOLYDIAN,
            Self::Locrian => &LOCRIAN,
        }
    }

    /// Get scale intervals (semitones from root)
    pub fn intervals(&self) -> &'static [u8] {
        self.formula().offsets
    }

    /// Stable identifier, as used in config files and on the command line
    pub fn id(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::NaturalMinor => "natural_minor",
            Self::HarmonicMinor => "harmonic_minor",
            Self::MelodicMinor => "melodic_minor",
            Self::MajorPentatonic => "major_pentatonic",
            Self::MinorPentatonic => "minor_pentatonic",
            Self::Blues => "blues",
            Self::Dorian => "dorian",
            Self::Phrygian => "phrygian",
            Self::Lydian => "lydian",
            Self::Mixolydian => "mixolydian",
            Self::Locrian => "locrian",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::NaturalMinor => "Natural Minor",
            Self::HarmonicMinor => "Harmonic Minor",
            Self::MelodicMinor => "Melodic Minor",
            Self::MajorPentatonic => "Major Pentatonic",
            Self::MinorPentatonic => "Minor Pentatonic",
            Self::Blues => "Blues",
            Self::Dorian => "Dorian",
            Self::Phrygian => "Phrygian",
            Self::Lydian => "Lydian",
            Self::Mixolydian => "Mixolydian",
            Self::Locrian => "Locrian",
        }
    }

    pub fn category(&self) -> ScaleCategory {
        match self {
            Self::Major | Self::NaturalMinor | Self::HarmonicMinor | Self::MelodicMinor => {
                ScaleCategory::MajorMinor
            }
            Self::MajorPentatonic | Self::MinorPentatonic | Self::Blues => ScaleCategory::Pentatonic,
            Self::Dorian | Self::Phrygian | Self::Lydian | Self::Mixolydian | Self::Locrian => {
                ScaleCategory::Modes
            }
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ScaleType {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|scale| scale.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| HarmonyError::UnknownScale(s.to_string()))
    }
}

/// Grouping used when listing scales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleCategory {
    MajorMinor,
    Pentatonic,
    Modes,
}

impl ScaleCategory {
    pub const ALL: [ScaleCategory; 3] = [Self::MajorMinor, Self::Pentatonic, Self::Modes];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MajorMinor => "Major & Minor",
            Self::Pentatonic => "Pentatonic",
            Self::Modes => "Modes",
        }
    }

    /// Scales in this category, in registry order
    pub fn scales(&self) -> impl Iterator<Item = ScaleType> + '_ {
        ScaleType::ALL
            .into_iter()
            .filter(move |scale| scale.category() == *self)
    }
}

// ============================================================================
// Scale Notes
// ============================================================================

/// Pitch classes of `scale` starting on `root`
pub fn scale_notes(root: PitchClass, scale: ScaleType) -> Vec<PitchClass> {
    scale
        .intervals()
        .iter()
        .map(|&offset| root.transpose(offset))
        .collect()
}

/// Like [`scale_notes`], but empty when either name is not recognised
pub fn scale_notes_named(root: &str, scale: &str) -> Vec<PitchClass> {
    let (Some(root), Ok(scale)) = (PitchClass::from_name(root), scale.parse::<ScaleType>()) else {
        return Vec::new();
    };
    scale_notes(root, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_notes_length_and_range() {
        for root in PitchClass::ALL {
            for scale in ScaleType::ALL {
                let notes = scale_notes(root, scale);
                assert_eq!(notes.len(), scale.formula().len());
                assert!(notes.iter().all(|pc| pc.index() < 12));
                assert_eq!(notes[0], root);
            }
        }
    }

    #[test]
    fn test_formulas_are_well_formed() {
        for scale in ScaleType::ALL {
            let formula = scale.formula();
            assert!(!formula.is_empty(), "{scale} has no offsets");
            assert_eq!(formula.offsets[0], 0, "{scale} does not start on the root");
            assert!(
                formula.offsets.windows(2).all(|w| w[0] < w[1] && w[1] < 12),
                "{scale} offsets must be distinct and ascending"
            );
            assert!(!formula.qualities.is_empty());
            assert!(!formula.degrees.is_empty());
        }
    }

    #[test]
    fn test_c_major_notes() {
        use PitchClass as P;
        assert_eq!(
            scale_notes(P::C, ScaleType::Major),
            vec![P::C, P::D, P::E, P::F, P::G, P::A, P::B]
        );
    }

    #[test]
    fn test_scale_wraps_past_b() {
        use PitchClass as P;
        assert_eq!(
            scale_notes(P::A, ScaleType::NaturalMinor),
            vec![P::A, P::B, P::C, P::D, P::E, P::F, P::G]
        );
        assert_eq!(
            scale_notes(P::A, ScaleType::Blues),
            vec![P::A, P::C, P::D, P::D_SHARP, P::E, P::G]
        );
    }

    #[test]
    fn test_named_lookup_degrades_to_empty() {
        assert_eq!(scale_notes_named("D", "dorian").len(), 7);
        assert!(scale_notes_named("H", "major").is_empty());
        assert!(scale_notes_named("C", "bebop").is_empty());
    }

    #[test]
    fn test_blues_degree_labels_wrap() {
        let formula = ScaleType::Blues.formula();
        assert_eq!(formula.quality_at(5), Some(ChordQuality::Major));
        assert_eq!(formula.degree_at(5), Some("I7"));
    }

    #[test]
    fn test_parse_and_display_ids() {
        for scale in ScaleType::ALL {
            assert_eq!(scale.id().parse::<ScaleType>(), Ok(scale));
            assert_eq!(scale.to_string(), scale.id());
        }
        assert_eq!("Natural_Minor".parse::<ScaleType>(), Ok(ScaleType::NaturalMinor));
        assert!("ionian".parse::<ScaleType>().is_err());
    }

    #[test]
    fn test_every_scale_has_one_category() {
        let listed: usize = ScaleCategory::ALL.iter().map(|c| c.scales().count()).sum();
        assert_eq!(listed, ScaleType::ALL.len());
        let modes: Vec<_> = ScaleCategory::Modes.scales().collect();
        assert_eq!(modes.first(), Some(&ScaleType::Dorian));
        assert_eq!(modes.len(), 5);
    }
}
