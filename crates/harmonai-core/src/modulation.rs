//! Modulation search: keys a chord can pivot into

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, NON_DIATONIC};
use crate::diatonic::{diatonic_chords, diatonic_degree};
use crate::pitch::PitchClass;
use crate::scale::ScaleType;

/// Scales searched for modulation targets
pub const MODULATION_SCALES: [ScaleType; 2] = [ScaleType::Major, ScaleType::NaturalMinor];

/// A key the current chord can pivot into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulationTarget {
    pub root: PitchClass,
    pub scale: ScaleType,
    /// e.g. "D Major (as IV)"
    pub label: String,
}

/// Major and natural minor keys, other than the current one, in which
/// `current` appears as a diatonic chord
///
/// Only major and minor triads are pivots; every other quality yields no
/// targets. Results are ordered by root (C first), major before minor.
pub fn modulation_targets(
    current: &Chord,
    from_root: PitchClass,
    from_scale: ScaleType,
) -> Vec<ModulationTarget> {
    if !current.quality.is_pivotable() {
        return Vec::new();
    }

    let mut targets = Vec::new();
    for root in PitchClass::ALL {
        for scale in MODULATION_SCALES {
            if root == from_root && scale == from_scale {
                continue;
            }

            let chords = diatonic_chords(root, scale);
            let Some(found) = chords.iter().find(|c| c.name == current.name) else {
                continue;
            };

            targets.push(ModulationTarget {
                root,
                scale,
                label: format!("{} {} (as {})", root, scale.label(), found.degree),
            });
        }
    }
    targets
}

/// The chord as it reads in the key `root`/`scale`
///
/// Picks up the degree label when the chord is diatonic there, otherwise
/// the chord is carried over marked [`NON_DIATONIC`].
pub fn pivot_chord(chord: &Chord, root: PitchClass, scale: ScaleType) -> Chord {
    let degree = diatonic_degree(chord, root, scale);
    chord.with_degree(degree.as_deref().unwrap_or(NON_DIATONIC))
}
