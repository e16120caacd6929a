//! Diatonic chord derivation and circle-of-fifths ordering

use crate::chord::{build_chord, Chord};
use crate::pitch::PitchClass;
use crate::scale::{scale_notes, ScaleType};

/// Degree indices in circle-of-fifths order: I V ii vi iii vii° IV
pub const FIFTHS_ORDER: [usize; 7] = [0, 4, 1, 5, 2, 6, 3];

/// One chord per scale degree of `scale` on `root`, in scale order
pub fn diatonic_chords(root: PitchClass, scale: ScaleType) -> Vec<Chord> {
    let formula = scale.formula();
    if formula.qualities.is_empty() || formula.degrees.is_empty() {
        return Vec::new();
    }

    scale_notes(root, scale)
        .into_iter()
        .enumerate()
        .filter_map(|(i, note)| {
            let quality = formula.quality_at(i)?;
            let degree = formula.degree_at(i)?;
            Some(build_chord(note, quality).with_degree(degree))
        })
        .collect()
}

/// Like [`diatonic_chords`], but empty when either name is not recognised
pub fn diatonic_chords_named(root: &str, scale: &str) -> Vec<Chord> {
    let (Some(root), Ok(scale)) = (PitchClass::from_name(root), scale.parse::<ScaleType>()) else {
        return Vec::new();
    };
    diatonic_chords(root, scale)
}

/// Degree label of `chord` in the key `root`/`scale`, if it is diatonic there
///
/// Chords match by name, so a chord parsed or built elsewhere finds its
/// degree as long as root and quality agree.
pub fn diatonic_degree(chord: &Chord, root: PitchClass, scale: ScaleType) -> Option<String> {
    diatonic_chords(root, scale)
        .into_iter()
        .find(|c| c.name == chord.name)
        .map(|c| c.degree)
}

/// Reorder a seven-chord diatonic set around the circle of fifths
///
/// Shorter sets (pentatonic, blues) come back unchanged.
pub fn order_by_fifths(chords: &[Chord]) -> Vec<Chord> {
    if chords.len() < FIFTHS_ORDER.len() {
        return chords.to_vec();
    }
    FIFTHS_ORDER
        .iter()
        .filter_map(|&idx| chords.get(idx).cloned())
        .collect()
}
