//! Harmonic relations by shared pitch classes

use serde::{Deserialize, Serialize};

use crate::chord::{build_chord, Chord, ChordQuality};
use crate::diatonic::diatonic_chords;
use crate::pitch::PitchClass;
use crate::scale::ScaleType;

/// Qualities enumerated when searching for related chords
pub const RELATED_QUALITIES: [ChordQuality; 3] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
];

/// Closeness of two chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HarmonicRelation {
    /// Two or more shared notes
    Close,
    /// Exactly one shared note
    Intermediate,
    /// Nothing in common
    Distant,
}

impl HarmonicRelation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Close => "Close",
            Self::Intermediate => "Intermediate",
            Self::Distant => "Distant",
        }
    }
}

/// A chord tagged with its relation to some reference chord
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedChord {
    #[serde(flatten)]
    pub chord: Chord,
    pub relation: HarmonicRelation,
}

/// Number of distinct pitch classes present in both sets
pub fn shared_notes(a: &[PitchClass], b: &[PitchClass]) -> usize {
    let mut seen = [false; 12];
    for pc in a {
        seen[pc.index() as usize] = true;
    }
    let mut count = 0;
    for pc in b {
        let slot = &mut seen[pc.index() as usize];
        if *slot {
            *slot = false;
            count += 1;
        }
    }
    count
}

/// Classify two note sets by how many pitch classes they share
pub fn classify(a: &[PitchClass], b: &[PitchClass]) -> HarmonicRelation {
    match shared_notes(a, b) {
        0 => HarmonicRelation::Distant,
        1 => HarmonicRelation::Intermediate,
        _ => HarmonicRelation::Close,
    }
}

/// Major, minor and diminished triads sharing at least one note with `current`
///
/// Results are ordered by root (C first), then by quality in
/// [`RELATED_QUALITIES`] order. `current` itself is never included.
pub fn related_chords(current: &Chord) -> Vec<RelatedChord> {
    PitchClass::ALL
        .into_iter()
        .flat_map(|root| RELATED_QUALITIES.into_iter().map(move |q| build_chord(root, q)))
        .filter(|candidate| candidate.name != current.name)
        .filter_map(|chord| match classify(&current.notes, &chord.notes) {
            HarmonicRelation::Distant => None,
            relation => Some(RelatedChord { chord, relation }),
        })
        .collect()
}

// ============================================================================
// Key marking
// ============================================================================

/// How a related chord reads against the current key and an optional
/// comparison key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMarking {
    /// Diatonic to the current key
    pub in_key: bool,
    /// Degree in the comparison key, when diatonic there
    pub comparison_degree: Option<String>,
}

/// Mark each of `related` against the key `root`/`scale`, and against
/// `comparison` when one is given. Output is aligned with `related`.
pub fn mark_related(
    related: &[RelatedChord],
    root: PitchClass,
    scale: ScaleType,
    comparison: Option<(PitchClass, ScaleType)>,
) -> Vec<KeyMarking> {
    let main = diatonic_chords(root, scale);
    let compared = comparison
        .map(|(root, scale)| diatonic_chords(root, scale))
        .unwrap_or_default();

    related
        .iter()
        .map(|r| KeyMarking {
            in_key: main.iter().any(|c| c.name == r.chord.name),
            comparison_degree: compared
                .iter()
                .find(|c| c.name == r.chord.name)
                .map(|c| c.degree.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use PitchClass as P;

    fn find<'a>(related: &'a [RelatedChord], name: &str) -> Option<&'a RelatedChord> {
        related.iter().find(|r| r.chord.name == name)
    }

    #[test]
    fn test_classify_thresholds() {
        let c = [P::C, P::E, P::G];
        assert_eq!(classify(&c, &[P::A, P::C, P::E]), HarmonicRelation::Close);
        assert_eq!(classify(&c, &[P::G, P::B, P::D]), HarmonicRelation::Intermediate);
        assert_eq!(classify(&c, &[P::C_SHARP, P::F, P::G_SHARP]), HarmonicRelation::Distant);
        assert_eq!(classify(&c, &c), HarmonicRelation::Close);
    }

    #[test]
    fn test_classify_ignores_multiplicity() {
        assert_eq!(shared_notes(&[P::C, P::C, P::E], &[P::C, P::C]), 1);
        assert_eq!(classify(&[P::C, P::C], &[P::C, P::G]), HarmonicRelation::Intermediate);
    }

    #[test]
    fn test_classify_is_symmetric() {
        let mut chords = Vec::new();
        for root in P::ALL {
            for quality in ChordQuality::ALL {
                chords.push(build_chord(root, quality));
            }
        }
        for a in &chords {
            for b in &chords {
                assert_eq!(classify(&a.notes, &b.notes), classify(&b.notes, &a.notes));
            }
        }
    }

    #[test]
    fn test_related_to_c_major() {
        let c = build_chord(P::C, ChordQuality::Major);
        let related = related_chords(&c);

        let am = find(&related, "Am").expect("Am should be related to C");
        assert_eq!(am.relation, HarmonicRelation::Close);
        assert_eq!(am.chord.degree, "");

        assert_eq!(find(&related, "G").map(|r| r.relation), Some(HarmonicRelation::Intermediate));
        assert!(find(&related, "C#").is_none());
        assert!(find(&related, "C").is_none());
        // Cm shares C and G
        assert_eq!(find(&related, "Cm").map(|r| r.relation), Some(HarmonicRelation::Close));
    }

    #[test]
    fn test_related_never_self_or_distant() {
        for root in P::ALL {
            for quality in ChordQuality::ALL {
                let chord = build_chord(root, quality);
                for r in related_chords(&chord) {
                    assert_ne!(r.chord.name, chord.name);
                    assert_ne!(r.relation, HarmonicRelation::Distant);
                    assert!(RELATED_QUALITIES.contains(&r.chord.quality));
                }
            }
        }
    }

    #[test]
    fn test_related_order_is_root_then_quality() {
        let c = build_chord(P::C, ChordQuality::Major);
        let related = related_chords(&c);
        let keys: Vec<(u8, usize)> = related
            .iter()
            .map(|r| {
                let root = r.chord.root().map(|pc| pc.index()).unwrap_or(12);
                let q = RELATED_QUALITIES.iter().position(|q| *q == r.chord.quality).unwrap_or(3);
                (root, q)
            })
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        let first: Vec<&str> = related.iter().take(3).map(|r| r.chord.name.as_str()).collect();
        assert_eq!(first, vec!["Cm", "C°", "C#m"]);
    }

    #[test]
    fn test_seventh_chord_center_keeps_triad_satellites() {
        let chords = diatonic_chords(P::A, ScaleType::HarmonicMinor);
        let e7 = &chords[4];
        let related = related_chords(e7);
        assert!(related.iter().all(|r| r.chord.quality != ChordQuality::Dominant7));
        assert_eq!(find(&related, "E").map(|r| r.relation), Some(HarmonicRelation::Close));
    }

    #[test]
    fn test_mark_related_in_key_and_comparison() {
        let c = build_chord(P::C, ChordQuality::Major);
        let related = related_chords(&c);
        let marks = mark_related(&related, P::C, ScaleType::Major, Some((P::G, ScaleType::Major)));
        assert_eq!(marks.len(), related.len());

        let mark = |name: &str| {
            let i = related.iter().position(|r| r.chord.name == name).unwrap();
            marks[i].clone()
        };
        assert_eq!(
            mark("Am"),
            KeyMarking { in_key: true, comparison_degree: Some("ii".into()) }
        );
        // F is in C major but not in G major
        assert_eq!(mark("F"), KeyMarking { in_key: true, comparison_degree: None });
        assert_eq!(mark("Cm"), KeyMarking::default());
        assert_eq!(mark("F#°").comparison_degree.as_deref(), Some("vii°"));
    }

    #[test]
    fn test_mark_related_without_comparison() {
        let am = build_chord(P::A, ChordQuality::Minor);
        let related = related_chords(&am);
        let marks = mark_related(&related, P::A, ScaleType::NaturalMinor, None);
        assert!(marks.iter().all(|m| m.comparison_degree.is_none()));
        let in_key: Vec<&str> = related
            .iter()
            .zip(&marks)
            .filter(|(_, m)| m.in_key)
            .map(|(r, _)| r.chord.name.as_str())
            .collect();
        assert_eq!(in_key, vec!["C", "Dm", "Em", "F"]);
    }
}
