//! End-to-end walks through the public API

use harmonai_core::{
    build_chord, diatonic_chords, modulation_targets, order_by_fifths, related_chords,
    scale_notes, ChordQuality, ExplorationPath, HarmonicRelation, PitchClass, ProgressionLibrary,
    ScaleType,
};

#[test]
fn test_every_key_is_consistent() {
    for root in PitchClass::ALL {
        for scale in ScaleType::ALL {
            let notes = scale_notes(root, scale);
            let chords = diatonic_chords(root, scale);
            assert_eq!(notes.len(), chords.len());

            let ordered = order_by_fifths(&chords);
            assert_eq!(ordered.len(), chords.len());
            if chords.len() < 7 {
                assert_eq!(ordered, chords);
            }

            for chord in &chords {
                let related = related_chords(chord);
                assert!(related.iter().all(|r| r.chord.name != chord.name));
                assert!(related.iter().all(|r| r.relation != HarmonicRelation::Distant));

                let targets = modulation_targets(chord, root, scale);
                if !chord.quality.is_pivotable() {
                    assert!(targets.is_empty());
                }
                for target in &targets {
                    assert!(!(target.root == root && target.scale == scale));
                    assert!(diatonic_chords(target.root, target.scale)
                        .iter()
                        .any(|c| c.name == chord.name));
                }
            }
        }
    }
}

#[test]
fn test_g_pivots_from_c_major() {
    let g = build_chord(PitchClass::G, ChordQuality::Major);
    let targets = modulation_targets(&g, PitchClass::C, ScaleType::Major);

    let find = |root: PitchClass, scale: ScaleType| targets.iter().find(|t| t.root == root && t.scale == scale);
    assert!(find(PitchClass::G, ScaleType::Major).is_some());
    assert_eq!(
        find(PitchClass::D, ScaleType::Major).map(|t| t.label.as_str()),
        Some("D Major (as IV)")
    );
    assert!(find(PitchClass::C, ScaleType::Major).is_none());
}

#[test]
fn test_explore_modulate_and_save() {
    let mut path = ExplorationPath::new(PitchClass::C, ScaleType::Major);
    let chords = path.diatonic_chords();
    path.select_chord(chords[0].clone());
    path.select_chord(chords[4].clone());

    let target = path
        .current()
        .and_then(|step| step.modulation_targets.iter().find(|t| t.root == PitchClass::G))
        .cloned()
        .expect("G major is reachable from G");
    let step = path.modulate(target.root, target.scale).expect("focused chord");
    assert_eq!(step.center_chord.degree, "I");

    let mut library = ProgressionLibrary::new();
    let saved = library.save("1", "To G", 0, &path).expect("saved");
    assert_eq!(saved.summary(), "C → G → G");
    assert_eq!(saved.root, PitchClass::G);
}
