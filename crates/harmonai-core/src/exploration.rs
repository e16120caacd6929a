//! Exploration history: the chords visited while browsing a key

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::diatonic::diatonic_chords;
use crate::modulation::{modulation_targets, pivot_chord, ModulationTarget};
use crate::pitch::PitchClass;
use crate::progression::SavedProgression;
use crate::relation::{related_chords, RelatedChord};
use crate::scale::ScaleType;

/// A focused chord together with everything reachable from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationStep {
    pub center_chord: Chord,
    pub related_chords: Vec<RelatedChord>,
    pub modulation_targets: Vec<ModulationTarget>,
}

impl ExplorationStep {
    /// Expand `chord` as seen from the key `root`/`scale`
    pub fn new(chord: Chord, root: PitchClass, scale: ScaleType) -> Self {
        Self {
            related_chords: related_chords(&chord),
            modulation_targets: modulation_targets(&chord, root, scale),
            center_chord: chord,
        }
    }
}

/// Ordered history of exploration steps in the current key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationPath {
    /// Root of the current key
    pub root: PitchClass,
    /// Scale of the current key
    pub scale: ScaleType,
    steps: Vec<ExplorationStep>,
}

impl Default for ExplorationPath {
    fn default() -> Self {
        Self {
            root: PitchClass::C,
            scale: ScaleType::Major,
            steps: Vec::new(),
        }
    }
}

impl ExplorationPath {
    pub fn new(root: PitchClass, scale: ScaleType) -> Self {
        Self {
            root,
            scale,
            steps: Vec::new(),
        }
    }

    /// Rebuild the steps of a saved progression in its own key
    pub fn from_progression(progression: &SavedProgression) -> Self {
        let mut path = Self::new(progression.root, progression.scale);
        for chord in &progression.chords {
            path.select_chord(chord.clone());
        }
        path
    }

    /// Diatonic chords of the current key
    pub fn diatonic_chords(&self) -> Vec<Chord> {
        diatonic_chords(self.root, self.scale)
    }

    /// Change key without touching the history
    pub fn set_key(&mut self, root: PitchClass, scale: ScaleType) {
        self.root = root;
        self.scale = scale;
    }

    /// Focus `chord` and append the resulting step
    pub fn select_chord(&mut self, chord: Chord) -> &ExplorationStep {
        let step = ExplorationStep::new(chord, self.root, self.scale);
        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    /// Switch to `root`/`scale`, carrying the current chord over as the pivot
    ///
    /// Returns `None` and leaves the key alone when nothing is focused.
    pub fn modulate(&mut self, root: PitchClass, scale: ScaleType) -> Option<&ExplorationStep> {
        let pivot = self.current_chord()?;
        let chord = pivot_chord(pivot, root, scale);
        self.set_key(root, scale);
        Some(self.select_chord(chord))
    }

    /// Drop every step after `index`
    pub fn go_back(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.truncate(index + 1);
        }
    }

    /// Clear the history, keeping the key
    pub fn reset(&mut self) {
        self.steps.clear();
    }

    pub fn steps(&self) -> &[ExplorationStep] {
        &self.steps
    }

    pub fn current(&self) -> Option<&ExplorationStep> {
        self.steps.last()
    }

    pub fn current_chord(&self) -> Option<&Chord> {
        self.current().map(|step| &step.center_chord)
    }

    /// Focused chord of every step, oldest first
    pub fn center_chords(&self) -> Vec<Chord> {
        self.steps.iter().map(|step| step.center_chord.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
