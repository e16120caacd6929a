//! Saved progressions

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::exploration::ExplorationPath;
use crate::pitch::PitchClass;
use crate::scale::ScaleType;

/// The chords of an exploration path, stored with the key they started in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgression {
    pub id: String,
    pub name: String,
    /// Unix timestamp (seconds)
    pub created_at: u64,
    pub chords: Vec<Chord>,
    pub root: PitchClass,
    pub scale: ScaleType,
}

impl SavedProgression {
    /// Name offered when the user does not pick one
    pub fn default_name(root: PitchClass, scale: ScaleType) -> String {
        format!("{root} {scale} Progression")
    }

    /// Chord names joined with arrows, e.g. `C → Am → G`
    pub fn summary(&self) -> String {
        self.chords
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// All saved progressions, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionLibrary {
    #[serde(default)]
    pub progressions: Vec<SavedProgression>,
}

impl ProgressionLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the center chords of `path` in its current key
    ///
    /// Paths without steps are not saved.
    pub fn save(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        created_at: u64,
        path: &ExplorationPath,
    ) -> Option<&SavedProgression> {
        if path.is_empty() {
            return None;
        }

        self.progressions.push(SavedProgression {
            id: id.into(),
            name: name.into(),
            created_at,
            chords: path.center_chords(),
            root: path.root,
            scale: path.scale,
        });
        self.progressions.last()
    }

    pub fn get(&self, id: &str) -> Option<&SavedProgression> {
        self.progressions.iter().find(|p| p.id == id)
    }

    /// Remove by id
    pub fn remove(&mut self, id: &str) -> Option<SavedProgression> {
        let idx = self.progressions.iter().position(|p| p.id == id)?;
        Some(self.progressions.remove(idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedProgression> {
        self.progressions.iter()
    }

    pub fn len(&self) -> usize {
        self.progressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.progressions.is_empty()
    }
}
