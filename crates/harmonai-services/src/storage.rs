//! JSON file store for saved progressions

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use harmonai_core::ProgressionLibrary;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid progression file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Reads and writes a [`ProgressionLibrary`] as one JSON document
#[derive(Debug, Clone)]
pub struct ProgressionStore {
    path: PathBuf,
}

impl ProgressionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/harmonai/progressions.json`, or the working directory
    /// when the platform has no data dir
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("harmonai")
            .join("progressions.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the library; a missing file is an empty library
    pub fn load(&self) -> Result<ProgressionLibrary, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No progression file yet");
                return Ok(ProgressionLibrary::new());
            }
            Err(e) => return Err(e.into()),
        };

        let library: ProgressionLibrary =
            serde_json::from_str(&text).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = library.len(), "Progressions loaded");
        Ok(library)
    }

    pub fn save(&self, library: &ProgressionLibrary) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(library)?;
        fs::write(&self.path, text)?;
        info!(path = %self.path.display(), count = library.len(), "Progressions saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harmonai_core::{ExplorationPath, PitchClass, ScaleType};

    fn library() -> ProgressionLibrary {
        let mut path = ExplorationPath::new(PitchClass::D, ScaleType::Dorian);
        let chords = path.diatonic_chords();
        path.select_chord(chords[0].clone());
        path.select_chord(chords[3].clone());

        let mut library = ProgressionLibrary::new();
        library.save("1700000000000", "So What", 1_700_000_000, &path);
        library
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProgressionStore::new(dir.path().join("none.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested").join("progressions.json");
        let store = ProgressionStore::new(&file);
        assert_eq!(store.path(), file.as_path());
        let library = library();
        store.save(&library).unwrap();
        assert_eq!(store.load().unwrap(), library);
    }

    #[test]
    fn test_corrupt_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("progressions.json");
        fs::write(&file, "{ not json").unwrap();
        let err = ProgressionStore::new(&file).load().unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        assert!(err.to_string().contains("progressions.json"));
    }

    #[test]
    fn test_default_path_file_name() {
        let path = ProgressionStore::default_path();
        assert!(path.ends_with("harmonai/progressions.json"));
    }
}
