//! Error types for harmonai

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarmonyError {
    #[error("Unknown note: {0}")]
    UnknownNote(String),
    #[error("Unknown scale: {0}")]
    UnknownScale(String),
    #[error("Unknown chord: {0}")]
    UnknownChord(String),
}

pub type Result<T> = std::result::Result<T, HarmonyError>;
