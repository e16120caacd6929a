//! harmonai-services: Suggestion service and progression storage

pub mod storage;
pub mod suggestions;

pub use storage::{ProgressionStore, StorageError};
pub use suggestions::{
    parse_suggestions, OllamaSuggestions, Suggestion, SuggestionError, SuggestionRequest,
    SuggestionService, SUGGESTIONS_FAILED,
};
