//! Chord progression suggestions from a local LLM (Ollama)

use std::time::Duration;

use harmonai_core::{PitchClass, ScaleType};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Shown to the user whenever a suggestion request fails, whatever the cause
pub const SUGGESTIONS_FAILED: &str =
    "Failed to get suggestions. The model may have returned an invalid response. Please try again.";

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SuggestionError {
    pub fn user_message(&self) -> &'static str {
        SUGGESTIONS_FAILED
    }
}

/// One suggested progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// e.g. "Am - D7 - Gmaj7 - Cmaj7"
    pub sequence: String,
    pub explanation: String,
}

/// What the model is asked about: a key and the chord in focus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub root: PitchClass,
    pub scale: ScaleType,
    pub chord: String,
}

impl SuggestionRequest {
    pub fn new(root: PitchClass, scale: ScaleType, chord: impl Into<String>) -> Self {
        Self {
            root,
            scale,
            chord: chord.into(),
        }
    }

    pub fn prompt(&self) -> String {
        let key = format!("{} {}", self.root, self.scale.label());
        let chord = &self.chord;
        format!(
            "You are an expert music theorist. I am composing in the key of {key}. \
             I'm currently on the {chord} chord.\n\n\
             Suggest three creative and musically interesting chord progressions starting \
             from {chord}. They may modulate or simply add harmonic color.\n\n\
             For each progression give:\n\
             1. \"sequence\": the chords as a string, e.g. \"Am - D7 - Gmaj7 - Cmaj7\".\n\
             2. \"explanation\": a short note on its harmonic function and why it works.\n\n\
             Answer with a JSON object of the form \
             {{\"progressions\": [{{\"sequence\": \"...\", \"explanation\": \"...\"}}]}}."
        )
    }
}

/// Anything that can turn a request into suggestions
///
/// Calls are blocking: one request, one answer or one error.
pub trait SuggestionService {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>, SuggestionError>;
}

#[derive(Deserialize)]
struct ProgressionsPayload {
    progressions: Vec<Suggestion>,
}

/// Parse the model's JSON answer, tolerating a surrounding code fence
pub fn parse_suggestions(text: &str) -> Result<Vec<Suggestion>, SuggestionError> {
    let payload: ProgressionsPayload = serde_json::from_str(strip_code_fence(text))?;
    Ok(payload.progressions)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

// ============================================================================
// Ollama
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Suggestion service backed by Ollama's `/api/generate`
pub struct OllamaSuggestions {
    agent: ureq::Agent,
    base_url: String,
    model: String,
}

impl OllamaSuggestions {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

impl SuggestionService for OllamaSuggestions {
    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<Suggestion>, SuggestionError> {
        let prompt = request.prompt();
        info!(
            chord = %request.chord,
            root = %request.root,
            scale = %request.scale,
            model = %self.model,
            "Requesting suggestions"
        );

        let body = GenerateRequest {
            model: &self.model,
            prompt: &prompt,
            stream: false,
            format: "json",
        };
        let response = self
            .agent
            .post(&self.endpoint())
            .send_json(&body)
            .map_err(|e| match e {
                ureq::Error::Status(status, response) => SuggestionError::Status {
                    status,
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => SuggestionError::Request(transport.to_string()),
            })?;

        let generated: GenerateResponse = response
            .into_json()
            .map_err(|e| SuggestionError::Malformed(e.to_string()))?;
        debug!(bytes = generated.response.len(), "Model responded");

        let suggestions = parse_suggestions(&generated.response)
            .inspect_err(|e| warn!(error = %e, "Could not parse model output"))?;
        info!(count = suggestions.len(), "Suggestions received");
        Ok(suggestions)
    }
}
