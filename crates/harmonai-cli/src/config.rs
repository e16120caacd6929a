use std::path::{Path, PathBuf};
use std::time::Duration;

use harmonai_core::{PitchClass, ScaleType};
use tracing::warn;

/// Overrides `suggestions.url` when set
pub(crate) const OLLAMA_URL_ENV: &str = "HARMONAI_OLLAMA_URL";

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct AppConfig {
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Key used when a command is not given one
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub(crate) struct KeyConfig {
    pub root: PitchClass,
    pub scale: ScaleType,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            root: PitchClass::C,
            scale: ScaleType::Major,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub(crate) struct SuggestionsConfig {
    /// Ollama base URL
    pub url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 60,
        }
    }
}

impl SuggestionsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub(crate) struct StorageConfig {
    /// Progression file; the platform data dir when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    pub fn apply_ollama_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            self.suggestions.url = url;
        }
    }
}

pub(crate) fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("harmonai")
        .join("config.toml")
}

/// Missing or unreadable config falls back to defaults
pub(crate) fn load_config(path: &Path) -> AppConfig {
    let Ok(text) = std::fs::read_to_string(path) else {
        return AppConfig::default();
    };
    toml::from_str(&text).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Ignoring invalid config");
        AppConfig::default()
    })
}

pub(crate) fn save_config(path: &Path, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}
