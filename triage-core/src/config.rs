//! Game configuration, loadable from TOML with env overrides.

use serde::{Deserialize, Serialize};

/// Engine-wide tunables.
///
/// Every field has a default, so an empty TOML document (or no file at
/// all) yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Model identifier sent with every generation call.
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature for generation calls.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output token budget per generation call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Timeout per generation call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Health points lost on a wrong diagnosis.
    #[serde(default = "default_penalty")]
    pub wrong_diagnosis_penalty: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_ms: default_timeout_ms(),
            wrong_diagnosis_penalty: default_penalty(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `CoreError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::CoreError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Apply environment overrides (`GEMINI_MODEL`).
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.trim().is_empty() {
                self.model = model;
            }
        }
        self
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_penalty() -> i32 {
    20
}
