//! Request and response types for text generation.

use serde::{Deserialize, Serialize};

/// A single generation call: system instruction plus user prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// System instruction (engine persona, output-format rules).
    pub system: String,
    /// User prompt (the actual task).
    pub prompt: String,
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Sampling temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl GenerationRequest {
    /// Create a request with the default sampling settings.
    #[must_use]
    pub fn new(
        system: impl Into<String>,
        prompt: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            system: system.into(),
            prompt: prompt.into(),
            model: model.into(),
            temperature: 0.7,
            max_tokens: 1024,
            timeout_ms: 30_000,
        }
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the output token budget.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// Raw text returned by the generation service.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    /// The generated completion text, exactly as the model emitted it.
    pub text: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
    /// Which model produced the text.
    pub model: String,
}
