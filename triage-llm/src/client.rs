//! Text generation client — the sole seam to the external model.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::LlmError;
use crate::types::{GenerationRequest, GenerationResponse};

/// Default Gemini REST endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Anything that can turn a prompt into completion text.
///
/// The game engine only ever sees this trait, so tests can script the
/// model's replies and the production binary can plug in [`GeminiClient`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one generation call.
    ///
    /// Returns `Err` if the service is unreachable, times out, or replies
    /// with a non-success status. Callers degrade to fallback content on
    /// error; nothing retries.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError>;
}

/// Client for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Point the client at a different endpoint root (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingCredential);
        }

        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = json!({
            "system_instruction": {
                "parts": [{ "text": request.system }]
            },
            "contents": [{
                "parts": [{ "text": request.prompt }]
            }],
            "generationConfig": {
                "temperature": request.temperature,
                "maxOutputTokens": request.max_tokens,
            }
        });

        let start = Instant::now();
        let result = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .timeout(Duration::from_millis(request.timeout_ms))
            .send()
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                if e.is_timeout() {
                    warn!("generation request timed out after {}ms", request.timeout_ms);
                    return Err(LlmError::Timeout(request.timeout_ms));
                }
                warn!("generation request failed: {e}");
                return Err(e.into());
            }
        };

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            warn!("generation service returned HTTP {status}: {detail}");
            return Err(LlmError::RequestFailed(format!("HTTP {status}: {detail}")));
        }

        let json: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;

        let text = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string();

        debug!(
            model = %request.model,
            latency_ms,
            chars = text.len(),
            "generation call completed"
        );

        Ok(GenerationResponse {
            text,
            latency_ms,
            model: request.model.clone(),
        })
    }
}
