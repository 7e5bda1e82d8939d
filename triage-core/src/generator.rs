//! Case generation — one prompt, one call, one lenient parse.

use std::sync::Arc;

use tracing::warn;
use triage_llm::parse::{extract_json, fallback_payload};
use triage_llm::prompt::{render_template, CASE_PROMPT, SYSTEM_INSTRUCTION};
use triage_llm::{GenerationRequest, TextGenerator};

use crate::case::Case;
use crate::config::GameConfig;

/// Builds the case-generation prompt and turns the model's reply into a
/// [`Case`].
///
/// This never fails: a transport error is treated exactly like a parse
/// failure and yields the degraded case, so starting a session always
/// succeeds.
pub struct CaseGenerator {
    llm: Arc<dyn TextGenerator>,
    config: GameConfig,
}

impl CaseGenerator {
    /// Create a generator over the given client.
    #[must_use]
    pub fn new(llm: Arc<dyn TextGenerator>, config: GameConfig) -> Self {
        Self { llm, config }
    }

    /// Generate a case for the given difficulty label.
    ///
    /// The label is interpolated into the prompt as-is; it is not checked
    /// against the tier set (the tier lookup happens in the engine and
    /// tolerates anything).
    pub async fn generate(&self, difficulty_label: &str) -> Case {
        let prompt = render_template(CASE_PROMPT, &[("difficulty", difficulty_label)]);
        let request = GenerationRequest::new(SYSTEM_INSTRUCTION, prompt, &self.config.model)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
            .with_timeout(self.config.request_timeout_ms);

        let payload = match self.llm.generate(&request).await {
            Ok(resp) => extract_json(&resp.text),
            Err(e) => {
                warn!("case generation call failed, using fallback content: {e}");
                fallback_payload()
            }
        };

        Case::from_payload(&payload)
    }
}
