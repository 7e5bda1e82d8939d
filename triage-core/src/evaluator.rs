//! Test evaluation — the model narrates what a chosen test reveals.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;
use triage_llm::parse::{extract_json, fallback_payload, FALLBACK_TEST_NARRATIVE};
use triage_llm::prompt::{render_template, SYSTEM_INSTRUCTION, TEST_PROMPT};
use triage_llm::{GenerationRequest, TextGenerator};

use crate::case::Case;
use crate::config::GameConfig;

/// Builds the test-outcome prompt and extracts the narrative reply.
///
/// The player's chosen test name is free-form and is never compared to the
/// case's correct test in Rust; the prompt hands both to the model and the
/// model decides whether to reveal the hidden symptom or report a normal
/// result.
pub struct TestEvaluator {
    llm: Arc<dyn TextGenerator>,
    config: GameConfig,
}

impl TestEvaluator {
    /// Create an evaluator over the given client.
    #[must_use]
    pub fn new(llm: Arc<dyn TextGenerator>, config: GameConfig) -> Self {
        Self { llm, config }
    }

    /// Narrate the outcome of running `test_name` against the hidden case.
    ///
    /// On generation or parse failure the fixed fallback narrative is
    /// returned verbatim; this never fails the request.
    pub async fn narrate(&self, case: &Case, test_name: &str) -> String {
        let prompt = render_template(
            TEST_PROMPT,
            &[
                ("illness_name", case.illness_name.as_str()),
                ("symptoms_hidden", case.symptoms_hidden.as_text().as_str()),
                ("test_name", test_name),
                ("correct_test", case.correct_test.as_str()),
            ],
        );
        let request = GenerationRequest::new(SYSTEM_INSTRUCTION, prompt, &self.config.model)
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens)
            .with_timeout(self.config.request_timeout_ms);

        let payload = match self.llm.generate(&request).await {
            Ok(resp) => extract_json(&resp.text),
            Err(e) => {
                warn!("test evaluation call failed, using fallback narrative: {e}");
                fallback_payload()
            }
        };

        payload
            .get("narrative")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_TEST_NARRATIVE)
            .to_string()
    }
}
