//! The hidden ground-truth medical scenario for one session.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use triage_llm::parse::FALLBACK_NARRATIVE;

/// Sentinel illness name when generation supplied none.
const UNKNOWN_ILLNESS: &str = "Unknown Illness";
/// Sentinel test name when generation supplied none.
const UNKNOWN_TEST: &str = "Unknown Test";
/// Sentinel for missing narrative/explanation fields.
const NO_DATA: &str = "No data on record.";

/// Hidden symptoms as the model emits them: a single blob or a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HiddenSymptoms {
    /// One free-form description.
    One(String),
    /// Several discrete findings.
    Many(Vec<String>),
}

impl HiddenSymptoms {
    /// Render to a single text blob for prompt interpolation.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::One(text) => text.clone(),
            Self::Many(items) => items.join("; "),
        }
    }
}

/// The immutable case a session is played against.
///
/// Construction is deliberately lenient: the payload comes straight from
/// the structured-response parser and may be the degraded fallback, carry
/// extra keys, or miss keys entirely. Missing fields become sentinels so a
/// `Case` is always structurally complete; list lengths and ordering are
/// never validated (the prompt asks for six options with the correct one
/// first, but nothing enforces that the model complied).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Exact medical name of the illness.
    pub illness_name: String,
    /// Opening description shown to the player.
    pub patient_intro: String,
    /// The single definitive test for this illness.
    pub correct_test: String,
    /// Internal symptoms found only via tests.
    pub symptoms_hidden: HiddenSymptoms,
    /// Why the symptoms confirm the diagnosis (shown on win and loss).
    pub explanation_correct: String,
    /// Why similar diagnoses are incorrect.
    pub explanation_wrong: String,
    /// Test menu offered to the player, ideally six entries.
    pub initial_test_options: Vec<String>,
    /// Diagnosis menu offered to the player, ideally six entries.
    pub diagnosis_list: Vec<String>,
}

impl Case {
    /// Build a case from a parsed generation payload.
    #[must_use]
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            illness_name: str_field(payload, "illness_name", UNKNOWN_ILLNESS),
            // The fallback payload carries its failure notice under
            // "narrative"; surface it as the intro so the player sees
            // something rather than an empty screen.
            patient_intro: payload
                .get("patient_intro")
                .and_then(Value::as_str)
                .or_else(|| payload.get("narrative").and_then(Value::as_str))
                .unwrap_or(FALLBACK_NARRATIVE)
                .to_string(),
            correct_test: str_field(payload, "correct_test", UNKNOWN_TEST),
            symptoms_hidden: payload
                .get("symptoms_hidden")
                .cloned()
                .and_then(|v| serde_json::from_value(v).ok())
                .unwrap_or_else(|| HiddenSymptoms::One(NO_DATA.to_string())),
            explanation_correct: str_field(payload, "explanation_correct", NO_DATA),
            explanation_wrong: str_field(payload, "explanation_wrong", NO_DATA),
            initial_test_options: list_field(payload, "initial_test_options"),
            diagnosis_list: list_field(payload, "diagnosis_list"),
        }
    }

    /// The case produced by a failed generation: sentinels and empty menus.
    #[must_use]
    pub fn degraded() -> Self {
        Self::from_payload(&triage_llm::parse::fallback_payload())
    }
}

fn str_field(payload: &Map<String, Value>, key: &str, default: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn list_field(payload: &Map<String, Value>, key: &str) -> Vec<String> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
