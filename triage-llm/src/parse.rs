//! Structured response parsing — untrusted completion text in, JSON object out.
//!
//! Models asked for "strict JSON" still wrap their output in markdown fences,
//! prepend chatter, or emit outright garbage. This module owns the entire
//! coercion: strip fencing, parse strictly, and on any failure substitute a
//! fixed degraded payload instead of surfacing an error. A malformed
//! completion must never kill a session.

use serde_json::{Map, Value};
use tracing::warn;

/// Degraded narrative used when generation or parsing fails.
pub const FALLBACK_NARRATIVE: &str = "SYSTEM ERROR: DATABANK CORRUPTED. (AI Generation Failed)";

/// Degraded test-result narrative for the same condition.
pub const FALLBACK_TEST_NARRATIVE: &str = "Inconclusive result due to signal interference.";

/// Extract a JSON object from raw completion text.
///
/// Markdown code fences (with an optional language tag) are stripped
/// wherever they appear, then the remainder is parsed strictly. On success
/// the object is returned unchanged — no schema validation happens here.
/// On failure (non-JSON, or JSON that is not an object) the failure is
/// logged and [`fallback_payload`] is returned instead.
#[must_use]
pub fn extract_json(raw: &str) -> Map<String, Value> {
    let cleaned = strip_fences(raw);
    let cleaned = cleaned.trim();

    match serde_json::from_str::<Value>(cleaned) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!("completion parsed as JSON but not an object: {other}");
            fallback_payload()
        }
        Err(e) => {
            warn!("completion is not valid JSON ({e}); raw text: {raw:?}");
            fallback_payload()
        }
    }
}

/// The fixed payload substituted when a completion cannot be parsed.
///
/// Guarantees exactly four fields so downstream field lookups always find
/// something: a failure narrative, an inconclusive test narrative, and
/// empty option lists.
#[must_use]
pub fn fallback_payload() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("narrative".into(), Value::String(FALLBACK_NARRATIVE.into()));
    map.insert(
        "test_narrative".into(),
        Value::String(FALLBACK_TEST_NARRATIVE.into()),
    );
    map.insert("diagnosis_list".into(), Value::Array(vec![]));
    map.insert("initial_test_options".into(), Value::Array(vec![]));
    map
}

/// Remove every ``` fence marker, along with a language tag glued to it.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        let tag_len: usize = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .map(char::len_utf8)
            .sum();
        rest = &rest[tag_len..];
    }
    out.push_str(rest);
    out
}
