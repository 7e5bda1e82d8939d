//! Prompt templates for case generation and test evaluation.
//!
//! Compiled-in constants with `{key}` placeholders, rendered through
//! [`render_template`]. The templates are the structured-generation
//! contract: they pin the exact key set the engine expects back, and the
//! shared system instruction forbids markdown so the parser's fence
//! stripping is a safety net, not the happy path.

/// Shared system instruction for every generation call.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a Medical Simulation Engine. You must output ONLY valid JSON without markdown formatting.";

/// Template for generating a new case. Placeholder: `{difficulty}`.
pub const CASE_PROMPT: &str = r#"Generate a realistic medical case for a game. Difficulty: {difficulty}.
The case must be solvable but require deduction.

Output JSON strictly:
{
  "illness_name": "Exact medical name",
  "patient_intro": "2-3 sentences describing patient age, chief complaint, and initial vitals.",
  "correct_test": "The single most definitive test for this illness",
  "symptoms_hidden": "List of internal symptoms found only via tests",
  "explanation_correct": "Brief 1-2 sentence medical explanation of why the symptoms confirm this diagnosis.",
  "explanation_wrong": "Why other similar diagnoses are incorrect.",
  "initial_test_options": [
    "Test Option 1 (The Correct One)",
    "Test Option 2 (Plausible)",
    "Test Option 3 (Plausible)",
    "Test Option 4 (Distractor)",
    "Test Option 5 (Distractor)",
    "Test Option 6 (Distractor)"
  ],
  "diagnosis_list": [
    "Diagnosis 1 (The True Illness)",
    "Diagnosis 2 (Plausible)",
    "Diagnosis 3 (Plausible)",
    "Diagnosis 4 (Wrong)",
    "Diagnosis 5 (Wrong)",
    "Diagnosis 6 (Wrong)"
  ]
}"#;

/// Template for revealing a test outcome. Placeholders: `{illness_name}`,
/// `{symptoms_hidden}`, `{test_name}`, `{correct_test}`.
///
/// Whether the chosen test is "the correct one" is judged entirely by the
/// model from this context; the engine never compares test names itself.
pub const TEST_PROMPT: &str = r#"Patient has: {illness_name}.
Hidden symptoms: {symptoms_hidden}.
User performed test: {test_name}.
Correct diagnostic test is: {correct_test}.

Output JSON strictly:
{
  "narrative": "What does the doctor see? If it's the correct test, reveal the specific hidden symptom. If it's a distractor, show normal or inconclusive results. Keep it clinical."
}"#;

/// Simple template interpolation.
///
/// Replaces `{key}` with the corresponding value. Unknown placeholders are
/// left in place.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}
