//! End-to-end engine tests against a scripted model.
//!
//! Every test drives the public engine API with a mock [`TextGenerator`]
//! so the full generate → parse → state-transition path runs without a
//! network.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use triage_core::{CoreError, DiagnosisOutcome, GameConfig, GameEngine, GameStatus, SessionId};
use triage_llm::{GenerationRequest, GenerationResponse, LlmError, TextGenerator};

/// Plays back a fixed sequence of completions, then empty strings.
struct ScriptedModel {
    replies: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn new(replies: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.iter().map(ToString::to_string).collect()),
        })
    }
}

#[async_trait]
impl TextGenerator for ScriptedModel {
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        let mut replies = self.replies.lock();
        let text = if replies.is_empty() {
            String::new()
        } else {
            replies.remove(0)
        };
        Ok(GenerationResponse {
            text,
            latency_ms: 1,
            model: request.model.clone(),
        })
    }
}

/// Always fails, simulating an unreachable or timed-out service.
struct DeadModel;

#[async_trait]
impl TextGenerator for DeadModel {
    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResponse, LlmError> {
        Err(LlmError::Timeout(30_000))
    }
}

fn case_completion() -> &'static str {
    r#"{
        "illness_name": "Bird Flu",
        "patient_intro": "A 42-year-old poultry farmer presents with fever and cough.",
        "correct_test": "H5N1 PCR Panel",
        "symptoms_hidden": "Viral RNA detectable in respiratory secretions",
        "explanation_correct": "PCR confirms avian influenza A infection.",
        "explanation_wrong": "Seasonal flu panels would miss the H5N1 strain.",
        "initial_test_options": ["H5N1 PCR Panel", "Chest X-Ray", "CBC", "Blood Culture", "Urinalysis", "ECG"],
        "diagnosis_list": ["Bird Flu", "Seasonal Influenza", "Pneumonia", "COVID-19", "Tuberculosis", "Common Cold"]
    }"#
}

fn engine_with(replies: &[&str]) -> GameEngine {
    GameEngine::new(ScriptedModel::new(replies), GameConfig::default())
}

#[tokio::test]
async fn unknown_difficulty_defaults_to_most_lenient_tier() {
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("nightmare-fuel").await;
    assert_eq!(started.hp, 100);
    assert_eq!(started.max_hp, 100);
}

#[tokio::test]
async fn known_tiers_map_to_their_health_values() {
    for (label, hp) in [("easy", 100), ("medium", 60), ("hard", 20)] {
        let engine = engine_with(&[case_completion()]);
        let started = engine.start(label).await;
        assert_eq!(started.hp, hp, "tier {label}");
    }
}

#[tokio::test]
async fn start_returns_intro_and_test_menu() {
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("easy").await;
    assert!(started.patient_intro.contains("poultry farmer"));
    assert_eq!(started.test_options.len(), 6);
    assert_eq!(started.test_options[0], "H5N1 PCR Panel");
}

#[tokio::test]
async fn fenced_case_completion_parses_the_same() {
    let fenced = format!("```json\n{}\n```", case_completion());
    let engine = engine_with(&[fenced.as_str()]);
    let started = engine.start("easy").await;
    assert!(started.patient_intro.contains("poultry farmer"));
    assert_eq!(started.test_options.len(), 6);
}

#[tokio::test]
async fn dead_model_still_starts_a_playable_session() {
    let engine = GameEngine::new(Arc::new(DeadModel), GameConfig::default());
    let started = engine.start("easy").await;
    assert!(started.patient_intro.contains("SYSTEM ERROR"));
    assert!(started.test_options.is_empty());
    assert_eq!(started.hp, 100);

    // The degraded session is still fully operable.
    let outcome = engine
        .submit_diagnosis(started.session_id, "anything-but-the-answer-xyz")
        .await
        .expect("session exists");
    assert!(matches!(outcome, DiagnosisOutcome::Continue { hp: 80, .. }));
}

#[tokio::test]
async fn submit_test_narrates_without_touching_state() {
    let engine = engine_with(&[
        case_completion(),
        r#"{"narrative": "The PCR panel lights up positive for H5N1."}"#,
        r#"{"narrative": "The PCR panel lights up positive for H5N1."}"#,
    ]);
    let started = engine.start("medium").await;

    let outcome = engine
        .submit_test(started.session_id, "H5N1 PCR Panel")
        .await
        .expect("session exists");
    assert!(outcome.narrative.contains("positive for H5N1"));
    assert_eq!(outcome.diagnosis_options.len(), 6);

    // Repeating the same test is allowed and still free.
    engine
        .submit_test(started.session_id, "H5N1 PCR Panel")
        .await
        .expect("session exists");

    let session = engine.store().get(started.session_id).expect("stored");
    assert_eq!(session.hp, 60);
    assert_eq!(session.status, GameStatus::Playing);
    assert_eq!(session.log.len(), 4, "two action/narrative pairs");
}

#[tokio::test]
async fn garbage_test_completion_degrades_to_fallback_narrative() {
    let engine = engine_with(&[case_completion(), "sorry, no JSON today"]);
    let started = engine.start("easy").await;
    let outcome = engine
        .submit_test(started.session_id, "CBC")
        .await
        .expect("session exists");
    assert!(outcome.narrative.contains("SYSTEM ERROR"));
}

#[tokio::test]
async fn correct_diagnosis_wins_without_health_change() {
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("easy").await;

    let outcome = engine
        .submit_diagnosis(started.session_id, "bird flu")
        .await
        .expect("session exists");
    match outcome {
        DiagnosisOutcome::Win { message, analysis } => {
            assert_eq!(message, "CORRECT DIAGNOSIS: Bird Flu");
            assert!(analysis.contains("PCR confirms"));
        }
        other => panic!("expected win, got {other:?}"),
    }

    let session = engine.store().get(started.session_id).expect("stored");
    assert_eq!(session.status, GameStatus::Won);
    assert_eq!(session.hp, 100);
}

#[tokio::test]
async fn fuzzy_match_accepts_padded_submission() {
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("easy").await;
    let outcome = engine
        .submit_diagnosis(started.session_id, "Avian Bird Flu Variant")
        .await
        .expect("session exists");
    assert!(matches!(outcome, DiagnosisOutcome::Win { .. }));
}

#[tokio::test]
async fn wrong_diagnoses_walk_health_down_to_a_loss() {
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("easy").await;
    let id = started.session_id;

    for expected_hp in [80, 60, 40, 20] {
        let outcome = engine
            .submit_diagnosis(id, "Malaria")
            .await
            .expect("session exists");
        match outcome {
            DiagnosisOutcome::Continue {
                hp,
                message,
                test_options,
                ..
            } => {
                assert_eq!(hp, expected_hp);
                assert!(message.contains("INCORRECT"));
                assert_eq!(test_options.len(), 6, "test menu offered again");
            }
            other => panic!("expected continue at hp {expected_hp}, got {other:?}"),
        }
        let session = engine.store().get(id).expect("stored");
        assert_eq!(session.status, GameStatus::Playing);
    }

    // Fifth wrong diagnosis drops the patient to zero.
    let outcome = engine
        .submit_diagnosis(id, "Malaria")
        .await
        .expect("session exists");
    match outcome {
        DiagnosisOutcome::Lose { message, analysis } => {
            assert_eq!(message, "PATIENT DECEASED.");
            assert!(analysis.contains("Bird Flu"));
            assert!(analysis.contains("H5N1 PCR Panel"));
        }
        other => panic!("expected lose, got {other:?}"),
    }
    let session = engine.store().get(id).expect("stored");
    assert_eq!(session.status, GameStatus::Lost);
    assert_eq!(session.hp, 0);
}

#[tokio::test]
async fn hard_tier_loses_on_the_first_wrong_diagnosis() {
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("hard").await;
    assert_eq!(started.max_hp, 20);

    let outcome = engine
        .submit_diagnosis(started.session_id, "Pneumonia")
        .await
        .expect("session exists");
    match outcome {
        DiagnosisOutcome::Lose { analysis, .. } => {
            assert!(analysis.contains("Bird Flu"));
            assert!(analysis.contains("H5N1 PCR Panel"));
            assert!(analysis.contains("PCR confirms"));
        }
        other => panic!("expected lose, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_session_is_a_not_found_error() {
    let engine = engine_with(&[]);
    let id = SessionId::new();

    let err = engine
        .submit_test(id, "CBC")
        .await
        .expect_err("no such session");
    assert!(matches!(err, CoreError::SessionNotFound(_)));

    let err = engine
        .submit_diagnosis(id, "Bird Flu")
        .await
        .expect_err("no such session");
    assert!(matches!(err, CoreError::SessionNotFound(_)));
}

#[tokio::test]
async fn finished_sessions_still_accept_submissions() {
    // No terminal-state guard: a post-win submission re-evaluates and can
    // keep moving health and status.
    let engine = engine_with(&[case_completion()]);
    let started = engine.start("easy").await;
    let id = started.session_id;

    engine
        .submit_diagnosis(id, "Bird Flu")
        .await
        .expect("session exists");
    assert_eq!(engine.store().get(id).expect("stored").status, GameStatus::Won);

    let outcome = engine
        .submit_diagnosis(id, "Malaria")
        .await
        .expect("session exists");
    assert!(matches!(outcome, DiagnosisOutcome::Continue { hp: 80, .. }));
    let session = engine.store().get(id).expect("stored");
    assert_eq!(session.status, GameStatus::Playing);
    assert_eq!(session.hp, 80);
}
