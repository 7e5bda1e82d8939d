//! The game engine — session lifecycle and the diagnosis state machine.
//!
//! State machine: `Playing → Won` on a correct diagnosis, `Playing → Lost`
//! when health reaches zero, `Playing → Playing` on a wrong diagnosis with
//! health remaining. Ordering tests never changes state beyond the log.

use std::sync::Arc;

use tracing::info;
use triage_llm::TextGenerator;

use crate::config::GameConfig;
use crate::error::Result;
use crate::evaluator::TestEvaluator;
use crate::generator::CaseGenerator;
use crate::session::{Difficulty, GameStatus, LogEntry, LogKind, Session, SessionId};
use crate::store::SessionStore;

/// Message accompanying a loss.
const LOSE_MESSAGE: &str = "PATIENT DECEASED.";
/// Message accompanying a wrong diagnosis with health remaining.
const CONTINUE_MESSAGE: &str = "INCORRECT DIAGNOSIS. Patient condition worsening.";
/// Generic analysis for a wrong diagnosis with health remaining.
const CONTINUE_ANALYSIS: &str =
    "That diagnosis does not match the clinical findings. Try a different test.";

/// Everything a new session's caller needs to render the first screen.
#[derive(Debug, Clone)]
pub struct StartedGame {
    /// Identifier for all subsequent submissions.
    pub session_id: SessionId,
    /// Opening patient description.
    pub patient_intro: String,
    /// Test menu (possibly empty if generation degraded).
    pub test_options: Vec<String>,
    /// Current health points.
    pub hp: i32,
    /// Maximum health points for this tier.
    pub max_hp: i32,
}

/// Result of ordering a diagnostic test.
#[derive(Debug, Clone)]
pub struct TestOutcome {
    /// The model's narration of what the test shows.
    pub narrative: String,
    /// Diagnosis menu for when the player is ready to commit.
    pub diagnosis_options: Vec<String>,
}

/// Result of submitting a diagnosis.
#[derive(Debug, Clone)]
pub enum DiagnosisOutcome {
    /// Correct diagnosis; the session is won.
    Win {
        /// Announcement naming the illness.
        message: String,
        /// The case's pre-authored correct explanation.
        analysis: String,
    },
    /// Health exhausted; the session is lost.
    Lose {
        /// Loss announcement.
        message: String,
        /// Composed reveal: illness, required test, and explanation.
        analysis: String,
    },
    /// Wrong diagnosis, health remaining; the session continues.
    Continue {
        /// Health remaining after the penalty.
        hp: i32,
        /// Worsening-condition notice.
        message: String,
        /// Generic retry guidance.
        analysis: String,
        /// The original test menu, offered again.
        test_options: Vec<String>,
    },
}

/// Case-insensitive bidirectional substring containment.
///
/// A submission is accepted if it contains the illness name or the illness
/// name contains it. This deliberately tolerates partial and padded
/// answers ("flu" matches "Bird Flu") at the cost of some false positives;
/// that trade-off is the policy, not a defect.
#[must_use]
pub fn diagnosis_matches(submission: &str, illness: &str) -> bool {
    let submission = submission.to_lowercase();
    let illness = illness.to_lowercase();
    submission.contains(&illness) || illness.contains(&submission)
}

/// Orchestrates the generator, evaluator, and store into the game proper.
pub struct GameEngine {
    store: SessionStore,
    generator: CaseGenerator,
    evaluator: TestEvaluator,
    config: GameConfig,
}

impl GameEngine {
    /// Build an engine over a text generator and configuration.
    #[must_use]
    pub fn new(llm: Arc<dyn TextGenerator>, config: GameConfig) -> Self {
        Self {
            store: SessionStore::new(),
            generator: CaseGenerator::new(llm.clone(), config.clone()),
            evaluator: TestEvaluator::new(llm, config.clone()),
            config,
        }
    }

    /// Access the session store (views only; mutation stays in the engine).
    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Start a new session.
    ///
    /// The difficulty label is free-form: the tier lookup defaults
    /// unrecognized labels to the most lenient tier, and the raw label is
    /// still passed to the case generator verbatim. Generation failure
    /// degrades the case content; start itself cannot fail.
    pub async fn start(&self, difficulty_label: &str) -> StartedGame {
        let difficulty = Difficulty::from_label(difficulty_label);
        let case = self.generator.generate(difficulty_label).await;
        let session = Session::new(case, difficulty);

        let started = StartedGame {
            session_id: session.id,
            patient_intro: session.case.patient_intro.clone(),
            test_options: session.case.initial_test_options.clone(),
            hp: session.hp,
            max_hp: session.max_hp,
        };

        info!(session_id = %session.id, difficulty = ?difficulty, hp = session.hp, "session started");
        self.store.insert(session);
        started
    }

    /// Order a diagnostic test.
    ///
    /// Never changes health or status, even when repeated with the same
    /// test name; the only mutation is appending to the session log.
    ///
    /// # Errors
    /// [`CoreError::SessionNotFound`](crate::CoreError::SessionNotFound)
    /// if the id is unknown.
    pub async fn submit_test(&self, id: SessionId, test_name: &str) -> Result<TestOutcome> {
        // Clone the case out first so no lock is held across the model call.
        let case = self
            .store
            .get(id)
            .ok_or(crate::CoreError::SessionNotFound(id))?
            .case;

        let narrative = self.evaluator.narrate(&case, test_name).await;

        self.store.with_session_mut(id, |session| {
            session
                .log
                .push(LogEntry::new(LogKind::Action, format!("Running {test_name}...")));
            session
                .log
                .push(LogEntry::new(LogKind::Narrative, narrative.clone()));
        })?;

        Ok(TestOutcome {
            narrative,
            diagnosis_options: case.diagnosis_list,
        })
    }

    /// Commit to a diagnosis.
    ///
    /// Correct submissions win and leave health untouched. Wrong ones cost
    /// a fixed health penalty; at zero or below the session is lost and the
    /// answer is revealed. There is no terminal-state guard: a submission
    /// against an already won or lost session runs the same evaluation and
    /// may move health and status again (preserved permissive behavior).
    ///
    /// # Errors
    /// [`CoreError::SessionNotFound`](crate::CoreError::SessionNotFound)
    /// if the id is unknown.
    pub async fn submit_diagnosis(
        &self,
        id: SessionId,
        submission: &str,
    ) -> Result<DiagnosisOutcome> {
        let penalty = self.config.wrong_diagnosis_penalty;

        self.store.with_session_mut(id, |session| {
            let illness = session.case.illness_name.clone();

            if diagnosis_matches(submission, &illness) {
                session.status = GameStatus::Won;
                info!(session_id = %id, %illness, "session won");
                return DiagnosisOutcome::Win {
                    message: format!("CORRECT DIAGNOSIS: {illness}"),
                    analysis: session.case.explanation_correct.clone(),
                };
            }

            session.hp -= penalty;

            if session.hp <= 0 {
                session.status = GameStatus::Lost;
                info!(session_id = %id, hp = session.hp, "session lost");
                DiagnosisOutcome::Lose {
                    message: LOSE_MESSAGE.to_string(),
                    analysis: format!(
                        "The patient actually had {illness}. The definitive test required was {}. {}",
                        session.case.correct_test, session.case.explanation_correct
                    ),
                }
            } else {
                session.status = GameStatus::Playing;
                DiagnosisOutcome::Continue {
                    hp: session.hp,
                    message: CONTINUE_MESSAGE.to_string(),
                    analysis: CONTINUE_ANALYSIS.to_string(),
                    test_options: session.case.initial_test_options.clone(),
                }
            }
        })
    }
}
