//! # Triage Core
//!
//! Session/state machine for the turn-based diagnostic game.
//!
//! A game round: the engine asks the model for a hidden medical [`Case`],
//! the player orders diagnostic tests (each narrated by the model against
//! the hidden case), then commits to a diagnosis. Correct diagnosis wins;
//! each wrong one costs health points until the patient is lost.
//!
//! The model is an untrusted oracle — all of its output enters this crate
//! through `triage-llm`'s degrading parser, so a malformed completion
//! produces a playable (if degraded) session rather than an error.
//!
//! Sessions live in an in-process [`SessionStore`] for the lifetime of the
//! process. There is no persistence and no per-session serialization of
//! concurrent mutations; both are deliberate scope cuts.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod case;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod session;
pub mod store;

pub use case::{Case, HiddenSymptoms};
pub use config::GameConfig;
pub use engine::{DiagnosisOutcome, GameEngine, StartedGame, TestOutcome};
pub use error::{CoreError, Result};
pub use session::{Difficulty, GameStatus, LogEntry, LogKind, Session, SessionId};
pub use store::SessionStore;
