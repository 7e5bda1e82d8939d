//! HTTP routes and wire types.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use triage_core::{CoreError, DiagnosisOutcome, GameEngine, SessionId};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<GameEngine>> {
    Router::new()
        .route("/", get(health))
        .route("/start_game", post(start_game))
        .route("/submit_test", post(submit_test))
        .route("/submit_diagnosis", post(submit_diagnosis))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    pub difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    pub game_id: String,
    pub patient_intro: String,
    pub test_options: Vec<String>,
    pub hp: i32,
    pub max_hp: i32,
}

#[derive(Debug, Deserialize)]
pub struct TestSubmission {
    pub game_id: String,
    pub test_name: String,
}

#[derive(Debug, Serialize)]
pub struct TestResponse {
    pub narrative: String,
    pub diagnosis_options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DiagnosisSubmission {
    pub game_id: String,
    pub diagnosis_name: String,
}

/// Diagnosis outcome on the wire, tagged by `status`.
#[derive(Debug, Serialize)]
#[serde(tag = "status")]
pub enum DiagnosisResponse {
    #[serde(rename = "WIN")]
    Win { message: String, analysis: String },
    #[serde(rename = "LOSE")]
    Lose { message: String, analysis: String },
    #[serde(rename = "CONTINUE")]
    Continue {
        hp: i32,
        message: String,
        analysis: String,
        test_options: Vec<String>,
    },
}

impl From<DiagnosisOutcome> for DiagnosisResponse {
    fn from(outcome: DiagnosisOutcome) -> Self {
        match outcome {
            DiagnosisOutcome::Win { message, analysis } => Self::Win { message, analysis },
            DiagnosisOutcome::Lose { message, analysis } => Self::Lose { message, analysis },
            DiagnosisOutcome::Continue {
                hp,
                message,
                analysis,
                test_options,
            } => Self::Continue {
                hp,
                message,
                analysis,
                test_options,
            },
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

async fn start_game(
    State(engine): State<Arc<GameEngine>>,
    Json(req): Json<StartGameRequest>,
) -> Json<StartGameResponse> {
    let started = engine.start(&req.difficulty).await;
    Json(StartGameResponse {
        game_id: started.session_id.to_string(),
        patient_intro: started.patient_intro,
        test_options: started.test_options,
        hp: started.hp,
        max_hp: started.max_hp,
    })
}

async fn submit_test(
    State(engine): State<Arc<GameEngine>>,
    Json(req): Json<TestSubmission>,
) -> Result<Json<TestResponse>, ApiError> {
    let id = parse_game_id(&req.game_id)?;
    let outcome = engine.submit_test(id, &req.test_name).await?;
    Ok(Json(TestResponse {
        narrative: outcome.narrative,
        diagnosis_options: outcome.diagnosis_options,
    }))
}

async fn submit_diagnosis(
    State(engine): State<Arc<GameEngine>>,
    Json(req): Json<DiagnosisSubmission>,
) -> Result<Json<DiagnosisResponse>, ApiError> {
    let id = parse_game_id(&req.game_id)?;
    let outcome = engine.submit_diagnosis(id, &req.diagnosis_name).await?;
    Ok(Json(outcome.into()))
}

/// A game id that does not parse is as unknown as one that was never issued.
fn parse_game_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::from_str(raw).map_err(|_| ApiError::NotFound)
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::NotFound => {
                (axum::http::StatusCode::NOT_FOUND, "Game not found").into_response()
            }
            ApiError::Internal(_) => (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            )
                .into_response(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::SessionNotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}
