//! # triage-llm — LLM Layer for Triage
//!
//! Everything that touches the external generative-text model lives here:
//!
//! - [`client`] — the [`TextGenerator`] trait and the Gemini-backed
//!   implementation. Pure request/response, no game state.
//! - [`prompt`] — compiled-in prompt templates and `{key}` interpolation.
//! - [`parse`] — the structured-response contract: raw completion text in,
//!   JSON object out, with a fixed fallback payload when the model emits
//!   garbage. Parsing never fails; it degrades.
//!
//! The model is treated as an untrusted oracle throughout. Nothing in this
//! crate assumes the response has any particular shape — shape enforcement
//! (such as it is) belongs to the callers in `triage-core`.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod types;

pub use client::{GeminiClient, TextGenerator};
pub use error::LlmError;
pub use parse::extract_json;
pub use types::{GenerationRequest, GenerationResponse};
