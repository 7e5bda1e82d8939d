//! Session entity, difficulty tiers, status, and the event log.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::case::Case;

/// Opaque unique identifier for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mint a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Named difficulty tier mapping to a starting health value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 100 starting HP — five wrong diagnoses to lose.
    Easy,
    /// 60 starting HP.
    Medium,
    /// 20 starting HP — one wrong diagnosis loses.
    Hard,
}

impl Difficulty {
    /// Resolve a free-form label to a tier.
    ///
    /// Unrecognized labels map to the most lenient tier. This is
    /// intentional leniency, not validation that was forgotten.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }

    /// Starting (and maximum) health points for this tier.
    #[must_use]
    pub fn starting_hp(self) -> i32 {
        match self {
            Self::Easy => 100,
            Self::Medium => 60,
            Self::Hard => 20,
        }
    }
}

/// Whether a session is still in play or has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GameStatus {
    /// The round is in progress.
    Playing,
    /// The player diagnosed correctly.
    Won,
    /// Health reached zero.
    Lost,
}

/// What kind of log line this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// Something the player did.
    Action,
    /// What the simulation reported back.
    Narrative,
}

/// One append-only entry in a session's event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Action or narrative.
    pub kind: LogKind,
    /// The log line itself.
    pub text: String,
    /// When the entry was appended.
    pub at: DateTime<Utc>,
}

impl LogEntry {
    /// Create an entry timestamped now.
    #[must_use]
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            at: Utc::now(),
        }
    }
}

/// One player's in-progress or finished game instance.
///
/// Owned exclusively by the [`SessionStore`](crate::store::SessionStore);
/// callers get clones and all mutation goes through the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// The hidden case this session is played against.
    pub case: Case,
    /// Current health points.
    pub hp: i32,
    /// Health points at session start, fixed by the difficulty tier.
    pub max_hp: i32,
    /// Difficulty tier resolved at creation.
    pub difficulty: Difficulty,
    /// Append-only event log.
    pub log: Vec<LogEntry>,
    /// Playing, won, or lost.
    pub status: GameStatus,
}

impl Session {
    /// Create a fresh session in the Playing state with full health.
    #[must_use]
    pub fn new(case: Case, difficulty: Difficulty) -> Self {
        let hp = difficulty.starting_hp();
        Self {
            id: SessionId::new(),
            case,
            hp,
            max_hp: hp,
            difficulty,
            log: Vec::new(),
            status: GameStatus::Playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_resolve_to_tiers() {
        assert_eq!(Difficulty::from_label("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label("medium"), Difficulty::Medium);
        assert_eq!(Difficulty::from_label("hard"), Difficulty::Hard);
    }

    #[test]
    fn unknown_labels_default_to_easy() {
        assert_eq!(Difficulty::from_label("nightmare"), Difficulty::Easy);
        assert_eq!(Difficulty::from_label(""), Difficulty::Easy);
        assert_eq!(Difficulty::from_label("HARD"), Difficulty::Easy);
    }

    #[test]
    fn new_session_starts_playing_at_full_health() {
        let session = Session::new(Case::degraded(), Difficulty::Medium);
        assert_eq!(session.hp, 60);
        assert_eq!(session.max_hp, 60);
        assert_eq!(session.status, GameStatus::Playing);
        assert!(session.log.is_empty());
    }
}
