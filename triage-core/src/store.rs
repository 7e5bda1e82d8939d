//! In-memory session store — sole owner of all session lifecycle.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{CoreError, Result};
use crate::session::{Session, SessionId};

/// Process-wide mapping from session identifier to session.
///
/// Callers receive clones, never references into the map; every mutation
/// goes through [`SessionStore::with_session_mut`], so one call is atomic
/// under the lock. Sequencing across calls (read, await the model, write
/// back) is deliberately not serialized per session — two concurrent
/// submissions for the same id may interleave. Sessions are never removed;
/// finished games persist for the life of the process.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a session, returning its id.
    pub fn insert(&self, session: Session) -> SessionId {
        let id = session.id;
        self.sessions.write().insert(id, session);
        id
    }

    /// Clone out a session, if it exists.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<Session> {
        self.sessions.read().get(&id).cloned()
    }

    /// Run a mutation against one session under the write lock.
    ///
    /// # Errors
    /// Returns [`CoreError::SessionNotFound`] if the id is unknown.
    pub fn with_session_mut<T>(
        &self,
        id: SessionId,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(&id)
            .ok_or(CoreError::SessionNotFound(id))?;
        Ok(f(session))
    }

    /// Number of sessions ever started in this process.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no session has been started yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
