//! In-process session storage.
//!
//! A mutex-guarded map from opaque token to session metadata. No
//! persistence, no expiry: a token stays valid until it is explicitly
//! revoked or the process restarts. A logout racing a verify on the same
//! token can nondeterministically permit or deny that verify; with a
//! single admin that race is accepted.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

/// Metadata for one authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// The username that authenticated
    pub owner: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

/// Process-lifetime mapping from token to session.
///
/// The lock is `std::sync::Mutex`, held only for map access; no await
/// point ever sits inside the critical section.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under `token`, replacing any previous entry.
    pub fn insert(&self, token: String, owner: String) {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(
            token,
            Session {
                owner,
                created_at: Utc::now(),
            },
        );
    }

    /// Look up a session. Pure read, no side effect.
    pub fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.get(token).cloned()
    }

    /// Remove a session if present. Removing an absent token is a no-op.
    pub fn remove(&self, token: &str) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
