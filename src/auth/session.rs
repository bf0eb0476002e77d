//! Session management
//!
//! Tracks the single authenticated identity of a storage partition. The session
//! survives restarts and is never checked against the credential store.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// Persisted session payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
}

/// Authentication state derived from the persisted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(String),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Reads and writes the active session under its own storage key
pub struct SessionManager<S> {
    storage: Arc<S>,
    key: String,
}

impl<S: KeyValueStorage> SessionManager<S> {
    pub fn new(storage: Arc<S>, config: &AuthConfig) -> Self {
        Self {
            storage,
            key: config.session_key.clone(),
        }
    }

    /// Persists `username` as the active session, replacing any previous one.
    pub fn start_session(&self, username: &str) -> Result<Session, StorageError> {
        let session = Session {
            username: username.to_string(),
        };
        let raw = serde_json::to_string(&session).map_err(|e| StorageError::Io(e.into()))?;
        self.storage.set(&self.key, &raw)?;

        info!("Session started for {}", username);
        Ok(session)
    }

    /// Returns the persisted session; absent, corrupt, or unreadable values yield `None`.
    pub fn current_session(&self) -> Option<Session> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                error!("Failed to read session from '{}': {}", self.key, e);
                return None;
            }
        };

        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if !session.username.trim().is_empty() => Some(session),
            Ok(_) => {
                warn!("Stored session in '{}' has no username, ignoring", self.key);
                None
            }
            Err(e) => {
                warn!("Stored session in '{}' is corrupt, ignoring: {}", self.key, e);
                None
            }
        }
    }

    /// Clears the persisted session. Ending an absent session is not an error.
    pub fn end_session(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.key)?;
        info!("Session cleared");
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        match self.current_session() {
            Some(session) => SessionState::Authenticated(session.username),
            None => SessionState::Anonymous,
        }
    }
}
