//! Authentication result types
//!
//! Defines values returned to callers of the auth gateway.

use std::fmt;

use super::session::Session;

/// The authenticated identity handed back to the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

impl From<Session> for Identity {
    fn from(session: Session) -> Self {
        Identity {
            username: session.username,
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}
