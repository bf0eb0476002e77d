//! Error handlers
//!
//! Converts gateway errors into console reply codes and log records.

use crate::error::types::AuthError;
use crate::shell::responses;
use log::{error, warn};

/// Log an auth error at a level matching its severity
pub fn handle_error(err: &AuthError) {
    if err.is_recoverable() {
        warn!("Auth request rejected: {}", err);
    } else {
        error!("Auth request failed: {}", err);
    }
}

/// Convert error to console reply code
pub fn error_to_reply_code(err: &AuthError) -> u16 {
    match err {
        AuthError::Validation(_) => responses::INVALID_ARGUMENT,
        AuthError::DuplicateUsername(_) => responses::ACTION_NOT_TAKEN,
        AuthError::InvalidCredentials | AuthError::NotLoggedIn => responses::NOT_LOGGED_IN,
        AuthError::Storage(_) => responses::STORAGE_UNAVAILABLE,
    }
}
