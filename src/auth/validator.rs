//! Signup input validation
//!
//! Rejects blank, overlong, or control-character-laden usernames and secrets
//! before they reach the credential store.

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Performs basic input sanitation to check for malformed usernames/secrets.
fn check_field(field: &str, value: &str, max_length: usize) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }

    if value.len() > max_length {
        return Err(AuthError::Validation(format!(
            "{field} must be at most {max_length} bytes"
        )));
    }

    if value.contains(['\r', '\n', '\0']) {
        return Err(AuthError::Validation(format!(
            "{field} contains control characters"
        )));
    }

    Ok(())
}

/// Validates a username/secret pair submitted for signup.
pub fn validate_signup(username: &str, secret: &str, config: &AuthConfig) -> Result<(), AuthError> {
    check_field("Username", username, config.max_username_length)?;
    check_field("Password", secret, config.max_secret_length)
}
