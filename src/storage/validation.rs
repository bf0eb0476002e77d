//! Key validation
//!
//! Keys become file names in the file backend, so they are restricted to a
//! conservative character set with no path separators or traversal.

use crate::error::StorageError;

/// Maximum length of a storage key
pub const MAX_KEY_LENGTH: usize = 128;

/// Validate that a key is safe to use as a file stem
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.len() > MAX_KEY_LENGTH {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    if key.starts_with('.') || key.contains("..") {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.');
    if !key.chars().all(allowed) {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    Ok(())
}
