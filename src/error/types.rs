//! Error types
//!
//! Defines domain-specific error types for each layer of the credential store.

use std::fmt;
use std::io;

/// Durable storage errors
#[derive(Debug)]
pub enum StorageError {
    InvalidKey(String),
    Io(io::Error),
    Poisoned(String),
    Conflict(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::InvalidKey(k) => write!(f, "Invalid storage key: {}", k),
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Poisoned(what) => write!(f, "Storage lock poisoned: {}", what),
            StorageError::Conflict(k) => write!(f, "Concurrent writers kept changing key: {}", k),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::Io(error)
    }
}

/// Credential store errors
#[derive(Debug)]
pub enum CredentialError {
    DuplicateUsername(String),
    Storage(StorageError),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialError::DuplicateUsername(u) => write!(f, "Username already exists: {}", u),
            CredentialError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for CredentialError {}

impl From<StorageError> for CredentialError {
    fn from(error: StorageError) -> Self {
        CredentialError::Storage(error)
    }
}

/// Errors surfaced by the auth gateway to its caller
#[derive(Debug)]
pub enum AuthError {
    Validation(String),
    DuplicateUsername(String),
    InvalidCredentials,
    NotLoggedIn,
    Storage(StorageError),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Validation(s) => write!(f, "Invalid input: {}", s),
            AuthError::DuplicateUsername(u) => write!(f, "Username already exists: {}", u),
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthError::NotLoggedIn => write!(f, "User not logged in"),
            AuthError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<StorageError> for AuthError {
    fn from(error: StorageError) -> Self {
        AuthError::Storage(error)
    }
}

impl From<CredentialError> for AuthError {
    fn from(error: CredentialError) -> Self {
        match error {
            CredentialError::DuplicateUsername(u) => AuthError::DuplicateUsername(u),
            CredentialError::Storage(e) => AuthError::Storage(e),
        }
    }
}

impl AuthError {
    /// Whether the caller can fix the problem by re-entering input.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AuthError::Storage(_))
    }
}
