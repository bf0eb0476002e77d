//! Credential storage and management
//!
//! Keeps the ordered list of `{username, password}` records under a single
//! storage key and enforces username uniqueness on insert.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::{CredentialError, StorageError};
use crate::storage::KeyValueStorage;

/// A single account. The secret is kept in plaintext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    username: String,
    #[serde(rename = "password", alias = "secret")]
    secret: String,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact, case-sensitive match on both fields.
    pub fn matches(&self, username: &str, secret: &str) -> bool {
        self.username == username && self.secret == secret
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Parses a stored record list, failing closed.
///
/// Absent values, or values that are not a JSON array, yield an empty list.
/// Elements that do not match the record schema, have a blank username, or
/// repeat an earlier username are dropped individually.
fn decode_records(key: &str, raw: Option<&str>) -> Vec<CredentialRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let elements: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(elements) => elements,
        Err(e) => {
            warn!("Stored value for '{}' is corrupt, treating as empty: {}", key, e);
            return Vec::new();
        }
    };

    let total = elements.len();
    let parsed: Vec<CredentialRecord> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record {} in '{}': {}", index, key, e);
                None
            }
        })
        .collect();

    let mut seen = HashSet::new();
    let records: Vec<CredentialRecord> = parsed
        .into_iter()
        .filter(|r| !r.username.trim().is_empty() && seen.insert(r.username.clone()))
        .collect();

    if records.len() != total {
        warn!(
            "Dropped {} invalid or duplicate record(s) from '{}'",
            total - records.len(),
            key
        );
    }

    records
}

fn encode_records(records: &[CredentialRecord]) -> Result<String, StorageError> {
    serde_json::to_string(records).map_err(|e| StorageError::Io(e.into()))
}

/// Durable username → credential mapping
pub struct CredentialStore<S> {
    storage: Arc<S>,
    key: String,
    max_retries: usize,
}

impl<S: KeyValueStorage> CredentialStore<S> {
    pub fn new(storage: Arc<S>, config: &AuthConfig) -> Self {
        Self {
            storage,
            key: config.users_key.clone(),
            max_retries: config.max_retries,
        }
    }

    /// Reads every record in insertion order. Never fails the caller.
    pub fn load(&self) -> Vec<CredentialRecord> {
        match self.storage.get(&self.key) {
            Ok(raw) => decode_records(&self.key, raw.as_deref()),
            Err(e) => {
                error!("Failed to read credentials from '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Replaces the persisted record list.
    pub fn save(&self, records: &[CredentialRecord]) -> Result<(), StorageError> {
        let raw = encode_records(records)?;
        self.storage.set(&self.key, &raw)
    }

    pub fn find_by_username(&self, username: &str) -> Option<CredentialRecord> {
        self.load().into_iter().find(|r| r.username == username)
    }

    /// Returns the record matching both fields exactly, if any.
    pub fn verify(&self, username: &str, secret: &str) -> Option<CredentialRecord> {
        self.load().into_iter().find(|r| r.matches(username, secret))
    }

    /// Appends a record after checking uniqueness against the latest persisted state.
    ///
    /// The write only lands if the stored value is unchanged since it was read;
    /// otherwise the check is repeated, up to `max_retries` times.
    pub fn insert(&self, record: CredentialRecord) -> Result<(), CredentialError> {
        for attempt in 1..=self.max_retries {
            let raw = self.storage.get(&self.key)?;
            let mut records = decode_records(&self.key, raw.as_deref());

            if records.iter().any(|r| r.username == record.username) {
                return Err(CredentialError::DuplicateUsername(record.username));
            }

            records.push(record.clone());
            let encoded = encode_records(&records)?;

            if self
                .storage
                .compare_and_swap(&self.key, raw.as_deref(), &encoded)?
            {
                info!(
                    "Stored credentials for {} ({} account(s))",
                    record.username,
                    records.len()
                );
                return Ok(());
            }

            warn!(
                "Credential list changed during insert of {} (attempt {}/{})",
                record.username, attempt, self.max_retries
            );
        }

        error!(
            "Giving up inserting {} after {} attempts",
            record.username, self.max_retries
        );
        Err(CredentialError::Storage(StorageError::Conflict(
            self.key.clone(),
        )))
    }

    /// Usernames in insertion order
    pub fn usernames(&self) -> Vec<String> {
        self.load().into_iter().map(|r| r.username).collect()
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
