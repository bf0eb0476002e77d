//! Storage backend trait

use crate::error::StorageError;

/// A durable string-to-string map partitioned by storage handle.
///
/// Every method completes immediately against local storage; there are no
/// suspension points. Implementations use interior locking so a single handle
/// can be shared between the credential store and the session manager.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value for `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Writes `new` only if the current value equals `expected`.
    ///
    /// `expected == None` matches an absent key. Returns `false` without
    /// writing when another writer changed the value first.
    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StorageError>;
}
