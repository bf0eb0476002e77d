//! File system storage backend
//!
//! Each key is stored as `<root>/<key>.json`. Writes go to a uniquely named
//! temporary file in the same directory which is synced and then renamed over
//! the target, so readers never observe a partially written value.

use log::{debug, error, info};
use std::fs::{self, remove_file};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

use super::backend::KeyValueStorage;
use super::validation::validate_key;
use crate::error::StorageError;

/// Key-value storage persisted as one file per key
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
    // Serializes writers within this process. Cross-process writers are only
    // detected by compare_and_swap's re-read, not excluded.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Opens (creating if needed) a storage directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            error!("Failed to create storage directory {}: {}", root.display(), e);
            StorageError::from(e)
        })?;
        info!("Storage directory: {}", root.display());

        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Root directory of this storage partition
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.write_lock
            .lock()
            .map_err(|_| StorageError::Poisoned(key.to_string()))
    }
}

fn read_value(path: &Path) -> Result<Option<String>, StorageError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            Err(StorageError::from(e))
        }
    }
}

fn write_atomic(root: &Path, path: &Path, value: &str) -> Result<(), StorageError> {
    // Unique temp name per write, so concurrent handles never share one inode
    let mut temp_file = NamedTempFile::new_in(root).map_err(|e| {
        error!("Failed to create temporary file in {}: {}", root.display(), e);
        StorageError::from(e)
    })?;

    let written = temp_file
        .write_all(value.as_bytes())
        .and_then(|()| temp_file.flush())
        .and_then(|()| temp_file.as_file().sync_all());

    if let Err(e) = written {
        error!(
            "Failed to write temporary file {}: {}",
            temp_file.path().display(),
            e
        );
        return Err(StorageError::from(e));
    }

    // A failed persist drops the temp file, which removes it
    if let Err(e) = temp_file.persist(path) {
        error!(
            "Failed to rename {} to {}: {}",
            e.file.path().display(),
            path.display(),
            e.error
        );
        return Err(StorageError::from(e.error));
    }

    debug!("Wrote {} ({} bytes)", path.display(), value.len());
    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        read_value(&path)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock(key)?;
        write_atomic(&self.root, &path, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock(key)?;
        match remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                error!("Failed to remove {}: {}", path.display(), e);
                Err(StorageError::from(e))
            }
        }
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock(key)?;

        let current = read_value(&path)?;
        if current.as_deref() != expected {
            debug!("Compare-and-swap on {} lost to another writer", key);
            return Ok(false);
        }

        write_atomic(&self.root, &path, new)?;
        Ok(true)
    }
}
