//! File-backed key/value store for client-local state.
//!
//! Each key maps to one `<key>.json` file inside the storage directory.
//! Writes go to a temp file in the same directory and are renamed into place,
//! so a concurrent reader sees either the old or the new value, never a
//! partial one. Concurrent writers are last-write-wins.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::config;
use crate::error::{Result, StorefrontError};

pub struct LocalStorage {
    /// Directory holding one file per key.
    pub dir: PathBuf,
}

impl LocalStorage {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// If `dir` is `None`, uses the platform-appropriate data directory.
    pub fn new(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_storage_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(StorefrontError::InvalidArgument(format!(
                "Invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }

    /// Read the raw value stored under `key`, or `None` if nothing is stored.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store `value` under `key`, replacing any previous value atomically.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path).map_err(|e| StorefrontError::Io(e.error))?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every stored key.
    ///
    /// Only `<key>.json` files are touched. Anything else in the directory
    /// belongs to someone else and is left in place.
    pub fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(key) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if is_valid_key(key) {
                self.remove_item(key)?;
            }
        }
        Ok(())
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
