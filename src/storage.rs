//! Local key-value store for tdo
//!
//! A small persistent key-value store: one file per key under a data
//! directory, every file name carrying the application prefix so
//! unrelated files in the same directory are never touched.
//!
//! # Layout
//!
//! ```text
//! <data dir>/
//!   APP_user        # serialized session user (JSON)
//! ```
//!
//! Values are JSON-encoded through `set_json`/`get_json`; `set_raw`/
//! `get_raw` store the string verbatim. Absent keys read back as `None`,
//! never as an error. Writes are atomic (temp file + rename) so a reader
//! never sees a partial value. Single-threaded, last-write-wins.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Prefix applied to every persisted key name
pub const KEY_PREFIX: &str = "APP_";

/// Fixed key holding the serialized session user
pub const SESSION_KEY: &str = "user";

/// Key-prefixed local store rooted at a data directory
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    /// Create a store over an existing directory without touching disk
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Open a store, creating the data directory if needed
    pub fn open(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Root directory of this store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persisted path for a key: `<dir>/APP_<key>`
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{KEY_PREFIX}{key}"))
    }

    /// Read the raw stored string for a key, `None` if absent
    pub fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    /// Write a raw string value under a key
    pub fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        self.write_atomic(&self.key_path(key), value.as_bytes())
    }

    /// Read and JSON-decode the value for a key, `None` if absent
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// JSON-encode and write a value under a key
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.write_atomic(&self.key_path(key), json.as_bytes())
    }

    /// Delete the entry for a key; removing an absent key is a no-op
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Write data atomically using temp file + rename
    ///
    /// The file is either fully written or not written at all; a
    /// concurrent reader never observes a partial value.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }
}
