//! Key-value persistence
//!
//! The game only ever stores short strings under fixed keys (the best score).
//! Backends live in `platform::storage`; this module holds the contract and an
//! in-memory store.

use std::collections::HashMap;
use std::fmt;

/// Storage failures. Callers treat all of them as "no data" on read and
/// log-and-continue on write.
#[derive(Debug)]
pub enum StorageError {
    /// Backend not available (no window, private browsing, ...)
    Unavailable(String),
    /// Filesystem error from a native backend
    Io(std::io::Error),
    /// Stored document could not be decoded/encoded
    Format(serde_json::Error),
    /// Backend refused the write (quota, permissions)
    Rejected(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Io(e) => write!(f, "storage I/O error: {e}"),
            StorageError::Format(e) => write!(f, "storage format error: {e}"),
            StorageError::Rejected(msg) => write!(f, "storage rejected write: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Format(e)
    }
}

/// String key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
