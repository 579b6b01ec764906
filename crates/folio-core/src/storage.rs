#![forbid(unsafe_code)]

//! Origin-scoped key-value preference storage.
//!
//! In the browser this is `localStorage`; [`MemoryStore`] backs tests and
//! hosts without storage.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | `StorageError::Unavailable` | storage disabled or blocked | feature falls back to defaults |
//! | `StorageError::Read` | `getItem` threw | value treated as absent |
//! | `StorageError::Write` | quota exceeded, private mode | visual state still changes |

use std::collections::BTreeMap;
use std::fmt;

/// Errors from a preference store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable(String),
    Read(String),
    Write(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StorageError::Read(msg) => write!(f, "storage read failed: {msg}"),
            StorageError::Write(msg) => write!(f, "storage write failed: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// String key-value store scoped to the page's origin.
pub trait PreferenceStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-memory store. Contents are lost with the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get_item("darkMode").unwrap(), None);

        store.set_item("darkMode", "true").unwrap();
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("true"));
        store.set_item("darkMode", "false").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn errors_display_their_cause() {
        assert_eq!(
            StorageError::Write("QuotaExceededError".into()).to_string(),
            "storage write failed: QuotaExceededError"
        );
    }
}
