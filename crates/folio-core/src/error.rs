#![forbid(unsafe_code)]

//! Crate-level error type.

use std::fmt;

use crate::clipboard::ClipboardError;
use crate::storage::StorageError;

/// Errors surfaced by `folio-core` operations.
///
/// None of these are fatal to the page: each feature is initialized
/// independently and a failure only disables the feature that raised it.
#[derive(Debug)]
pub enum FolioError {
    /// Host-supplied configuration was malformed or out of range.
    Config(String),
    /// The preference store rejected a read or write.
    Storage(StorageError),
    /// The clipboard write did not complete.
    Clipboard(ClipboardError),
    /// The host environment failed an operation (a DOM call threw, etc.).
    Host(String),
}

impl fmt::Display for FolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolioError::Config(msg) => write!(f, "invalid configuration: {msg}"),
            FolioError::Storage(e) => write!(f, "preference storage: {e}"),
            FolioError::Clipboard(e) => write!(f, "clipboard: {e}"),
            FolioError::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for FolioError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FolioError::Storage(e) => Some(e),
            FolioError::Clipboard(e) => Some(e),
            FolioError::Config(_) | FolioError::Host(_) => None,
        }
    }
}

impl From<StorageError> for FolioError {
    fn from(e: StorageError) -> Self {
        FolioError::Storage(e)
    }
}

impl From<ClipboardError> for FolioError {
    fn from(e: ClipboardError) -> Self {
        FolioError::Clipboard(e)
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        FolioError::Config(e.to_string())
    }
}

/// Result type for `folio-core` operations.
pub type Result<T> = std::result::Result<T, FolioError>;
