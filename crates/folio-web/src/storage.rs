#![forbid(unsafe_code)]

//! `localStorage`-backed preference store.

use folio_core::storage::{PreferenceStore, StorageError, StorageResult};
use web_sys::{Storage, Window};

use crate::dom::js_message;

/// `window.localStorage`, or nothing when the browser refuses access.
#[derive(Debug, Clone, Default)]
pub(crate) struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub(crate) fn open(window: &Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                tracing::debug!("localStorage not present");
                None
            }
            Err(err) => {
                tracing::warn!(error = %js_message(&err), "localStorage blocked");
                None
            }
        };
        Self { storage }
    }

    fn storage(&self) -> StorageResult<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not available".into()))
    }
}

impl PreferenceStore for LocalStore {
    fn name(&self) -> &str {
        "localStorage"
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Read(js_message(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(js_message(&e)))
    }
}
