#![forbid(unsafe_code)]

//! Dark mode toggle and its persisted preference.
//!
//! The preference is stored as the literal text `"true"` or `"false"`. Only
//! an exact `"true"` turns dark mode on at load; anything else, including a
//! missing or unreadable entry, leaves the light default.

use crate::capability::BodyTheme;
use crate::config::ThemeConfig;
use crate::storage::{PreferenceStore, StorageError};

/// Stored text for a boolean preference.
#[must_use]
pub const fn encode_preference(dark: bool) -> &'static str {
    if dark { "true" } else { "false" }
}

/// Whether a stored value means dark mode.
#[must_use]
pub fn decode_preference(stored: Option<&str>) -> bool {
    stored == Some("true")
}

/// Dark mode controller bound to one storage key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DarkMode {
    storage_key: String,
}

impl DarkMode {
    #[must_use]
    pub fn new(config: &ThemeConfig) -> Self {
        Self {
            storage_key: config.storage_key.clone(),
        }
    }

    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Flip the body's theme and persist the result.
    ///
    /// The visual flip happens first and is kept even if the write fails;
    /// the error is returned so the caller can log it.
    pub fn toggle<B, S>(&self, body: &mut B, store: &mut S) -> Result<bool, StorageError>
    where
        B: BodyTheme,
        S: PreferenceStore,
    {
        let dark = !body.is_dark();
        body.set_dark(dark);
        store.set_item(&self.storage_key, encode_preference(dark))?;
        crate::debug!(dark, store = store.name(), "dark mode toggled");
        Ok(dark)
    }

    /// Apply the stored preference at page load. Returns the resulting state.
    ///
    /// Only ever adds dark mode; a light preference leaves the body as is.
    pub fn restore<B, S>(&self, body: &mut B, store: &S) -> bool
    where
        B: BodyTheme,
        S: PreferenceStore,
    {
        let stored = match store.get_item(&self.storage_key) {
            Ok(value) => value,
            Err(err) => {
                crate::warn!(error = %err, "could not read dark mode preference");
                None
            }
        };
        if decode_preference(stored.as_deref()) {
            body.set_dark(true);
        }
        body.is_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FailingStore, FakeBody};
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn dark_mode() -> DarkMode {
        DarkMode::new(&ThemeConfig::default())
    }

    #[test]
    fn only_exact_true_decodes_as_dark() {
        assert!(decode_preference(Some("true")));
        assert!(!decode_preference(Some("false")));
        assert!(!decode_preference(Some("TRUE")));
        assert!(!decode_preference(Some(" true")));
        assert!(!decode_preference(Some("1")));
        assert!(!decode_preference(None));
    }

    #[test]
    fn toggle_persists_literal_text() {
        let mut body = FakeBody::default();
        let mut store = MemoryStore::new();
        let theme = dark_mode();

        assert_eq!(theme.toggle(&mut body, &mut store), Ok(true));
        assert!(body.dark);
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("true"));

        assert_eq!(theme.toggle(&mut body, &mut store), Ok(false));
        assert!(!body.dark);
        assert_eq!(store.get_item("darkMode").unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn restore_applies_stored_dark_mode() {
        let theme = dark_mode();

        let mut body = FakeBody::default();
        assert!(theme.restore(&mut body, &MemoryStore::with_entry("darkMode", "true")));
        assert!(body.dark);

        let mut body = FakeBody::default();
        assert!(!theme.restore(&mut body, &MemoryStore::with_entry("darkMode", "false")));
        assert!(!body.dark);

        let mut body = FakeBody::default();
        assert!(!theme.restore(&mut body, &MemoryStore::new()));
        assert!(!body.dark);
    }

    #[test]
    fn write_failure_keeps_visual_flip() {
        let theme = dark_mode();
        let mut body = FakeBody::default();
        let mut store = FailingStore;
        let err = theme.toggle(&mut body, &mut store).unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
        assert!(body.dark);
    }

    #[test]
    fn unreadable_store_means_light() {
        let theme = dark_mode();
        let mut body = FakeBody::default();
        assert!(!theme.restore(&mut body, &FailingStore));
    }
}
