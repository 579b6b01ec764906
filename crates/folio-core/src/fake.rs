#![forbid(unsafe_code)]

//! In-memory stand-ins for page elements.
//!
//! Each fake stores its DOM flags as plain fields and counts writes, so tests
//! can assert both the resulting state and that nothing was touched twice.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::capability::{
    BodyTheme, ButtonControl, FormField, LazyLoadable, Revealable, ScrollTarget, StyleTarget,
    Toggleable,
};
use crate::clipboard::{ClipboardError, ClipboardWriter};
use crate::storage::{PreferenceStore, StorageError, StorageResult};

/// Nav toggle or menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeToggle {
    pub active: bool,
}

impl FakeToggle {
    #[must_use]
    pub const fn with_active(active: bool) -> Self {
        Self { active }
    }
}

impl Toggleable for FakeToggle {
    fn is_active(&self) -> bool {
        self.active
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

/// Element with inline styles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeStyle {
    pub styles: BTreeMap<String, String>,
    pub writes: usize,
}

impl FakeStyle {
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }
}

impl StyleTarget for FakeStyle {
    fn set_style(&mut self, property: &str, value: &str) {
        self.styles.insert(property.to_owned(), value.to_owned());
        self.writes += 1;
    }
}

/// Required form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeField {
    pub value: String,
    pub border: Option<String>,
}

impl FakeField {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_owned(),
            border: None,
        }
    }
}

impl FormField for FakeField {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_border_color(&mut self, color: &str) {
        self.border = Some(color.to_owned());
    }
}

/// Card or section that fades in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeCard {
    pub revealed: bool,
    pub writes: usize,
}

impl Revealable for FakeCard {
    fn is_revealed(&self) -> bool {
        self.revealed
    }

    fn reveal(&mut self) {
        self.revealed = true;
        self.writes += 1;
    }
}

/// Image with a deferred source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeImage {
    pub data_src: Option<String>,
    pub src: Option<String>,
    pub lazy: bool,
    pub writes: usize,
}

impl FakeImage {
    /// An unloaded image: `data-src` set, `lazy` class present.
    #[must_use]
    pub fn deferred(src: &str) -> Self {
        Self {
            data_src: Some(src.to_owned()),
            src: None,
            lazy: true,
            writes: 0,
        }
    }
}

impl LazyLoadable for FakeImage {
    fn deferred_source(&self) -> Option<String> {
        self.data_src.clone()
    }

    fn set_source(&mut self, src: &str) {
        self.src = Some(src.to_owned());
        self.writes += 1;
    }

    fn clear_lazy_marker(&mut self) {
        self.lazy = false;
        self.writes += 1;
    }
}

/// Submit button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeButton {
    pub label: String,
    pub disabled: bool,
}

impl FakeButton {
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            disabled: false,
        }
    }
}

impl ButtonControl for FakeButton {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_owned();
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// Document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeBody {
    pub dark: bool,
}

impl BodyTheme for FakeBody {
    fn is_dark(&self) -> bool {
        self.dark
    }

    fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }
}

/// Anchor target; counts scroll requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeSection {
    pub smooth_scrolls: usize,
}

impl ScrollTarget for FakeSection {
    fn scroll_into_view_smoothly(&mut self) {
        self.smooth_scrolls += 1;
    }
}

/// Clipboard that succeeds, or fails with a fixed error.
#[derive(Debug, Default)]
pub struct FakeClipboard {
    contents: RefCell<Option<String>>,
    failure: Option<ClipboardError>,
}

impl FakeClipboard {
    #[must_use]
    pub fn failing(error: ClipboardError) -> Self {
        Self {
            contents: RefCell::new(None),
            failure: Some(error),
        }
    }

    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        *self.contents.borrow_mut() = Some(text.to_owned());
        Ok(())
    }
}

/// Store that rejects every operation, like `localStorage` in a locked-down
/// browser profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl PreferenceStore for FailingStore {
    fn name(&self) -> &str {
        "FailingStore"
    }

    fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Read("SecurityError".into()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Write("SecurityError".into()))
    }
}
