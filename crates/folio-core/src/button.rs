#![forbid(unsafe_code)]

//! Loading state for submit buttons.
//!
//! The label swap lasts a fixed duration and is restored on a timer, not when
//! the submission finishes. A slow or failed request therefore ends with a
//! re-enabled button that says nothing about the outcome.

use crate::capability::ButtonControl;
use crate::config::ButtonConfig;

/// Whether an element behaves as a submit control.
///
/// Mirrors the DOM's `type` reflection: a `<button>` with no type, or an
/// unrecognized one, submits; an `<input>` only when its type is `submit`.
#[must_use]
pub fn is_submit_control(tag_name: &str, type_attr: Option<&str>) -> bool {
    let ty = type_attr.map(|t| t.trim().to_ascii_lowercase());
    if tag_name.eq_ignore_ascii_case("button") {
        !matches!(ty.as_deref(), Some("button" | "reset"))
    } else if tag_name.eq_ignore_ascii_case("input") {
        ty.as_deref() == Some("submit")
    } else {
        false
    }
}

/// Proof that a button is in its loading state, holding what to put back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a button left in the loading state stays disabled"]
pub struct PendingRestore {
    original_label: String,
}

impl PendingRestore {
    #[must_use]
    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    /// Put the original label back and re-enable the button.
    pub fn restore<B: ButtonControl>(self, button: &mut B) {
        button.set_label(&self.original_label);
        button.set_disabled(false);
    }
}

/// Swap in the loading label and disable the button.
///
/// A button that is already disabled (a second click while loading) is left
/// alone and yields `None`.
pub fn begin_loading<B: ButtonControl>(
    button: &mut B,
    config: &ButtonConfig,
) -> Option<PendingRestore> {
    if button.is_disabled() {
        return None;
    }
    let original_label = button.label();
    button.set_label(&config.loading_label);
    button.set_disabled(true);
    Some(PendingRestore { original_label })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeButton;
    use pretty_assertions::assert_eq;

    #[test]
    fn submit_detection_follows_dom_defaults() {
        assert!(is_submit_control("BUTTON", None));
        assert!(is_submit_control("button", Some("submit")));
        assert!(is_submit_control("button", Some("bogus")));
        assert!(!is_submit_control("button", Some("button")));
        assert!(!is_submit_control("button", Some(" Reset ")));
        assert!(is_submit_control("input", Some("SUBMIT")));
        assert!(!is_submit_control("input", Some("text")));
        assert!(!is_submit_control("input", None));
        assert!(!is_submit_control("a", Some("submit")));
    }

    #[test]
    fn loading_then_restore() {
        let config = ButtonConfig::default();
        let mut button = FakeButton::new("Enviar mensagem");

        let pending = begin_loading(&mut button, &config).unwrap();
        assert_eq!(button.label, "Enviando...");
        assert!(button.disabled);
        assert_eq!(pending.original_label(), "Enviar mensagem");

        pending.restore(&mut button);
        assert_eq!(button.label, "Enviar mensagem");
        assert!(!button.disabled);
    }

    #[test]
    fn second_click_while_loading_is_ignored() {
        let config = ButtonConfig::default();
        let mut button = FakeButton::new("Enviar");
        let pending = begin_loading(&mut button, &config).unwrap();
        assert_eq!(begin_loading(&mut button, &config), None);

        pending.restore(&mut button);
        assert_eq!(button.label, "Enviar");
    }
}
