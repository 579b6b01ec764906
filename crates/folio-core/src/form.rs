#![forbid(unsafe_code)]

//! Contact form validation.

use crate::capability::FormField;
use crate::config::FormConfig;

/// A value counts as missing when nothing but whitespace remains.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// What the host must do with a submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Positions (in scan order) of the required fields that were blank.
    pub blank_fields: Vec<usize>,
    /// Cancel the browser's submission.
    pub prevent_default: bool,
    /// Message for a blocking alert, if one must be shown.
    pub alert: Option<String>,
}

impl SubmitOutcome {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.blank_fields.is_empty()
    }
}

/// Validate every required field from scratch.
///
/// Blank fields get the error border, the rest get the default border. Any
/// blank field cancels submission and asks for an alert.
pub fn validate_submission<F, I>(fields: I, config: &FormConfig) -> SubmitOutcome
where
    F: FormField,
    I: IntoIterator<Item = F>,
{
    let mut blank_fields = Vec::new();
    for (idx, mut field) in fields.into_iter().enumerate() {
        if is_blank(&field.value()) {
            field.set_border_color(&config.error_border);
            blank_fields.push(idx);
        } else {
            field.set_border_color(&config.default_border);
        }
    }

    if blank_fields.is_empty() {
        SubmitOutcome {
            blank_fields,
            prevent_default: false,
            alert: None,
        }
    } else {
        crate::debug!(blank = blank_fields.len(), "contact form blocked");
        SubmitOutcome {
            blank_fields,
            prevent_default: true,
            alert: Some(config.alert_message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeField;
    use pretty_assertions::assert_eq;

    fn fields(values: &[&str]) -> Vec<FakeField> {
        values.iter().map(|v| FakeField::new(v)).collect()
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn complete_form_submits_and_resets_borders() {
        let config = FormConfig::default();
        let mut form = fields(&["Ana", "ana@example.com", "Oi", "Mensagem"]);
        form[0].border = Some("#dc2626".into());

        let outcome = validate_submission(form.iter_mut(), &config);
        assert!(outcome.is_valid());
        assert!(!outcome.prevent_default);
        assert_eq!(outcome.alert, None);
        for field in &form {
            assert_eq!(field.border.as_deref(), Some("var(--border-color)"));
        }
    }

    #[test]
    fn exactly_blank_fields_are_flagged() {
        let config = FormConfig::default();
        let mut form = fields(&["Ana", "   ", "Oi", ""]);

        let outcome = validate_submission(form.iter_mut(), &config);
        assert_eq!(outcome.blank_fields, vec![1, 3]);
        assert!(outcome.prevent_default);
        assert_eq!(
            outcome.alert.as_deref(),
            Some("Por favor, preencha todos os campos obrigatórios.")
        );
        let borders: Vec<_> = form.iter().map(|f| f.border.clone().unwrap()).collect();
        assert_eq!(
            borders,
            vec![
                "var(--border-color)",
                "#dc2626",
                "var(--border-color)",
                "#dc2626"
            ]
        );
    }

    #[test]
    fn no_memory_between_attempts() {
        let config = FormConfig::default();
        let mut form = fields(&[""]);
        assert!(!validate_submission(form.iter_mut(), &config).is_valid());

        form[0].value = "preenchido".into();
        let outcome = validate_submission(form.iter_mut(), &config);
        assert!(outcome.is_valid());
        assert_eq!(form[0].border.as_deref(), Some("var(--border-color)"));
    }

    #[test]
    fn form_without_required_fields_submits() {
        let outcome = validate_submission(Vec::<FakeField>::new(), &FormConfig::default());
        assert!(outcome.is_valid());
        assert!(!outcome.prevent_default);
    }
}
