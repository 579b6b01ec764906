#![forbid(unsafe_code)]

//! Copy-to-clipboard with a transient confirmation banner.
//!
//! The write is asynchronous and can fail (no permission, insecure context,
//! no clipboard API). [`copy_to_clipboard`] hands the caller a `Result`; the
//! caller decides what a failure looks like on the page via
//! [`Banner::failure`].

use core::time::Duration;
use std::fmt;

use crate::config::ClipboardConfig;

/// Clipboard errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The environment exposes no clipboard API.
    NotAvailable,
    /// The write was rejected (permission denied, document not focused, ...).
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAvailable => write!(f, "clipboard not available"),
            Self::Rejected(msg) => write!(f, "clipboard write rejected: {msg}"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Asynchronous system clipboard.
#[allow(async_fn_in_trait)]
pub trait ClipboardWriter {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Confirmation,
    Failure,
}

/// A fixed-position message appended to the page and removed after
/// `lifetime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    /// Inline `style` text for the banner element.
    pub css: String,
    pub lifetime: Duration,
}

impl Banner {
    #[must_use]
    pub fn confirmation(config: &ClipboardConfig) -> Self {
        Self {
            kind: BannerKind::Confirmation,
            text: config.confirmation_message.clone(),
            css: config.banner_css.clone(),
            lifetime: config.banner_duration(),
        }
    }

    /// The failure banner, if the page is configured to show one.
    #[must_use]
    pub fn failure(config: &ClipboardConfig) -> Option<Self> {
        config.failure_message.as_ref().map(|text| Self {
            kind: BannerKind::Failure,
            text: text.clone(),
            css: config.failure_css.clone(),
            lifetime: config.banner_duration(),
        })
    }
}

/// Write `text` to the clipboard and return the confirmation banner to show.
pub async fn copy_to_clipboard<C: ClipboardWriter>(
    clipboard: &C,
    text: &str,
    config: &ClipboardConfig,
) -> Result<Banner, ClipboardError> {
    clipboard.write_text(text).await?;
    crate::debug!(bytes = text.len(), "copied to clipboard");
    Ok(Banner::confirmation(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeClipboard;
    use pretty_assertions::assert_eq;

    #[test]
    fn success_yields_confirmation_banner() {
        let clipboard = FakeClipboard::default();
        let config = ClipboardConfig::default();
        let banner =
            pollster::block_on(copy_to_clipboard(&clipboard, "ana@example.com", &config)).unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("ana@example.com"));
        assert_eq!(banner.kind, BannerKind::Confirmation);
        assert_eq!(banner.text, "Copiado para a área de transferência!");
        assert_eq!(banner.lifetime, Duration::from_millis(3000));
        assert!(banner.css.contains("position: fixed"));
        assert!(banner.css.contains("var(--primary-color)"));
    }

    #[test]
    fn failure_is_returned_to_caller() {
        let clipboard = FakeClipboard::failing(ClipboardError::Rejected("denied".into()));
        let config = ClipboardConfig::default();
        let err = pollster::block_on(copy_to_clipboard(&clipboard, "x", &config)).unwrap_err();
        assert_eq!(err, ClipboardError::Rejected("denied".into()));
        assert_eq!(clipboard.contents(), None);
        assert_eq!(Banner::failure(&config), None);
    }

    #[test]
    fn failure_banner_is_opt_in() {
        let mut config = ClipboardConfig::default();
        config.failure_message = Some("Não foi possível copiar".into());
        let banner = Banner::failure(&config).unwrap();
        assert_eq!(banner.kind, BannerKind::Failure);
        assert!(banner.css.contains("#dc2626"));
    }
}
