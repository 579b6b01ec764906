#![forbid(unsafe_code)]

//! Host-tunable configuration.
//!
//! Every field has a default matching the production page, so a host only
//! needs to send the values it wants to change:
//!
//! ```
//! use folio_core::FolioConfig;
//!
//! let config = FolioConfig::from_json(r#"{ "navbar": { "threshold_px": 80.0 } }"#).unwrap();
//! assert_eq!(config.navbar.threshold_px, 80.0);
//! assert_eq!(config.theme.storage_key, "darkMode");
//! ```

use core::time::Duration;

use bitflags::bitflags;
use serde::de::{self, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

bitflags! {
    /// Page features that can be switched on or off independently.
    ///
    /// Encoded in JSON as a list of kebab-case names, e.g.
    /// `["nav-toggle", "dark-mode"]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        const NAV_TOGGLE      = 1 << 0;
        const SMOOTH_SCROLL   = 1 << 1;
        const NAVBAR_SCROLL   = 1 << 2;
        const FORM_VALIDATION = 1 << 3;
        const REVEAL          = 1 << 4;
        const CLIPBOARD       = 1 << 5;
        const BUTTON_LOADING  = 1 << 6;
        const LAZY_IMAGES     = 1 << 7;
        const DARK_MODE       = 1 << 8;
        const SCROLL_DEBOUNCE = 1 << 9;
    }
}

impl Default for Features {
    fn default() -> Self {
        Self::all()
    }
}

impl Features {
    /// Look up a single feature by name. Accepts `nav-toggle`, `nav_toggle`
    /// and `NAV_TOGGLE`.
    #[must_use]
    pub fn from_feature_name(name: &str) -> Option<Self> {
        let canonical = name.trim().replace('-', "_").to_ascii_uppercase();
        Self::from_name(&canonical)
    }

    /// Kebab-case names of the enabled features, in bit order.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.iter_names()
            .map(|(name, _)| name.to_ascii_lowercase().replace('_', "-"))
    }
}

impl Serialize for Features {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let names: Vec<String> = self.names().collect();
        let mut seq = serializer.serialize_seq(Some(names.len()))?;
        for name in &names {
            seq.serialize_element(name)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Features {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        let mut features = Features::empty();
        for name in &names {
            let flag = Features::from_feature_name(name)
                .ok_or_else(|| de::Error::custom(format!("unknown feature `{name}`")))?;
            features |= flag;
        }
        Ok(features)
    }
}

/// Minimum severity forwarded to the browser console.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Mobile navigation toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_id: String,
    pub menu_id: String,
    pub link_selector: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_id: "nav-toggle".into(),
            menu_id: "nav-menu".into(),
            link_selector: ".nav-link".into(),
        }
    }
}

/// Navbar appearance driven by scroll offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub selector: String,
    /// Offsets strictly above this switch to the elevated style.
    pub threshold_px: f64,
    pub resting_background: String,
    pub resting_backdrop: String,
    pub elevated_background: String,
    pub elevated_backdrop: String,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            selector: ".navbar".into(),
            threshold_px: 50.0,
            resting_background: "var(--background-primary)".into(),
            resting_backdrop: "none".into(),
            elevated_background: "rgba(255, 255, 255, 0.95)".into(),
            elevated_backdrop: "blur(10px)".into(),
        }
    }
}

/// Contact form validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub selector: String,
    pub required_selector: String,
    pub error_border: String,
    pub default_border: String,
    pub alert_message: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            selector: ".contact-form form".into(),
            required_selector: "[required]".into(),
            error_border: "#dc2626".into(),
            default_border: "var(--border-color)".into(),
            alert_message: "Por favor, preencha todos os campos obrigatórios.".into(),
        }
    }
}

/// Fade-in of cards and sections as they scroll into view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".card, .project-card, .skill-category".into(),
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
        }
    }
}

/// Copy-to-clipboard confirmation banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardConfig {
    pub confirmation_message: String,
    pub banner_css: String,
    pub banner_ms: u64,
    /// Banner shown when the clipboard write fails. `None` shows nothing.
    pub failure_message: Option<String>,
    pub failure_css: String,
}

impl ClipboardConfig {
    #[must_use]
    pub const fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_ms)
    }
}

const BANNER_CSS: &str = "position: fixed; top: 20px; right: 20px; \
    background: var(--primary-color); color: white; padding: 10px 20px; \
    border-radius: var(--border-radius); z-index: 9999; animation: fadeInUp 0.3s ease;";

const FAILURE_BANNER_CSS: &str = "position: fixed; top: 20px; right: 20px; \
    background: #dc2626; color: white; padding: 10px 20px; \
    border-radius: var(--border-radius); z-index: 9999; animation: fadeInUp 0.3s ease;";

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            confirmation_message: "Copiado para a área de transferência!".into(),
            banner_css: BANNER_CSS.into(),
            banner_ms: 3000,
            failure_message: None,
            failure_css: FAILURE_BANNER_CSS.into(),
        }
    }
}

/// Submit button loading state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub selector: String,
    pub loading_label: String,
    pub restore_ms: u64,
}

impl ButtonConfig {
    #[must_use]
    pub const fn restore_after(&self) -> Duration {
        Duration::from_millis(self.restore_ms)
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            selector: ".btn".into(),
            loading_label: "Enviando...".into(),
            restore_ms: 3000,
        }
    }
}

/// Deferred image loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LazyConfig {
    pub selector: String,
    pub source_attribute: String,
}

impl Default for LazyConfig {
    fn default() -> Self {
        Self {
            selector: "img[data-src]".into(),
            source_attribute: "data-src".into(),
        }
    }
}

/// Dark mode persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "darkMode".into(),
        }
    }
}

/// In-page anchors and the debounced scroll hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_selector: String,
    pub debounce_ms: u64,
}

impl ScrollConfig {
    #[must_use]
    pub const fn debounce_wait(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".into(),
            debounce_ms: 10,
        }
    }
}

/// Top-level configuration for every page feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub features: Features,
    pub log_level: LogLevel,
    pub nav: NavConfig,
    pub navbar: NavbarConfig,
    pub form: FormConfig,
    pub reveal: RevealConfig,
    pub clipboard: ClipboardConfig,
    pub button: ButtonConfig,
    pub lazy: LazyConfig,
    pub theme: ThemeConfig,
    pub scroll: ScrollConfig,
}

impl FolioConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the enabled feature set.
    #[must_use]
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Set the console log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the navbar scroll threshold in pixels.
    #[must_use]
    pub fn with_navbar_threshold(mut self, threshold_px: f64) -> Self {
        self.navbar.threshold_px = threshold_px;
        self
    }

    /// Set the scroll debounce wait.
    #[must_use]
    pub fn with_debounce_wait(mut self, wait: Duration) -> Self {
        self.scroll.debounce_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Show a banner when a clipboard write fails.
    #[must_use]
    pub fn with_clipboard_failure_message(mut self, message: impl Into<String>) -> Self {
        self.clipboard.failure_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn is_enabled(&self, feature: Features) -> bool {
        self.features.contains(feature)
    }

    /// Reject values no page could use.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.navbar.threshold_px;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(FolioError::Config(format!(
                "navbar.threshold_px must be a finite, non-negative number (got {threshold})"
            )));
        }
        let reveal = self.reveal.threshold;
        if !(0.0..=1.0).contains(&reveal) {
            return Err(FolioError::Config(format!(
                "reveal.threshold must be within 0.0..=1.0 (got {reveal})"
            )));
        }
        if self.theme.storage_key.trim().is_empty() {
            return Err(FolioError::Config("theme.storage_key must not be empty".into()));
        }
        if self.lazy.source_attribute.trim().is_empty() {
            return Err(FolioError::Config(
                "lazy.source_attribute must not be empty".into(),
            ));
        }
        Ok(())
    }
}
