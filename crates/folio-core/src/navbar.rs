#![forbid(unsafe_code)]

//! Navbar background and blur driven by scroll offset.

use crate::capability::StyleTarget;
use crate::config::NavbarConfig;

pub const BACKGROUND_PROPERTY: &str = "background-color";
pub const BACKDROP_PROPERTY: &str = "backdrop-filter";

/// The two navbar looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarStyle {
    /// At (or near) the top of the page.
    Resting,
    /// Scrolled past the threshold: translucent and blurred.
    Elevated,
}

impl NavbarStyle {
    /// Pure function of the scroll offset. The boundary is exclusive: an
    /// offset equal to the threshold is still resting. `NaN` is resting.
    #[must_use]
    pub fn for_scroll(scroll_y: f64, threshold_px: f64) -> Self {
        if scroll_y > threshold_px {
            Self::Elevated
        } else {
            Self::Resting
        }
    }

    #[must_use]
    pub fn background(self, config: &NavbarConfig) -> &str {
        match self {
            Self::Resting => &config.resting_background,
            Self::Elevated => &config.elevated_background,
        }
    }

    #[must_use]
    pub fn backdrop_filter(self, config: &NavbarConfig) -> &str {
        match self {
            Self::Resting => &config.resting_backdrop,
            Self::Elevated => &config.elevated_backdrop,
        }
    }

    #[must_use]
    pub const fn is_elevated(self) -> bool {
        matches!(self, Self::Elevated)
    }
}

/// Re-evaluate and write the navbar style for a scroll event.
///
/// Runs on every scroll event and always writes both properties.
pub fn apply_navbar_style<S: StyleTarget>(
    navbar: &mut S,
    scroll_y: f64,
    config: &NavbarConfig,
) -> NavbarStyle {
    let style = NavbarStyle::for_scroll(scroll_y, config.threshold_px);
    navbar.set_style(BACKGROUND_PROPERTY, style.background(config));
    navbar.set_style(BACKDROP_PROPERTY, style.backdrop_filter(config));
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeStyle;
    use pretty_assertions::assert_eq;

    #[test]
    fn boundary_is_exclusive() {
        assert_eq!(NavbarStyle::for_scroll(0.0, 50.0), NavbarStyle::Resting);
        assert_eq!(NavbarStyle::for_scroll(50.0, 50.0), NavbarStyle::Resting);
        assert_eq!(NavbarStyle::for_scroll(50.5, 50.0), NavbarStyle::Elevated);
        assert_eq!(NavbarStyle::for_scroll(f64::NAN, 50.0), NavbarStyle::Resting);
    }

    #[test]
    fn apply_writes_translucent_blur_past_threshold() {
        let config = NavbarConfig::default();
        let mut navbar = FakeStyle::default();

        let style = apply_navbar_style(&mut navbar, 51.0, &config);
        assert!(style.is_elevated());
        assert_eq!(
            navbar.get(BACKGROUND_PROPERTY),
            Some("rgba(255, 255, 255, 0.95)")
        );
        assert_eq!(navbar.get(BACKDROP_PROPERTY), Some("blur(10px)"));

        let style = apply_navbar_style(&mut navbar, 50.0, &config);
        assert_eq!(style, NavbarStyle::Resting);
        assert_eq!(
            navbar.get(BACKGROUND_PROPERTY),
            Some("var(--background-primary)")
        );
        assert_eq!(navbar.get(BACKDROP_PROPERTY), Some("none"));
    }

    #[test]
    fn every_scroll_event_writes() {
        let config = NavbarConfig::default();
        let mut navbar = FakeStyle::default();
        apply_navbar_style(&mut navbar, 10.0, &config);
        apply_navbar_style(&mut navbar, 20.0, &config);
        assert_eq!(navbar.writes, 4);
    }
}
