#![forbid(unsafe_code)]

//! Mobile navigation toggle.

use crate::capability::Toggleable;

/// The hamburger toggle and the menu it opens.
///
/// Both elements carry their own `active` flag and are flipped independently,
/// so rapid clicks need no guard: every click is one toggle of each.
#[derive(Debug, Clone)]
pub struct NavMenu<T> {
    toggle: T,
    menu: T,
}

impl<T: Toggleable> NavMenu<T> {
    /// Bind the feature. Returns `None` when either element is missing, which
    /// leaves the page without a mobile menu rather than failing.
    pub fn bind(toggle: Option<T>, menu: Option<T>) -> Option<Self> {
        match (toggle, menu) {
            (Some(toggle), Some(menu)) => Some(Self { toggle, menu }),
            _ => {
                crate::debug!("nav toggle or menu missing, mobile menu disabled");
                None
            }
        }
    }

    /// Handle a click on the toggle. Returns the menu's new state.
    pub fn on_toggle_click(&mut self) -> bool {
        let open = self.menu.toggle_active();
        self.toggle.toggle_active();
        crate::trace!(open, "nav toggle clicked");
        open
    }

    /// Handle a click on any navigation link: the menu always ends closed.
    pub fn on_link_click(&mut self) {
        self.menu.set_active(false);
        self.toggle.set_active(false);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu.is_active()
    }

    #[must_use]
    pub fn toggle(&self) -> &T {
        &self.toggle
    }

    #[must_use]
    pub fn menu(&self) -> &T {
        &self.menu
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeToggle;

    #[test]
    fn missing_element_disables_feature() {
        assert!(NavMenu::bind(Some(FakeToggle::default()), None).is_none());
        assert!(NavMenu::<FakeToggle>::bind(None, Some(FakeToggle::default())).is_none());
        assert!(NavMenu::<FakeToggle>::bind(None, None).is_none());
    }

    #[test]
    fn toggle_flips_both_elements() {
        let mut nav =
            NavMenu::bind(Some(FakeToggle::default()), Some(FakeToggle::default())).unwrap();
        assert!(nav.on_toggle_click());
        assert!(nav.toggle().active && nav.menu().active);
        assert!(!nav.on_toggle_click());
        assert!(!nav.toggle().active && !nav.menu().active);
    }

    #[test]
    fn link_click_closes_menu_from_any_state() {
        let mut nav =
            NavMenu::bind(Some(FakeToggle::default()), Some(FakeToggle::default())).unwrap();
        nav.on_link_click();
        assert!(!nav.is_open());

        nav.on_toggle_click();
        nav.on_link_click();
        assert!(!nav.is_open());
        assert!(!nav.toggle().active);
    }

    #[test]
    fn desynchronized_flags_flip_independently() {
        let mut nav = NavMenu::bind(
            Some(FakeToggle::with_active(true)),
            Some(FakeToggle::default()),
        )
        .unwrap();
        nav.on_toggle_click();
        assert!(nav.menu().active);
        assert!(!nav.toggle().active);
    }
}
