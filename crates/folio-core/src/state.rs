#![forbid(unsafe_code)]

//! Document-level UI flags.
//!
//! The page keeps these as class membership on shared DOM nodes. Here they are
//! named fields, changed only through setters that report whether anything
//! actually moved, which is what hosts use to log transitions once instead of
//! on every event.

/// Page-wide presentation state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    menu_open: bool,
    navbar_elevated: bool,
    dark_mode: bool,
}

impl UiState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            menu_open: false,
            navbar_elevated: false,
            dark_mode: false,
        }
    }

    #[must_use]
    pub const fn menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub const fn navbar_elevated(&self) -> bool {
        self.navbar_elevated
    }

    #[must_use]
    pub const fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Returns `true` if the value changed.
    pub fn set_menu_open(&mut self, open: bool) -> bool {
        replace_flag(&mut self.menu_open, open)
    }

    /// Returns `true` if the value changed.
    pub fn set_navbar_elevated(&mut self, elevated: bool) -> bool {
        replace_flag(&mut self.navbar_elevated, elevated)
    }

    /// Returns `true` if the value changed.
    pub fn set_dark_mode(&mut self, dark: bool) -> bool {
        replace_flag(&mut self.dark_mode, dark)
    }
}

fn replace_flag(slot: &mut bool, value: bool) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_report_changes_only() {
        let mut state = UiState::new();
        assert!(state.set_menu_open(true));
        assert!(!state.set_menu_open(true));
        assert!(state.menu_open());

        assert!(!state.set_navbar_elevated(false));
        assert!(state.set_navbar_elevated(true));
        assert!(state.navbar_elevated());

        assert!(state.set_dark_mode(true));
        assert!(state.set_dark_mode(false));
        assert!(!state.dark_mode());
    }
}
