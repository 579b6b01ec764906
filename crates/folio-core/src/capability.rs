#![forbid(unsafe_code)]

//! Typed capabilities the page exposes to the feature controllers.
//!
//! The browser binds behavior to the document through loosely typed class
//! names and attributes. Each trait here names one of those bindings so the
//! controllers can be written (and tested) without a rendering surface:
//!
//! | Trait | DOM binding |
//! |-------|-------------|
//! | [`Toggleable`] | `active` class on the nav toggle and menu |
//! | [`Revealable`] | `fade-in-up` class on cards and sections |
//! | [`LazyLoadable`] | `data-src` → `src`, `lazy` class on images |
//! | [`StyleTarget`] | inline style properties |
//! | [`FormField`] | value and border color of a required field |
//! | [`ButtonControl`] | label text and `disabled` on a submit button |
//! | [`BodyTheme`] | `dark-mode` class on `<body>` |
//! | [`ScrollTarget`] | `scrollIntoView` on an anchor target |

/// Class marking the open mobile menu and its toggle.
pub const ACTIVE_CLASS: &str = "active";
/// Class that triggers the reveal transition.
pub const FADE_IN_UP_CLASS: &str = "fade-in-up";
/// Class marking an image whose real source has not been loaded yet.
pub const LAZY_CLASS: &str = "lazy";
/// Class applied to `<body>` while the dark theme is active.
pub const DARK_MODE_CLASS: &str = "dark-mode";

/// An element with an on/off "active" state.
pub trait Toggleable {
    fn is_active(&self) -> bool;

    fn set_active(&mut self, active: bool);

    /// Flip the state and return the new value.
    fn toggle_active(&mut self) -> bool {
        let next = !self.is_active();
        self.set_active(next);
        next
    }
}

/// An element that plays an entrance transition once it is visible.
pub trait Revealable {
    fn is_revealed(&self) -> bool;

    fn reveal(&mut self);
}

/// An image whose real source is held back until it nears the viewport.
pub trait LazyLoadable {
    /// The deferred source, if the element still carries one.
    fn deferred_source(&self) -> Option<String>;

    fn set_source(&mut self, src: &str);

    fn clear_lazy_marker(&mut self);
}

/// Inline style access.
pub trait StyleTarget {
    fn set_style(&mut self, property: &str, value: &str);
}

/// A required form field.
pub trait FormField {
    fn value(&self) -> String;

    fn set_border_color(&mut self, color: &str);
}

/// A submit control whose label and enabled state can be swapped.
pub trait ButtonControl {
    fn label(&self) -> String;

    fn set_label(&mut self, label: &str);

    fn is_disabled(&self) -> bool;

    fn set_disabled(&mut self, disabled: bool);
}

/// The document body's theme flag.
pub trait BodyTheme {
    fn is_dark(&self) -> bool;

    fn set_dark(&mut self, dark: bool);
}

/// An element that can be scrolled into view.
pub trait ScrollTarget {
    /// Animate the page so the element's top edge meets the viewport's top.
    fn scroll_into_view_smoothly(&mut self);
}

impl<T: Revealable + ?Sized> Revealable for &mut T {
    fn is_revealed(&self) -> bool {
        (**self).is_revealed()
    }

    fn reveal(&mut self) {
        (**self).reveal();
    }
}

impl<T: LazyLoadable + ?Sized> LazyLoadable for &mut T {
    fn deferred_source(&self) -> Option<String> {
        (**self).deferred_source()
    }

    fn set_source(&mut self, src: &str) {
        (**self).set_source(src);
    }

    fn clear_lazy_marker(&mut self) {
        (**self).clear_lazy_marker();
    }
}

impl<T: FormField + ?Sized> FormField for &mut T {
    fn value(&self) -> String {
        (**self).value()
    }

    fn set_border_color(&mut self, color: &str) {
        (**self).set_border_color(color);
    }
}

impl<T: ScrollTarget + ?Sized> ScrollTarget for &mut T {
    fn scroll_into_view_smoothly(&mut self) {
        (**self).scroll_into_view_smoothly();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Flag(bool);

    impl Toggleable for Flag {
        fn is_active(&self) -> bool {
            self.0
        }

        fn set_active(&mut self, active: bool) {
            self.0 = active;
        }
    }

    #[test]
    fn toggle_active_returns_new_state() {
        let mut flag = Flag::default();
        assert!(flag.toggle_active());
        assert!(flag.is_active());
        assert!(!flag.toggle_active());
        assert!(!flag.is_active());
    }
}
