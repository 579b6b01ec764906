//! Property-based invariant tests for the page features.
//!
//! Verifies:
//! 1. Nav toggle parity: even click counts restore, odd counts flip
//! 2. Nav link click always leaves menu and toggle inactive
//! 3. Navbar style is elevated iff scroll offset > threshold
//! 4. Form validation flags exactly the blank fields, and only then blocks
//! 5. Dark mode: two toggles restore class and stored text; reload re-applies
//! 6. Debounce: a burst inside `wait` yields one call with the last arguments
//! 7. Lazy load: after the swap, further notifications write nothing

use core::time::Duration;

use folio_core::config::{FormConfig, NavbarConfig, ThemeConfig};
use folio_core::debounce::Debouncer;
use folio_core::fake::{FakeBody, FakeField, FakeImage, FakeStyle, FakeToggle};
use folio_core::form::{is_blank, validate_submission};
use folio_core::lazy::{LazyImageTracker, LazyStep};
use folio_core::nav::NavMenu;
use folio_core::navbar::{NavbarStyle, apply_navbar_style};
use folio_core::storage::{MemoryStore, PreferenceStore};
use folio_core::theme::DarkMode;
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_field_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[ \t\n]{1,4}",
        "[a-zA-Z0-9@. ]{1,12}",
        " *[a-z]+ *",
    ]
}

fn arb_stored_preference() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("true".to_string())),
        Just(Some("false".to_string())),
        "[a-zA-Z ]{0,6}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn nav_toggle_parity(initial_toggle in any::<bool>(), initial_menu in any::<bool>(), clicks in 0usize..40) {
        let mut nav = NavMenu::bind(
            Some(FakeToggle::with_active(initial_toggle)),
            Some(FakeToggle::with_active(initial_menu)),
        ).unwrap();
        for _ in 0..clicks {
            nav.on_toggle_click();
        }
        let flipped = clicks % 2 == 1;
        prop_assert_eq!(nav.toggle().active, initial_toggle ^ flipped);
        prop_assert_eq!(nav.menu().active, initial_menu ^ flipped);
    }

    #[test]
    fn nav_link_always_closes(clicks in 0usize..10) {
        let mut nav = NavMenu::bind(Some(FakeToggle::default()), Some(FakeToggle::default())).unwrap();
        for _ in 0..clicks {
            nav.on_toggle_click();
        }
        nav.on_link_click();
        prop_assert!(!nav.toggle().active);
        prop_assert!(!nav.menu().active);
    }

    #[test]
    fn navbar_elevated_iff_above_threshold(scroll_y in -100.0f64..10_000.0, threshold in 0.0f64..500.0) {
        let config = NavbarConfig { threshold_px: threshold, ..NavbarConfig::default() };
        let mut navbar = FakeStyle::default();
        let style = apply_navbar_style(&mut navbar, scroll_y, &config);
        prop_assert_eq!(style.is_elevated(), scroll_y > threshold);
        prop_assert_eq!(navbar.get("background-color"), Some(style.background(&config)));
        prop_assert_eq!(NavbarStyle::for_scroll(threshold, threshold), NavbarStyle::Resting);
    }

    #[test]
    fn validation_flags_exactly_blank_fields(values in prop::collection::vec(arb_field_value(), 0..8)) {
        let config = FormConfig::default();
        let mut fields: Vec<FakeField> = values.iter().map(|v| FakeField::new(v)).collect();
        let outcome = validate_submission(fields.iter_mut(), &config);

        let expected: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(&outcome.blank_fields, &expected);
        prop_assert_eq!(outcome.prevent_default, !expected.is_empty());
        prop_assert_eq!(outcome.alert.is_some(), !expected.is_empty());
        for (field, value) in fields.iter().zip(&values) {
            let want = if is_blank(value) { &config.error_border } else { &config.default_border };
            prop_assert_eq!(field.border.as_ref(), Some(want));
        }
    }

    #[test]
    fn dark_mode_double_toggle_round_trips(initial in arb_stored_preference()) {
        let theme = DarkMode::new(&ThemeConfig::default());
        let mut store = match &initial {
            Some(v) => MemoryStore::with_entry("darkMode", v),
            None => MemoryStore::new(),
        };
        let mut body = FakeBody::default();
        let start = theme.restore(&mut body, &store);
        prop_assert_eq!(start, initial.as_deref() == Some("true"));

        let once = theme.toggle(&mut body, &mut store).unwrap();
        prop_assert_eq!(once, !start);

        let mut reloaded = FakeBody::default();
        prop_assert_eq!(theme.restore(&mut reloaded, &store), once);

        theme.toggle(&mut body, &mut store).unwrap();
        prop_assert_eq!(body.dark, start);
        let stored = store.get_item("darkMode").unwrap();
        prop_assert_eq!(stored.as_deref(), Some(if start { "true" } else { "false" }));
    }

    #[test]
    fn debounce_burst_yields_last_args(
        wait_ms in 1u64..100,
        gaps in prop::collection::vec(0u64..100, 1..20),
    ) {
        let wait = Duration::from_millis(wait_ms);
        let mut d = Debouncer::new(wait);
        let mut now = Duration::ZERO;
        for (i, gap) in gaps.iter().enumerate() {
            // Keep every call inside the quiet period of the previous one.
            now += Duration::from_millis(gap % wait_ms);
            prop_assert_eq!(d.poll(now), None);
            d.trigger(now, i);
        }
        prop_assert_eq!(d.poll(now + wait - Duration::from_nanos(1)), None);
        prop_assert_eq!(d.poll(now + wait), Some(gaps.len() - 1));
        prop_assert_eq!(d.poll(now + wait * 10), None);
    }

    #[test]
    fn lazy_swap_is_one_shot(pattern in prop::collection::vec(any::<bool>(), 1..20)) {
        let mut tracker = LazyImageTracker::new();
        let mut img = FakeImage::deferred("/media/foto.jpg");
        let mut loaded_at = None;
        for (i, intersecting) in pattern.iter().enumerate() {
            let before = img.writes;
            let step = tracker.on_intersection((), &mut img, *intersecting);
            match (loaded_at, step) {
                (None, LazyStep::Loaded) => loaded_at = Some(i),
                (None, LazyStep::Waiting) => prop_assert!(!intersecting),
                (Some(_), LazyStep::AlreadyLoaded) => prop_assert_eq!(img.writes, before),
                other => prop_assert!(false, "unexpected transition {:?}", other),
            }
        }
        let first_visible = pattern.iter().position(|v| *v);
        prop_assert_eq!(loaded_at, first_visible);
        prop_assert_eq!(img.src.is_some(), first_visible.is_some());
    }
}
