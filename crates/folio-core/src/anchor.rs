#![forbid(unsafe_code)]

//! Smooth scrolling for in-page fragment links.

use crate::capability::ScrollTarget;

/// Extract the element id a fragment link points at.
///
/// `"#about"` → `Some("about")`. A bare `"#"` or a non-fragment href yields
/// `None`.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// What the host must do after an anchor click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorOutcome {
    /// Always `true`: fragment links never fall through to the browser's
    /// instant jump, even when the target is missing.
    pub prevent_default: bool,
    /// Id of the element scrolled to, if one was found.
    pub scrolled_to: Option<String>,
}

/// Handle a click on a fragment link.
///
/// `lookup` resolves an element id to a scroll target. When it finds nothing,
/// navigation is still suppressed and nothing scrolls.
pub fn handle_anchor_click<T, F>(href: &str, lookup: F) -> AnchorOutcome
where
    T: ScrollTarget,
    F: FnOnce(&str) -> Option<T>,
{
    let Some(id) = fragment_id(href) else {
        return AnchorOutcome {
            prevent_default: true,
            scrolled_to: None,
        };
    };

    match lookup(id) {
        Some(mut target) => {
            target.scroll_into_view_smoothly();
            AnchorOutcome {
                prevent_default: true,
                scrolled_to: Some(id.to_owned()),
            }
        }
        None => {
            crate::debug!(id, "anchor target not found");
            AnchorOutcome {
                prevent_default: true,
                scrolled_to: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeSection;
    use pretty_assertions::assert_eq;

    #[test]
    fn fragment_id_strips_hash() {
        assert_eq!(fragment_id("#contact"), Some("contact"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("/about#team"), None);
        assert_eq!(fragment_id(""), None);
    }

    #[test]
    fn found_target_scrolls_smoothly_to_start() {
        let mut section = FakeSection::default();
        let target = &mut section;
        let outcome = handle_anchor_click("#projects", move |id| {
            assert_eq!(id, "projects");
            Some(target)
        });
        assert_eq!(
            outcome,
            AnchorOutcome {
                prevent_default: true,
                scrolled_to: Some("projects".into()),
            }
        );
        assert_eq!(section.smooth_scrolls, 1);
    }

    #[test]
    fn missing_target_still_prevents_navigation() {
        let outcome = handle_anchor_click::<&mut FakeSection, _>("#nowhere", |_| None);
        assert!(outcome.prevent_default);
        assert_eq!(outcome.scrolled_to, None);
    }

    #[test]
    fn bare_hash_never_consults_lookup() {
        let outcome = handle_anchor_click::<&mut FakeSection, _>("#", |_| {
            panic!("lookup must not run for a bare hash")
        });
        assert!(outcome.prevent_default);
        assert_eq!(outcome.scrolled_to, None);
    }
}
