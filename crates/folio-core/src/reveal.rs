#![forbid(unsafe_code)]

//! Scroll-triggered fade-in for cards and sections.

use crate::capability::Revealable;
use crate::config::RevealConfig;

/// Options for a viewport-intersection watcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction that counts as intersecting.
    pub threshold: f64,
    /// CSS-style margin applied to the viewport before testing.
    pub root_margin: String,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            root_margin: "0px".into(),
        }
    }
}

impl From<&RevealConfig> for ObserverOptions {
    fn from(config: &RevealConfig) -> Self {
        Self {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        }
    }
}

/// One notification from an intersection watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntersectionEntry<T> {
    pub target: T,
    pub is_intersecting: bool,
}

impl<T> IntersectionEntry<T> {
    pub const fn new(target: T, is_intersecting: bool) -> Self {
        Self {
            target,
            is_intersecting,
        }
    }
}

/// Reveal every intersecting target. Returns how many were newly revealed.
///
/// Observation is never stopped, so a target can be reported again after it
/// leaves and re-enters the viewport; revealing twice has no further effect.
pub fn reveal_intersecting<R, I>(entries: I) -> usize
where
    R: Revealable,
    I: IntoIterator<Item = IntersectionEntry<R>>,
{
    let mut revealed = 0;
    for IntersectionEntry {
        mut target,
        is_intersecting,
    } in entries
    {
        if is_intersecting && !target.is_revealed() {
            target.reveal();
            revealed += 1;
        }
    }
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeCard;
    use pretty_assertions::assert_eq;

    #[test]
    fn options_come_from_config() {
        let options = ObserverOptions::from(&RevealConfig::default());
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn only_intersecting_targets_reveal() {
        let mut cards = vec![FakeCard::default(), FakeCard::default()];
        let (a, b) = cards.split_at_mut(1);
        let count = reveal_intersecting([
            IntersectionEntry::new(&mut a[0], true),
            IntersectionEntry::new(&mut b[0], false),
        ]);
        assert_eq!(count, 1);
        assert!(cards[0].revealed);
        assert!(!cards[1].revealed);
    }

    #[test]
    fn re_entering_is_idempotent() {
        let mut card = FakeCard::default();
        assert_eq!(reveal_intersecting([IntersectionEntry::new(&mut card, true)]), 1);
        assert_eq!(reveal_intersecting([IntersectionEntry::new(&mut card, false)]), 0);
        assert_eq!(reveal_intersecting([IntersectionEntry::new(&mut card, true)]), 0);
        assert!(card.revealed);
        assert_eq!(card.writes, 1);
    }
}
