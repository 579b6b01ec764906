#![forbid(unsafe_code)]

//! One-shot deferred image loading.

use std::collections::HashSet;
use std::hash::Hash;

use crate::capability::LazyLoadable;

/// Result of one intersection notification for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LazyStep {
    /// Not in view yet; keep watching.
    Waiting,
    /// Source swapped in just now.
    Loaded,
    /// Already swapped earlier; nothing written.
    AlreadyLoaded,
    /// The deferred attribute disappeared; nothing to load.
    MissingSource,
}

impl LazyStep {
    /// Whether the host should stop watching this image.
    #[must_use]
    pub const fn stop_observing(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

/// Tracks which images have been swapped so each one is written at most once.
///
/// The browser can deliver a queued notification after `unobserve`, so the
/// tracker, not the watcher, is what guarantees the one-shot behavior.
#[derive(Debug, Clone)]
pub struct LazyImageTracker<K> {
    done: HashSet<K>,
}

impl<K> Default for LazyImageTracker<K> {
    fn default() -> Self {
        Self {
            done: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> LazyImageTracker<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one notification for the image identified by `key`.
    pub fn on_intersection<L: LazyLoadable>(
        &mut self,
        key: K,
        mut image: L,
        is_intersecting: bool,
    ) -> LazyStep {
        if self.done.contains(&key) {
            return LazyStep::AlreadyLoaded;
        }
        if !is_intersecting {
            return LazyStep::Waiting;
        }

        let step = match image.deferred_source() {
            Some(src) => {
                image.set_source(&src);
                image.clear_lazy_marker();
                LazyStep::Loaded
            }
            None => {
                crate::warn!("lazy image lost its deferred source");
                LazyStep::MissingSource
            }
        };
        self.done.insert(key);
        step
    }

    #[must_use]
    pub fn is_done(&self, key: &K) -> bool {
        self.done.contains(key)
    }

    #[must_use]
    pub fn done_count(&self) -> usize {
        self.done.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeImage;
    use pretty_assertions::assert_eq;

    #[test]
    fn swaps_source_once_visible() {
        let mut tracker = LazyImageTracker::new();
        let mut img = FakeImage::deferred("/media/projeto.png");

        assert_eq!(tracker.on_intersection(0, &mut img, false), LazyStep::Waiting);
        assert_eq!(img.src, None);
        assert!(img.lazy);

        let step = tracker.on_intersection(0, &mut img, true);
        assert_eq!(step, LazyStep::Loaded);
        assert!(step.stop_observing());
        assert_eq!(img.src.as_deref(), Some("/media/projeto.png"));
        assert!(!img.lazy);
    }

    #[test]
    fn later_notifications_write_nothing() {
        let mut tracker = LazyImageTracker::new();
        let mut img = FakeImage::deferred("a.png");
        tracker.on_intersection(7, &mut img, true);
        let writes = img.writes;

        img.data_src = Some("b.png".into());
        assert_eq!(tracker.on_intersection(7, &mut img, true), LazyStep::AlreadyLoaded);
        assert_eq!(img.writes, writes);
        assert_eq!(img.src.as_deref(), Some("a.png"));
        assert!(tracker.is_done(&7));
    }

    #[test]
    fn missing_source_stops_watching_without_writes() {
        let mut tracker = LazyImageTracker::new();
        let mut img = FakeImage::default();
        let step = tracker.on_intersection(1, &mut img, true);
        assert_eq!(step, LazyStep::MissingSource);
        assert!(step.stop_observing());
        assert_eq!(img.writes, 0);
        assert_eq!(tracker.done_count(), 1);
    }
}
