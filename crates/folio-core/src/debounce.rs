#![forbid(unsafe_code)]

//! Trailing-edge debouncing on host-supplied time.
//!
//! Every trigger cancels the pending call and reschedules it `wait` after the
//! latest trigger. The callback runs at most once per quiet period, with the
//! arguments of the last trigger in that period.
//!
//! ```
//! use core::time::Duration;
//! use folio_core::debounce::Debouncer;
//!
//! let mut d = Debouncer::new(Duration::from_millis(10));
//! d.trigger(Duration::from_millis(0), 'a');
//! d.trigger(Duration::from_millis(5), 'b');
//! assert_eq!(d.poll(Duration::from_millis(14)), None);
//! assert_eq!(d.poll(Duration::from_millis(15)), Some('b'));
//! assert_eq!(d.poll(Duration::from_millis(99)), None);
//! ```

use core::time::Duration;

#[derive(Debug, Clone)]
struct Pending<A> {
    deadline: Duration,
    args: A,
}

/// The scheduling half of a debounced call: deadlines and latest arguments.
#[derive(Debug, Clone)]
pub struct Debouncer<A> {
    wait: Duration,
    pending: Option<Pending<A>>,
}

impl<A> Debouncer<A> {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Replace any pending call with `args`, due `wait` after `now`.
    /// Returns the new deadline.
    pub fn trigger(&mut self, now: Duration, args: A) -> Duration {
        let deadline = now.saturating_add(self.wait);
        self.pending = Some(Pending { deadline, args });
        deadline
    }

    /// Take the pending arguments if their deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<A> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.args),
            _ => None,
        }
    }

    /// Take the pending arguments regardless of deadline.
    ///
    /// Used when an external timer (such as `setTimeout`) is the authority on
    /// when the quiet period ended.
    pub fn flush(&mut self) -> Option<A> {
        self.pending.take().map(|p| p.args)
    }

    /// Drop the pending call.
    pub fn cancel(&mut self) -> Option<A> {
        self.flush()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A callback wrapped with a [`Debouncer`].
pub struct Debounced<A, F> {
    debouncer: Debouncer<A>,
    callback: F,
}

/// Wrap `callback` so that bursts of calls collapse into one trailing call.
pub fn debounce<A, F: FnMut(A)>(callback: F, wait: Duration) -> Debounced<A, F> {
    Debounced {
        debouncer: Debouncer::new(wait),
        callback,
    }
}

impl<A, F: FnMut(A)> Debounced<A, F> {
    /// Record a call at `now`. Nothing runs until [`Self::run_due`].
    pub fn call(&mut self, now: Duration, args: A) -> Duration {
        self.debouncer.trigger(now, args)
    }

    /// Run the callback if the quiet period has elapsed. Returns whether it ran.
    pub fn run_due(&mut self, now: Duration) -> bool {
        match self.debouncer.poll(now) {
            Some(args) => {
                (self.callback)(args);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }
}

impl<A, F> std::fmt::Debug for Debounced<A, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.debouncer.wait)
            .field("pending", &self.debouncer.pending.is_some())
            .finish()
    }
}
