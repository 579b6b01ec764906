#![forbid(unsafe_code)]

//! Host-driven time: a monotonic clock the host advances explicitly, and a
//! queue of one-shot timers drained against it.
//!
//! Nothing here blocks or spawns. The browser adapter maps timers onto
//! `setTimeout`; tests advance the clock and drain the queue.

use core::time::Duration;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

#[derive(Debug, Clone)]
struct Timer<T> {
    seq: u64,
    deadline: Duration,
    task: T,
}

/// One-shot timers ordered by deadline, ties broken by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_seq: u64,
    timers: Vec<Timer<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_seq: 0,
            timers: Vec::new(),
        }
    }

    /// Schedule `task` to become due `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            seq,
            deadline: now.saturating_add(delay),
            task,
        });
    }

    /// Remove and return every task due at `now`, earliest first.
    pub fn drain_due(&mut self, now: Duration) -> Vec<T> {
        let mut due = Vec::new();
        let mut idx = 0;
        while idx < self.timers.len() {
            if self.timers[idx].deadline <= now {
                due.push(self.timers.remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|t| (t.deadline, t.seq));
        due.into_iter().map(|t| t.task).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn deterministic_clock_advances_monotonically() {
        let mut c = DeterministicClock::new();
        assert_eq!(c.now(), Duration::ZERO);

        c.advance(ms(10));
        c.advance(ms(5));
        assert_eq!(c.now(), ms(15));

        // Saturation: don't panic or wrap.
        c.set(Duration::MAX);
        c.advance(Duration::from_secs(1));
        assert_eq!(c.now(), Duration::MAX);
    }

    #[test]
    fn drains_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(0), ms(30), "c");
        q.schedule(ms(0), ms(10), "a");
        q.schedule(ms(5), ms(5), "b");

        assert!(q.drain_due(ms(9)).is_empty());
        assert_eq!(q.drain_due(ms(10)), vec!["a", "b"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(ms(100)), vec!["c"]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_scheduling_order() {
        let mut q = TimerQueue::new();
        q.schedule(ms(5), ms(5), 1);
        q.schedule(ms(0), ms(10), 2);
        q.schedule(ms(10), Duration::ZERO, 3);
        assert_eq!(q.drain_due(ms(10)), vec![1, 2, 3]);
    }
}
