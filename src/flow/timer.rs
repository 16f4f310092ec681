//! Cancellable deferred events.
//!
//! Display pauses ("show the result for two seconds, then start the next
//! round") are timers holding the event to emit. The scheduler runs on an
//! explicit clock advanced by the host, so nothing fires behind the game's
//! back and tests control time exactly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Unique identifier for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Timer<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// Timers owned by one flow instance.
#[derive(Clone, Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    pending: Vec<Timer<E>>,
}

impl<E> Scheduler<E> {
    /// Create a scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }

    /// Current clock value.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Emit `event` once `delay` has elapsed.
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        self.pending.push(Timer {
            id,
            due: self.now + delay,
            event,
        });
        tracing::trace!(%id, ?delay, "timer scheduled");
        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        let cancelled = self.pending.len() != before;
        if cancelled {
            tracing::trace!(%id, "timer cancelled");
        }
        cancelled
    }

    /// Cancel every pending timer. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            tracing::trace!(dropped, "pending timers cancelled");
        }
        dropped
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Remove and return the earliest timer due at or before `deadline`,
    /// moving the clock to its due time.
    ///
    /// Timers due at the same instant fire in scheduling order. Call
    /// repeatedly, handling each event before the next, so that handling
    /// one event can still cancel later ones.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<E> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= deadline)
            .min_by_key(|(_, timer)| (timer.due, timer.id))
            .map(|(index, _)| index)?;

        let timer = self.pending.remove(index);
        self.now = self.now.max(timer.due);
        tracing::trace!(id = %timer.id, "timer fired");
        Some(timer.event)
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(3), "late");
        scheduler.schedule(secs(1), "early");
        scheduler.schedule(secs(1), "early-second");

        assert_eq!(scheduler.pop_due(secs(5)), Some("early"));
        assert_eq!(scheduler.pop_due(secs(5)), Some("early-second"));
        assert_eq!(scheduler.now(), secs(1));
        assert_eq!(scheduler.pop_due(secs(5)), Some("late"));
        assert_eq!(scheduler.pop_due(secs(5)), None);
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(2), ());

        assert_eq!(scheduler.pop_due(secs(1)), None);
        scheduler.advance_to(secs(1));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(secs(2)), Some(()));
    }

    #[test]
    fn test_delay_is_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(secs(10));
        scheduler.schedule(secs(2), "x");

        assert_eq!(scheduler.pop_due(secs(11)), None);
        assert_eq!(scheduler.pop_due(secs(12)), Some("x"));
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let keep = scheduler.schedule(secs(1), "keep");
        let drop = scheduler.schedule(secs(1), "drop");

        assert!(scheduler.cancel(drop));
        assert!(!scheduler.cancel(drop));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.pop_due(secs(1)), Some("keep"));
        assert!(!scheduler.cancel(keep), "already fired");
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(secs(1), 1);
        scheduler.schedule(secs(2), 2);

        assert_eq!(scheduler.cancel_all(), 2);
        assert_eq!(scheduler.cancel_all(), 0);
        assert_eq!(scheduler.pop_due(secs(10)), None);
    }

    #[test]
    fn test_clock_never_moves_back() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.advance_to(secs(5));
        scheduler.advance_to(secs(3));
        assert_eq!(scheduler.now(), secs(5));
    }
}
