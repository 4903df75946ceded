//! Keyed trailing-edge debouncing
//!
//! One [`Debouncer`] serves every delayed task of an editor session. Each key
//! holds at most one pending action; scheduling again under the same key
//! replaces it and restarts its delay. Time is passed in explicitly so the
//! runtime decides when to poll and tests can drive the clock.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Longest delay a task can be scheduled with. Larger delays are clamped.
pub const MAX_DELAY: Duration = Duration::from_secs(24 * 60 * 60);

/// The delayed tasks of an editor session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKey {
    Highlight,
    LineNumbers,
    HistorySnapshot,
    AutoSave,
    /// Return a success/error status to "Ready"
    StatusClear,
}

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    /// Scheduling order, breaks ties between equal deadlines
    seq: u64,
    action: T,
}

/// Pending actions keyed by `K`, each released once its delay has elapsed
/// without being rescheduled.
#[derive(Debug)]
pub struct Debouncer<K, T> {
    pending: HashMap<K, Pending<T>>,
    next_seq: u64,
}

impl<K: Eq + Hash + Clone, T> Debouncer<K, T> {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `action` to run `delay` after `now`, replacing any action
    /// still pending under `key`. Returns the replaced action, if any.
    ///
    /// `delay` is capped at [`MAX_DELAY`].
    pub fn schedule(&mut self, now: Instant, key: K, delay: Duration, action: T) -> Option<T> {
        let deadline = now
            .checked_add(delay.min(MAX_DELAY))
            .unwrap_or(now);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending
            .insert(
                key,
                Pending {
                    deadline,
                    seq,
                    action,
                },
            )
            .map(|old| old.action)
    }

    /// Drop the pending action for `key` without running it
    pub fn cancel(&mut self, key: &K) -> Option<T> {
        self.pending.remove(key).map(|p| p.action)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline among pending actions
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    /// Remove and return every action whose deadline is at or before `now`,
    /// ordered by deadline (then by scheduling order).
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, T)> {
        let due_keys: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(k, _)| k.clone())
            .collect();

        let mut due: Vec<(K, Pending<T>)> = due_keys
            .into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|p| (k, p)))
            .collect();
        due.sort_by_key(|(_, p)| (p.deadline, p.seq));
        due.into_iter().map(|(k, p)| (k, p.action)).collect()
    }
}

impl<K: Eq + Hash + Clone, T> Default for Debouncer<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Debouncer of plain callbacks, for callers that do not route actions
/// through messages.
pub type CallbackDebouncer<K> = Debouncer<K, Box<dyn FnOnce()>>;

/// Run every due callback in deadline order. Returns how many ran.
pub fn run_due<K: Eq + Hash + Clone>(debouncer: &mut CallbackDebouncer<K>, now: Instant) -> usize {
    let due = debouncer.take_due(now);
    let count = due.len();
    for (_, callback) in due {
        callback();
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_action_fires_after_delay() {
        let t0 = Instant::now();
        let mut d = Debouncer::new();
        d.schedule(t0, TaskKey::Highlight, ms(150), "hl");

        assert!(d.take_due(t0 + ms(149)).is_empty());
        assert_eq!(d.take_due(t0 + ms(150)), vec![(TaskKey::Highlight, "hl")]);
        // Exactly once
        assert!(d.take_due(t0 + ms(1000)).is_empty());
    }

    #[test]
    fn test_rescheduling_collapses_to_last_action() {
        let t0 = Instant::now();
        let mut d = Debouncer::new();
        for i in 0..10u64 {
            d.schedule(t0 + ms(i * 10), TaskKey::Highlight, ms(150), i);
        }

        // 150ms after the first call, but only 60ms after the last
        assert!(d.take_due(t0 + ms(150)).is_empty());
        assert_eq!(d.take_due(t0 + ms(240)), vec![(TaskKey::Highlight, 9)]);
        assert!(d.is_empty());
    }

    #[test]
    fn test_keys_are_independent() {
        let t0 = Instant::now();
        let mut d = Debouncer::new();
        d.schedule(t0, TaskKey::Highlight, ms(150), "hl");
        d.schedule(t0, TaskKey::AutoSave, ms(2000), "save");

        assert_eq!(d.cancel(&TaskKey::Highlight), Some("hl"));
        assert!(d.is_pending(&TaskKey::AutoSave));
        assert!(d.take_due(t0 + ms(500)).is_empty());
        assert_eq!(d.take_due(t0 + ms(2000)), vec![(TaskKey::AutoSave, "save")]);
    }

    #[test]
    fn test_due_actions_ordered_by_deadline() {
        let t0 = Instant::now();
        let mut d = Debouncer::new();
        d.schedule(t0, TaskKey::AutoSave, ms(300), "save");
        d.schedule(t0, TaskKey::HistorySnapshot, ms(200), "history");
        d.schedule(t0, TaskKey::LineNumbers, ms(100), "lines");
        d.schedule(t0, TaskKey::Highlight, ms(100), "hl");

        let order: Vec<_> = d.take_due(t0 + ms(300)).into_iter().map(|(_, a)| a).collect();
        assert_eq!(order, vec!["lines", "hl", "history", "save"]);
    }

    #[test]
    fn test_next_deadline_tracks_earliest() {
        let t0 = Instant::now();
        let mut d: Debouncer<TaskKey, ()> = Debouncer::new();
        assert_eq!(d.next_deadline(), None);
        d.schedule(t0, TaskKey::AutoSave, ms(2000), ());
        d.schedule(t0, TaskKey::LineNumbers, ms(100), ());
        assert_eq!(d.next_deadline(), Some(t0 + ms(100)));
    }

    #[test]
    fn test_huge_delay_is_clamped() {
        let t0 = Instant::now();
        let mut d = Debouncer::new();
        d.schedule(t0, TaskKey::AutoSave, Duration::MAX, "save");

        assert!(d.is_pending(&TaskKey::AutoSave));
        assert_eq!(d.next_deadline(), Some(t0 + MAX_DELAY));
        assert!(d.take_due(t0 + ms(60_000)).is_empty());
        assert_eq!(d.take_due(t0 + MAX_DELAY), vec![(TaskKey::AutoSave, "save")]);
    }

    #[test]
    fn test_schedule_returns_replaced_action() {
        let t0 = Instant::now();
        let mut d = Debouncer::new();
        assert_eq!(d.schedule(t0, "k", ms(10), 1), None);
        assert_eq!(d.schedule(t0, "k", ms(10), 2), Some(1));
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn test_callback_debouncer_runs_once() {
        let t0 = Instant::now();
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut d: CallbackDebouncer<TaskKey> = Debouncer::new();

        for i in 0..10u64 {
            let hits = Rc::clone(&hits);
            d.schedule(
                t0 + ms(i * 10),
                TaskKey::Highlight,
                ms(150),
                Box::new(move || hits.borrow_mut().push(i)),
            );
        }

        assert_eq!(run_due(&mut d, t0 + ms(100)), 0);
        assert_eq!(run_due(&mut d, t0 + ms(400)), 1);
        assert_eq!(*hits.borrow(), vec![9]);
    }
}
