//! Scheduler capability for the sequencer.
//!
//! A [`Clock`] hands out one-shot timers and lets the owner cancel them.
//! Fired timers are not callbacks: the host collects the fired
//! [`TimerId`]s (from [`ManualClock::advance`] or [`WallClock::poll`]) and
//! routes them to whoever scheduled them. A recipient that no longer owns
//! the id simply ignores it.

use std::collections::{BTreeMap, BTreeSet};
use std::time::{Duration, Instant};

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// "Fire after N milliseconds, give me a handle to cancel it."
pub trait Clock {
    /// Schedule a one-shot timer firing `after` from now.
    fn schedule(&mut self, after: Duration) -> TimerId;

    /// Cancel a pending timer. Returns false when it already fired or
    /// was never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Number of timers still pending.
    fn pending(&self) -> usize;
}

/// Pending timers ordered by (deadline, id).
#[derive(Debug, Default)]
struct TimerQueue<T: Ord + Copy> {
    next_id: u64,
    by_deadline: BTreeSet<(T, TimerId)>,
    deadlines: BTreeMap<TimerId, T>,
}

impl<T: Ord + Copy> TimerQueue<T> {
    fn push(&mut self, deadline: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.by_deadline.insert((deadline, id));
        self.deadlines.insert(id, deadline);
        id
    }

    fn remove(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => {
                self.by_deadline.remove(&(deadline, id));
                true
            }
            None => false,
        }
    }

    fn pop_due(&mut self, now: T) -> Vec<TimerId> {
        let mut fired = Vec::new();
        while let Some((deadline, id)) = self.by_deadline.first().copied() {
            if deadline > now {
                break;
            }
            self.by_deadline.remove(&(deadline, id));
            self.deadlines.remove(&id);
            fired.push(id);
        }
        fired
    }

    fn peek(&self) -> Option<(T, TimerId)> {
        self.by_deadline.first().copied()
    }

    fn len(&self) -> usize {
        self.deadlines.len()
    }
}

/// Deterministic clock driven by hand. Time only moves on [`advance`].
///
/// [`advance`]: ManualClock::advance
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    queue: TimerQueue<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move time forward and return every timer that came due, earliest
    /// first.
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        self.queue.pop_due(self.now)
    }

    /// Fire the earliest timer due at or before `until`, moving time to
    /// its deadline. When none is due, time moves to `until` and `None` is
    /// returned.
    ///
    /// Stepping one timer at a time lets a timer scheduled while handling
    /// a fire come due within the same window, like a repeating interval.
    pub fn step(&mut self, until: Duration) -> Option<TimerId> {
        match self.queue.peek() {
            Some((deadline, id)) if deadline <= until => {
                self.queue.remove(id);
                self.now = self.now.max(deadline);
                Some(id)
            }
            _ => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl Clock for ManualClock {
    fn schedule(&mut self, after: Duration) -> TimerId {
        self.queue.push(self.now + after)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(id)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

/// Real-time clock backed by [`Instant`].
#[derive(Debug)]
pub struct WallClock {
    queue: TimerQueue<Instant>,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            queue: TimerQueue {
                next_id: 0,
                by_deadline: BTreeSet::new(),
                deadlines: BTreeMap::new(),
            },
        }
    }

    /// Timers due as of now, earliest first.
    pub fn poll(&mut self) -> Vec<TimerId> {
        self.queue.pop_due(Instant::now())
    }

    /// Time until the earliest pending timer, if any.
    pub fn until_next(&self) -> Option<Duration> {
        self.queue
            .peek()
            .map(|(deadline, _)| deadline.saturating_duration_since(Instant::now()))
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for WallClock {
    fn schedule(&mut self, after: Duration) -> TimerId {
        self.queue.push(Instant::now() + after)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.queue.remove(id)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
