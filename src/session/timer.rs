//! Deferred effects: session epochs, pending hides, and the timer queue.
//!
//! Two things happen later than the click that caused them: a mismatched
//! pair is hidden after a delay, and the elapsed-time ticker fires once per
//! interval. Both run on a virtual clock the host advances, so everything
//! stays single-threaded and deterministic.
//!
//! Every deferred hide carries the `Epoch` of the session that scheduled it.
//! A restart starts a new epoch, so a hide from an older session is a no-op.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Generation counter identifying one session between restarts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Epoch(pub u64);

impl Epoch {
    /// The epoch following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Epoch({})", self.0)
    }
}

/// A scheduled hide of a mismatched pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHide {
    /// Session that scheduled the hide.
    pub epoch: Epoch,

    /// The mismatched cards, in click order.
    pub cards: [CardId; 2],

    /// Delay after the mismatch before the hide applies.
    pub delay_ms: u64,
}

/// A deferred effect that has come due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    /// One ticker interval elapsed.
    Tick,
    /// A mismatched pair should be hidden.
    Hide(PendingHide),
}

/// Virtual clock with a recurring ticker and one-shot hides.
#[derive(Clone, Debug)]
pub struct TimerQueue {
    now_ms: u64,
    tick_interval_ms: u64,
    next_tick_ms: Option<u64>,
    /// Ordered by due time.
    hides: VecDeque<(u64, PendingHide)>,
}

impl TimerQueue {
    /// Start a clock at zero with the ticker running.
    #[must_use]
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            now_ms: 0,
            tick_interval_ms,
            next_tick_ms: Some(tick_interval_ms),
            hides: VecDeque::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Whether the ticker is still scheduled.
    #[must_use]
    pub fn ticker_running(&self) -> bool {
        self.next_tick_ms.is_some()
    }

    /// Number of hides waiting to fire.
    #[must_use]
    pub fn pending_hides(&self) -> usize {
        self.hides.len()
    }

    /// Schedule a hide `delay_ms` after now.
    pub fn schedule(&mut self, hide: PendingHide) {
        let due = self.now_ms.saturating_add(hide.delay_ms);
        let pos = self.hides.partition_point(|(d, _)| *d <= due);
        self.hides.insert(pos, (due, hide));
    }

    /// Stop the ticker. Pending hides still fire.
    pub fn cancel_ticker(&mut self) {
        self.next_tick_ms = None;
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to it.
    ///
    /// Hides win ties with the ticker. Returns `None` once nothing else is
    /// due; call `finish` afterwards to move the clock to `until`.
    pub fn pop_due(&mut self, until: u64) -> Option<Timer> {
        let hide_due = self.hides.front().map(|(d, _)| *d).filter(|d| *d <= until);
        let tick_due = self.next_tick_ms.filter(|d| *d <= until);

        match (hide_due, tick_due) {
            (Some(h), Some(t)) if t < h => self.fire_tick(t),
            (Some(h), _) => {
                self.now_ms = h;
                self.hides.pop_front().map(|(_, hide)| Timer::Hide(hide))
            }
            (None, Some(t)) => self.fire_tick(t),
            (None, None) => None,
        }
    }

    /// Move the clock to `until` once every due timer has been popped.
    pub fn finish(&mut self, until: u64) {
        self.now_ms = self.now_ms.max(until);
    }

    fn fire_tick(&mut self, due: u64) -> Option<Timer> {
        self.now_ms = due;
        self.next_tick_ms = Some(due + self.tick_interval_ms);
        Some(Timer::Tick)
    }
}
