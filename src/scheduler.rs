//! Control-loop pacing.
//!
//! The node does one thing on a timer: sample, classify, maybe report.
//! [`Cadence`] gates that work to one run per `interval_ms` against a
//! monotonic millisecond clock supplied by the caller.
//!
//! ```text
//!   t=0        t=2000      t=4000      t=6000
//!   │ due      │ due       │ due       │ due
//!   ▼          ▼           ▼           ▼
//!   tick ───── tick ────── tick ────── tick
//! ```
//!
//! A late loop iteration (e.g. a blocking reconnect) does not queue up
//! missed ticks; the next deadline is measured from when the late tick
//! actually ran.

/// Fixed-interval tick gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    interval_ms: u64,
    next_due_ms: u64,
}

impl Cadence {
    /// First tick is due immediately.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: u64::from(interval_ms.max(1)),
            next_due_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Returns `true` (and arms the next deadline) if a tick is due at
    /// `now_ms`.
    pub fn is_due(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        self.next_due_ms = now_ms + self.interval_ms;
        true
    }

    /// Milliseconds until the next tick; 0 if one is already due.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.next_due_ms.saturating_sub(now_ms)
    }
}
