//! Report suppression: "report once per state change".
//!
//! The notifier remembers the last *reported* hazard.  A sustained hazard
//! is reported on its first cycle only; a cycle that detects nothing
//! re-arms the notifier so the same hazard is reported again if it comes
//! back.
//!
//! ```text
//!             detected == last (≠ None)
//!                 ┌──────────┐
//!                 ▼          │  Repeat
//!   None ──Report──▶ Hazard A ──Report──▶ Hazard B
//!    ▲                  │                    │
//!    └──────Clear───────┴────────Clear───────┘
//! ```
//!
//! The transition function is exposed on its own ([`next_transition`]) so
//! it can be driven with an explicit state value.

use super::HazardEvent;

/// Outcome of feeding one detected event to the notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new hazard: emit it.
    Report(HazardEvent),
    /// Same hazard as last reported: suppress.
    Repeat(HazardEvent),
    /// Nothing detected: forget the last report (`previous` may be `None`).
    Clear { previous: HazardEvent },
}

impl Transition {
    /// The event to emit, if this transition calls for one.
    pub fn reported(self) -> Option<HazardEvent> {
        match self {
            Self::Report(e) => Some(e),
            _ => None,
        }
    }

    /// Last-reported value after this transition.
    pub fn next_state(self) -> HazardEvent {
        match self {
            Self::Report(e) | Self::Repeat(e) => e,
            Self::Clear { .. } => HazardEvent::None,
        }
    }
}

/// Pure transition rule over an explicit last-reported value.
pub fn next_transition(last_reported: HazardEvent, detected: HazardEvent) -> Transition {
    if !detected.is_hazard() {
        Transition::Clear { previous: last_reported }
    } else if detected == last_reported {
        Transition::Repeat(detected)
    } else {
        Transition::Report(detected)
    }
}

/// Holds the last reported hazard across control cycles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Notifier {
    last_reported: HazardEvent,
}

impl Notifier {
    pub const fn new() -> Self {
        Self { last_reported: HazardEvent::None }
    }

    /// Feed one detected event and advance the state.
    ///
    /// The state moves on a `Report` before anything is sent; a failed
    /// delivery afterwards does not undo it.
    pub fn observe(&mut self, detected: HazardEvent) -> Transition {
        let t = next_transition(self.last_reported, detected);
        self.last_reported = t.next_state();
        t
    }

    pub fn last_reported(&self) -> HazardEvent {
        self.last_reported
    }
}
