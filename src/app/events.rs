//! Outbound application events.
//!
//! The [`AlertService`](super::service::AlertService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::CommsError;
use crate::hazard::HazardEvent;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the sensor source label).
    Started { source: &'static str },

    /// A new hazard was detected and is being reported.
    HazardReported { event: HazardEvent, timestamp_ms: u64 },

    /// Readings went back to normal.
    HazardCleared { previous: HazardEvent },

    /// The alert message reached the broker client.
    Published { event: HazardEvent },

    /// The telemetry update was accepted.
    Uploaded { event: HazardEvent },

    /// Publishing or uploading failed.  The report is not retried.
    DeliveryFailed(CommsError),
}
