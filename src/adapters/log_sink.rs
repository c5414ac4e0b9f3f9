//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { source } => {
                info!("START | source={}", source);
            }
            AppEvent::HazardReported { event, timestamp_ms } => {
                info!("ALERT | {} (code {}) at t={}ms", event, event.code(), timestamp_ms);
            }
            AppEvent::HazardCleared { previous } => {
                info!("CLEAR | {} no longer detected", previous);
            }
            AppEvent::Published { event } => {
                info!("MQTT  | {} published", event);
            }
            AppEvent::Uploaded { event } => {
                info!("CLOUD | {} uploaded", event);
            }
            AppEvent::DeliveryFailed(e) => {
                warn!("FAIL  | {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommsError;
    use crate::hazard::HazardEvent;

    #[test]
    fn every_event_kind_is_accepted() {
        let mut sink = LogEventSink::new();
        for event in [
            AppEvent::Started { source: "simulated" },
            AppEvent::HazardReported {
                event: HazardEvent::Flood,
                timestamp_ms: 12_000,
            },
            AppEvent::Published { event: HazardEvent::Flood },
            AppEvent::Uploaded { event: HazardEvent::Flood },
            AppEvent::HazardCleared { previous: HazardEvent::Flood },
            AppEvent::DeliveryFailed(CommsError::UploadRejected(0)),
        ] {
            sink.emit(&event);
        }
    }
}
