//! Application service, the hexagonal core.
//!
//! [`AlertService`] owns the notifier and the report configuration.  It
//! exposes a clean, hardware-agnostic API.  All I/O flows through port
//! traits injected at call sites, making the entire service testable with
//! mock adapters.
//!
//! ```text
//!   SensorSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                    │       AlertService        │
//!         Uplink ◀──│ classify · Notifier       │
//!                    └──────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::error::CommsError;
use crate::hazard::{HazardEvent, Notifier, Transition, classify};
use crate::sensors::SensorSnapshot;

use super::events::AppEvent;
use super::ports::{
    Clock, ConnectivityPort, EventSink, MessagePublisher, SensorSource, TelemetryUploader,
};
use super::report::{AlertPayload, telemetry_fields};

/// Result of one control cycle, for the caller and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub snapshot: SensorSnapshot,
    pub detected: HazardEvent,
    pub transition: Transition,
}

// ───────────────────────────────────────────────────────────────
// AlertService
// ───────────────────────────────────────────────────────────────

pub struct AlertService {
    config: SystemConfig,
    notifier: Notifier,
    cycles: u64,
    reports: u64,
    failures: u64,
}

impl AlertService {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            notifier: Notifier::new(),
            cycles: 0,
            reports: 0,
            failures: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, source: &impl SensorSource, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            source: source.label(),
        });
        info!(
            "AlertService started (device={}, source={})",
            self.config.device_id,
            source.label()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full cycle: link check → sample → classify → notify → deliver.
    ///
    /// The cycle time is read from `clock` once the link is up, so the
    /// sample window and the report timestamp include any reconnect stall.
    ///
    /// The `uplink` parameter satisfies all three outbound ports, which
    /// avoids juggling three mutable borrows of what is one network stack
    /// on the device.
    pub fn tick(
        &mut self,
        clock: &impl Clock,
        source: &mut impl SensorSource,
        uplink: &mut (impl ConnectivityPort + MessagePublisher + TelemetryUploader),
        sink: &mut impl EventSink,
    ) -> CycleOutcome {
        self.cycles += 1;

        // 1. Link up (blocks until both Wi-Fi and broker are connected)
        uplink.ensure_connected();

        // 2. Sample and classify
        let now_ms = clock.now_ms();
        let snapshot = source.sample(now_ms);
        let detected = classify(&snapshot);

        // 3. Report-once filter
        let transition = self.notifier.observe(detected);

        match transition {
            Transition::Report(event) => {
                self.reports += 1;
                info!("HAZARD | {} detected (code {})", event, event.code());
                sink.emit(&AppEvent::HazardReported {
                    event,
                    timestamp_ms: now_ms,
                });
                self.deliver(event, now_ms, &snapshot, uplink, sink);
            }
            Transition::Repeat(event) => {
                debug!("HAZARD | {} persists, already reported", event);
            }
            Transition::Clear { previous } if previous.is_hazard() => {
                info!("HAZARD | {} cleared", previous);
                sink.emit(&AppEvent::HazardCleared { previous });
            }
            Transition::Clear { .. } => {}
        }

        CycleOutcome {
            snapshot,
            detected,
            transition,
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn last_reported(&self) -> HazardEvent {
        self.notifier.last_reported()
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycles
    }

    /// Reports attempted since startup, delivered or not.
    pub fn report_count(&self) -> u64 {
        self.reports
    }

    /// Failed publish or upload attempts since startup.
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Publish and upload one report.  Failures are emitted and counted;
    /// the notifier has already moved on and stays there.
    fn deliver(
        &mut self,
        event: HazardEvent,
        now_ms: u64,
        snapshot: &SensorSnapshot,
        uplink: &mut (impl MessagePublisher + TelemetryUploader),
        sink: &mut impl EventSink,
    ) {
        let published = AlertPayload::new(self.config.device_id, event, now_ms)
            .encode()
            .and_then(|payload| uplink.publish(&self.config.mqtt_topic, &payload));
        match published {
            Ok(()) => sink.emit(&AppEvent::Published { event }),
            Err(e) => self.fail(e, sink),
        }

        for (field, value) in telemetry_fields(self.config.device_id, event, snapshot) {
            uplink.set_field(field, value);
        }
        let status = uplink.write_fields(
            self.config.thingspeak_channel_id,
            &self.config.thingspeak_api_key,
        );
        if status == 200 {
            sink.emit(&AppEvent::Uploaded { event });
        } else {
            self.fail(CommsError::UploadRejected(status), sink);
        }
    }

    fn fail(&mut self, e: CommsError, sink: &mut impl EventSink) {
        self.failures += 1;
        warn!("Delivery failed: {}", e);
        sink.emit(&AppEvent::DeliveryFailed(e));
    }
}
