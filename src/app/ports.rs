//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlertService (domain)
//! ```
//!
//! Driven adapters (sensor sources, Wi-Fi/MQTT uplink, telemetry cloud,
//! event sinks) implement these traits.  The
//! [`AlertService`](super::service::AlertService) consumes them via
//! generics, so the domain core never touches hardware or sockets directly.

use crate::error::CommsError;
use crate::sensors::SensorSnapshot;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware or simulation → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per control cycle.
pub trait SensorSource {
    /// Produce a fresh snapshot as of `now_ms` (monotonic uptime).
    ///
    /// Only the source's own state changes (pulse window, scenario phase).
    fn sample(&mut self, now_ms: u64) -> SensorSnapshot;

    /// Short name for logs.
    fn label(&self) -> &'static str;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: monotonic uptime → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
///
/// Read by the service after any blocking step of the cycle, so a long
/// reconnect never hands a stale time to the sensor source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Connectivity port (driven adapter: domain → Wi-Fi + broker)
// ───────────────────────────────────────────────────────────────

/// Link management.
pub trait ConnectivityPort {
    /// Bring Wi-Fi and the broker session up if either is down.
    ///
    /// Idempotent.  Blocks, retrying with a fixed backoff, until both are
    /// connected; a no-op when they already are.
    fn ensure_connected(&mut self);

    fn is_connected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Publish port (driven adapter: domain → MQTT)
// ───────────────────────────────────────────────────────────────

pub trait MessagePublisher {
    /// Publish `payload` on `topic`.  Fire-and-forget: success means the
    /// message was handed to the client, not that a subscriber saw it.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → ThingSpeak-style cloud)
// ───────────────────────────────────────────────────────────────

/// Field-oriented telemetry upload.  Fields accumulate until
/// [`write_fields`](Self::write_fields) sends them as one update.
pub trait TelemetryUploader {
    /// Stage `value` for field `index` (1-based).
    fn set_field(&mut self, index: u8, value: f32);

    /// Send every staged field and clear them.  Returns the HTTP status
    /// code; 200 means the update was accepted, 0 means no response.
    fn write_fields(&mut self, channel_id: u32, api_key: &str) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
