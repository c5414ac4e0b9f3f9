//! Wire format of a hazard report.
//!
//! MQTT carries a compact JSON object; the telemetry cloud gets the same
//! facts as numbered fields.  Key names match what the dashboards
//! already parse, including the Portuguese `evento`.

use serde::Serialize;

use crate::error::CommsError;
use crate::hazard::HazardEvent;
use crate::sensors::SensorSnapshot;

/// Telemetry field carrying the device id.
pub const FIELD_DEVICE: u8 = 1;
/// Telemetry field carrying the event code.
pub const FIELD_EVENT: u8 = 2;
/// Telemetry field carrying the raw precipitation level.
pub const FIELD_PRECIPITATION: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlertPayload {
    pub device: u32,
    #[serde(rename = "evento")]
    pub event: u8,
    pub timestamp: u64,
}

impl AlertPayload {
    pub fn new(device: u32, event: HazardEvent, timestamp_ms: u64) -> Self {
        Self {
            device,
            event: event.code(),
            timestamp: timestamp_ms,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, CommsError> {
        serde_json::to_vec(self).map_err(|_| CommsError::PayloadEncoding)
    }
}

/// `(field, value)` pairs staged for one telemetry update.
pub fn telemetry_fields(device: u32, event: HazardEvent, snapshot: &SensorSnapshot) -> [(u8, f32); 3] {
    [
        (FIELD_DEVICE, device as f32),
        (FIELD_EVENT, event.code() as f32),
        (FIELD_PRECIPITATION, snapshot.precipitation as f32),
    ]
}
