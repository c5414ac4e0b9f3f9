//! System configuration parameters
//!
//! All tunable parameters for the HazardWatch node.  Everything is fixed at
//! build time; credentials are taken from the build environment so they
//! never live in the source tree:
//!
//! - `HAZARDWATCH_WIFI_SSID` / `HAZARDWATCH_WIFI_PASS`
//! - `HAZARDWATCH_TS_API_KEY`

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which implementation backs the sensor source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Scenario generator cycling through the six hazard profiles.
    Simulated,
    /// Rain ADC, anemometer pulses and the MPU6050.
    Hardware,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Identity ---
    /// Device identifier carried in every report.
    pub device_id: u32,
    /// Sensor source selection.
    pub source: SourceKind,
    /// Seed for the simulated source (host builds; the device seeds from
    /// its hardware RNG).
    pub simulation_seed: u64,

    // --- Wi-Fi ---
    pub wifi_ssid: String<32>,
    pub wifi_password: String<64>,

    // --- MQTT ---
    pub mqtt_broker: String<64>,
    pub mqtt_port: u16,
    pub mqtt_client_id: String<32>,
    /// Topic hazard reports are published to.  The default is the topic
    /// the existing dashboards subscribe to.
    pub mqtt_topic: String<64>,

    // --- Telemetry cloud ---
    pub thingspeak_channel_id: u32,
    pub thingspeak_api_key: String<32>,

    // --- Timing ---
    /// Sampling / classification cadence (milliseconds).
    pub sample_interval_ms: u32,
    /// Dwell time of each simulated scenario (milliseconds).
    pub phase_interval_ms: u32,
    /// Fixed backoff between Wi-Fi association attempts (milliseconds).
    pub wifi_retry_ms: u32,
    /// Fixed backoff between broker connection attempts (milliseconds).
    pub mqtt_retry_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            device_id: 3_232_321,
            source: SourceKind::Simulated,
            simulation_seed: 0x00C0_FFEE,

            wifi_ssid: truncated(option_env!("HAZARDWATCH_WIFI_SSID").unwrap_or("Wokwi-GUEST")),
            wifi_password: truncated(option_env!("HAZARDWATCH_WIFI_PASS").unwrap_or("")),

            mqtt_broker: truncated("broker.hivemq.com"),
            mqtt_port: 1883,
            mqtt_client_id: truncated("ESP32-HazardWatch"),
            mqtt_topic: truncated("alerthaven/eventos"),

            thingspeak_channel_id: 2_969_337,
            thingspeak_api_key: truncated(option_env!("HAZARDWATCH_TS_API_KEY").unwrap_or("")),

            sample_interval_ms: 2_000,
            phase_interval_ms: 10_000,
            wifi_retry_ms: 500,
            mqtt_retry_ms: 5_000,
        }
    }
}

impl SystemConfig {
    /// Reject values the control loop cannot run with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample_interval_ms must be > 0"));
        }
        if self.phase_interval_ms == 0 {
            return Err(Error::Config("phase_interval_ms must be > 0"));
        }
        if self.mqtt_broker.is_empty() {
            return Err(Error::Config("mqtt_broker is empty"));
        }
        if self.mqtt_port == 0 {
            return Err(Error::Config("mqtt_port must be non-zero"));
        }
        if self.mqtt_topic.is_empty() {
            return Err(Error::Config("mqtt_topic is empty"));
        }
        Ok(())
    }
}

/// Copy `s` into a fixed-capacity string, dropping whatever does not fit.
fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
