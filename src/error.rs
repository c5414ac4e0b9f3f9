//! Unified error types for the HazardWatch firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! bootstrap path in `main` uniform.  All variants are `Copy` so they can
//! be handed to the event sink without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be initialised or read.
    Sensor(SensorError),
    /// A communication collaborator failed.
    Comms(CommsError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Comms(e) => write!(f, "comms: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The accelerometer did not acknowledge on the I2C bus.
    ImuNotResponding,
    /// WHO_AM_I returned an unexpected identity byte.
    ImuWrongIdentity(u8),
    /// An I2C transfer failed after the device was initialised.
    ImuBus,
    /// ADC read returned an error or timed out.
    AdcReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImuNotResponding => write!(f, "MPU6050 not responding"),
            Self::ImuWrongIdentity(id) => write!(f, "MPU6050 WHO_AM_I mismatch (0x{id:02X})"),
            Self::ImuBus => write!(f, "I2C transfer failed"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
        }
    }
}

impl core::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Communications errors
// ---------------------------------------------------------------------------

/// Failures of the outbound collaborators.
///
/// `ConnectivityLost` is retried inside the connectivity adapter and never
/// reaches the alert service.  The others are reported and the cycle moves
/// on; a reported hazard stays reported even if delivery failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    ConnectivityLost,
    PublishFailed,
    /// Cloud endpoint answered with a non-200 status (0 = no response).
    UploadRejected(u16),
    PayloadEncoding,
}

impl fmt::Display for CommsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectivityLost => write!(f, "connectivity lost"),
            Self::PublishFailed => write!(f, "MQTT publish failed"),
            Self::UploadRejected(status) => write!(f, "telemetry upload rejected (status {status})"),
            Self::PayloadEncoding => write!(f, "payload encoding failed"),
        }
    }
}

impl core::error::Error for CommsError {}

impl From<CommsError> for Error {
    fn from(e: CommsError) -> Self {
        Self::Comms(e)
    }
}
