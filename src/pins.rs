//! GPIO / peripheral pin assignments for the HazardWatch sensor node.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC1)
// ---------------------------------------------------------------------------

/// Resistive rain sensor, analog output. GPIO34 is input-only on the
/// classic ESP32 and maps to ADC1 channel 6.
pub const RAIN_ADC_GPIO: i32 = 34;
/// ADC1 channel for [`RAIN_ADC_GPIO`].
pub const RAIN_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// Sensors: Digital / Pulse
// ---------------------------------------------------------------------------

/// Cup anemometer reed switch, falling-edge interrupt, internal pull-up.
pub const ANEMOMETER_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// I²C bus (MPU6050 accelerometer / temperature)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// Standard-mode I²C is plenty for one 8-byte burst per cycle.
pub const I2C_BAUD_HZ: u32 = 100_000;
