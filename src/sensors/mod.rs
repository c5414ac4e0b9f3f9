//! Sensor subsystem: individual drivers, the hardware [`SensorHub`], and
//! the scenario generator.
//!
//! Either the hub or [`simulated::SimulatedSource`] produces a
//! [`SensorSnapshot`] each control cycle; the classifier cannot tell them
//! apart.

pub mod anemometer;
pub mod mpu6050;
pub mod rain;
pub mod simulated;

use embedded_hal::i2c::I2c;
use log::{debug, warn};

use anemometer::Anemometer;
use mpu6050::{ImuReading, Mpu6050};
use rain::RainSensor;

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// One atomic set of readings taken at a single instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorSnapshot {
    /// Raw rain-sensor level (12-bit ADC scale, 0 – 4095).
    pub precipitation: u16,
    /// Anemometer rotation rate (rpm).
    pub wind_speed: f32,
    /// Air temperature (°C).
    pub temperature: f32,
    /// Horizontal acceleration, X axis (m/s²).
    pub acceleration_x: f32,
    /// Horizontal acceleration, Y axis (m/s²).
    pub acceleration_y: f32,
}

// ---------------------------------------------------------------------------
// Hardware hub
// ---------------------------------------------------------------------------

/// Aggregates the physical sensors and produces a unified snapshot.
pub struct SensorHub<I2C> {
    pub rain: RainSensor,
    pub wind: Anemometer,
    imu: Mpu6050<I2C>,
    /// Last good rain level, reused when the ADC read fails.
    last_precipitation: u16,
    /// Last good IMU reading, reused when a transfer fails.
    last_imu: ImuReading,
}

impl<I2C: I2c> SensorHub<I2C> {
    /// Construct a new hub.  The IMU must already be initialised; a node
    /// without a working accelerometer never gets this far.
    pub fn new(rain: RainSensor, wind: Anemometer, imu: Mpu6050<I2C>) -> Self {
        Self {
            rain,
            wind,
            imu,
            last_precipitation: 0,
            last_imu: ImuReading::default(),
        }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// A failed rain or IMU read is logged and the previous good value is
    /// retained.
    pub fn read_all(&mut self, now_ms: u64) -> SensorSnapshot {
        match self.rain.read() {
            Ok(raw) => self.last_precipitation = raw,
            Err(e) => warn!("Rain read failed ({}), reusing last reading", e),
        }
        let precipitation = self.last_precipitation;
        let wind = self.wind.read(now_ms);

        match self.imu.read() {
            Ok(r) => self.last_imu = r,
            Err(e) => warn!("IMU read failed ({}), reusing last reading", e),
        }

        let snapshot = SensorSnapshot {
            precipitation,
            wind_speed: wind.rpm,
            temperature: self.last_imu.temperature_c,
            acceleration_x: self.last_imu.accel_x,
            acceleration_y: self.last_imu.accel_y,
        };
        debug!(
            "READ | rain={} | wind={:.1}rpm ({} pulses) | T={:.1}\u{00b0}C | ax={:.2} ay={:.2}",
            snapshot.precipitation,
            snapshot.wind_speed,
            wind.pulses,
            snapshot.temperature,
            snapshot.acceleration_x,
            snapshot.acceleration_y,
        );
        snapshot
    }
}
