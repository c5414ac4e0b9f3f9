//! InvenSense MPU6050 accelerometer / die-temperature driver.
//!
//! Only the parts the classifier needs: horizontal acceleration and
//! temperature.  The gyro is left at its power-on configuration.
//!
//! Generic over any `embedded-hal` 1.0 blocking I2C bus, so the same code
//! runs against `esp_idf_hal::i2c::I2cDriver` on the board and against a
//! register-map mock in tests.

use embedded_hal::i2c::I2c;

use crate::error::SensorError;

/// AD0 pin low.
pub const DEFAULT_ADDRESS: u8 = 0x68;

const REG_ACCEL_CONFIG: u8 = 0x1C;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_WHO_AM_I: u8 = 0x75;

const WHO_AM_I_MPU6050: u8 = 0x68;
/// Clear SLEEP, clock from the X gyro PLL.
const PWR_WAKE_PLL_X: u8 = 0x01;
/// AFS_SEL = 2 → ±8 g.
const ACCEL_RANGE_8G: u8 = 0b10 << 3;
const LSB_PER_G_8G: f32 = 4096.0;
const STANDARD_GRAVITY: f32 = 9.806_65;

/// One burst read: accelerations in m/s², temperature in °C.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImuReading {
    pub accel_x: f32,
    pub accel_y: f32,
    pub accel_z: f32,
    pub temperature_c: f32,
}

pub struct Mpu6050<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Mpu6050<I2C> {
    /// Probe, wake and configure the device.
    ///
    /// Fails if the device does not answer or is not an MPU6050; the
    /// caller treats that as fatal.
    pub fn new(i2c: I2C, address: u8) -> Result<Self, SensorError> {
        let mut dev = Self { i2c, address };

        let mut id = [0u8; 1];
        dev.i2c
            .write_read(dev.address, &[REG_WHO_AM_I], &mut id)
            .map_err(|_| SensorError::ImuNotResponding)?;
        if id[0] != WHO_AM_I_MPU6050 {
            return Err(SensorError::ImuWrongIdentity(id[0]));
        }

        dev.write_register(REG_PWR_MGMT_1, PWR_WAKE_PLL_X)?;
        dev.write_register(REG_ACCEL_CONFIG, ACCEL_RANGE_8G)?;
        log::info!("MPU6050 ready at 0x{:02X} (accel ±8g)", dev.address);
        Ok(dev)
    }

    /// Burst-read accel + temperature (registers 0x3B..=0x42).
    pub fn read(&mut self) -> Result<ImuReading, SensorError> {
        let mut buf = [0u8; 8];
        self.i2c
            .write_read(self.address, &[REG_ACCEL_XOUT_H], &mut buf)
            .map_err(|_| SensorError::ImuBus)?;

        let word = |i: usize| i16::from_be_bytes([buf[i], buf[i + 1]]);
        Ok(ImuReading {
            accel_x: accel_to_ms2(word(0)),
            accel_y: accel_to_ms2(word(2)),
            accel_z: accel_to_ms2(word(4)),
            temperature_c: temp_to_celsius(word(6)),
        })
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(|_| SensorError::ImuBus)
    }
}

fn accel_to_ms2(raw: i16) -> f32 {
    raw as f32 / LSB_PER_G_8G * STANDARD_GRAVITY
}

/// Datasheet: °C = raw / 340 + 36.53.
fn temp_to_celsius(raw: i16) -> f32 {
    raw as f32 / 340.0 + 36.53
}
