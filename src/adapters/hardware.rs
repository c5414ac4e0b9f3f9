//! Hardware adapter: bridges the physical sensors to the domain.
//!
//! Owns the [`SensorHub`] and exposes it through [`SensorSource`].  This
//! and the drivers under `sensors/` are the only code that touches the
//! rain ADC, the anemometer counter and the MPU6050.  On non-espidf
//! targets the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::i2c::I2c;

use crate::app::ports::SensorSource;
use crate::sensors::{SensorHub, SensorSnapshot};

/// Real-hardware sensor source.
pub struct HardwareSource<I2C> {
    hub: SensorHub<I2C>,
}

impl<I2C: I2c> HardwareSource<I2C> {
    pub fn new(hub: SensorHub<I2C>) -> Self {
        Self { hub }
    }
}

impl<I2C: I2c> SensorSource for HardwareSource<I2C> {
    fn sample(&mut self, now_ms: u64) -> SensorSnapshot {
        self.hub.read_all(now_ms)
    }

    fn label(&self) -> &'static str {
        "hardware"
    }
}
