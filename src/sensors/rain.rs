//! Resistive rain sensor (analog output).
//!
//! Wetter plate → lower resistance → higher ADC reading after the module's
//! comparator-board inversion.  The reading is used raw; no calibration.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: each sensor carries its own injected level and can be
//! told to fail.

use crate::error::SensorError;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Full scale of the 12-bit ADC.
pub const ADC_MAX: u16 = 4095;

pub struct RainSensor {
    adc_channel: u32,
    #[cfg(not(target_os = "espidf"))]
    sim_raw: u16,
    #[cfg(not(target_os = "espidf"))]
    sim_fail: bool,
}

impl RainSensor {
    pub fn new(adc_channel: u32) -> Self {
        Self {
            adc_channel,
            #[cfg(not(target_os = "espidf"))]
            sim_raw: 0,
            #[cfg(not(target_os = "espidf"))]
            sim_fail: false,
        }
    }

    /// One-shot reading clamped to the ADC range.  A driver error is an
    /// error, never a dry reading.
    pub fn read(&self) -> Result<u16, SensorError> {
        self.read_adc().map(|raw| raw.min(ADC_MAX))
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Result<u16, SensorError> {
        let _ = self.adc_channel;
        if self.sim_fail {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(self.sim_raw)
    }
}

// ── Simulation controls ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl RainSensor {
    pub fn sim_set_raw(&mut self, raw: u16) {
        self.sim_raw = raw;
    }

    /// Make every read fail until reset.
    pub fn sim_fail(&mut self, fail: bool) {
        self.sim_fail = fail;
    }
}
