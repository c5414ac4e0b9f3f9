//! Real sensor stack (hub + anemometer counter + MPU6050 over a mock bus)
//! driven through the alert service while the uplink stalls.

use crate::mock_ports::{LogSink, ManualClock, MockUplink};

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};
use hazardwatch::adapters::hardware::HardwareSource;
use hazardwatch::app::ports::{
    Clock, ConnectivityPort, MessagePublisher, TelemetryUploader,
};
use hazardwatch::app::service::AlertService;
use hazardwatch::config::SystemConfig;
use hazardwatch::error::CommsError;
use hazardwatch::hazard::HazardEvent;
use hazardwatch::sensors::SensorHub;
use hazardwatch::sensors::anemometer::{Anemometer, PulseCounter};
use hazardwatch::sensors::mpu6050::{DEFAULT_ADDRESS, Mpu6050};
use hazardwatch::sensors::rain::RainSensor;

/// 100 rpm at two pulses per rotation.
const PULSE_PERIOD_MS: u64 = 300;

/// MPU6050 at rest: zero acceleration, raw temperature word 0.
struct QuietImu {
    pointer: u8,
}

impl ErrorType for QuietImu {
    type Error = ErrorKind;
}

impl I2c for QuietImu {
    fn transaction(&mut self, _addr: u8, ops: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        for op in ops {
            match op {
                Operation::Write(bytes) => self.pointer = bytes[0],
                Operation::Read(buf) => {
                    buf.fill(0);
                    if self.pointer == 0x75 {
                        buf[0] = 0x68;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Uplink whose next reconnect blocks for `stall_ms` while the cups keep
/// turning.
struct StallingUplink {
    inner: MockUplink,
    clock: ManualClock,
    pulses: &'static PulseCounter,
    stall_ms: u64,
}

impl ConnectivityPort for StallingUplink {
    fn ensure_connected(&mut self) {
        let start = self.clock.now_ms();
        let end = start + self.stall_ms;
        for t in ((start + PULSE_PERIOD_MS)..=end).step_by(PULSE_PERIOD_MS as usize) {
            self.pulses.record(t as u32);
        }
        self.clock.set(end);
        self.stall_ms = 0;
        self.inner.ensure_connected();
    }

    fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }
}

impl MessagePublisher for StallingUplink {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        self.inner.publish(topic, payload)
    }
}

impl TelemetryUploader for StallingUplink {
    fn set_field(&mut self, index: u8, value: f32) {
        self.inner.set_field(index, value);
    }

    fn write_fields(&mut self, channel_id: u32, api_key: &str) -> u16 {
        self.inner.write_fields(channel_id, api_key)
    }
}

fn steady_wind(pulses: &PulseCounter, from_ms: u64, to_ms: u64) {
    for t in ((from_ms + PULSE_PERIOD_MS)..=to_ms).step_by(PULSE_PERIOD_MS as usize) {
        pulses.record(t as u32);
    }
}

#[test]
fn steady_wind_survives_a_reconnect_stall() {
    static PULSES: PulseCounter = PulseCounter::new();

    let imu = Mpu6050::new(QuietImu { pointer: 0 }, DEFAULT_ADDRESS).unwrap();
    let hub = SensorHub::new(RainSensor::new(6), Anemometer::new(&PULSES), imu);
    let mut source = HardwareSource::new(hub);
    let mut app = AlertService::new(SystemConfig::default());
    let clock = ManualClock::new();
    let mut uplink = StallingUplink {
        inner: MockUplink::new(),
        clock: clock.clone(),
        pulses: &PULSES,
        stall_ms: 0,
    };
    let mut sink = LogSink::new();

    steady_wind(&PULSES, 0, 3_000);
    clock.set(3_000);
    let first = app.tick(&clock, &mut source, &mut uplink, &mut sink);
    assert!((first.snapshot.wind_speed - 100.0).abs() < 1e-3);
    assert_eq!(first.detected, HazardEvent::None);

    // The cadence fires at 6 s, then the link takes 30 s to come back.
    steady_wind(&PULSES, 3_000, 6_000);
    clock.set(6_000);
    uplink.stall_ms = 30_000;
    let second = app.tick(&clock, &mut source, &mut uplink, &mut sink);

    assert!(
        (second.snapshot.wind_speed - 100.0).abs() < 1e-3,
        "wind read {} rpm",
        second.snapshot.wind_speed
    );
    assert_eq!(second.detected, HazardEvent::None);
    assert!(uplink.inner.published().is_empty());
}
