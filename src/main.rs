//! HazardWatch Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareSource / SimulatedSource     LogEventSink             │
//! │  (SensorSource)                       (EventSink)              │
//! │  Uplink = WifiAdapter + MqttAdapter + ThingSpeakAdapter        │
//! │  (Connectivity · Publisher · TelemetryUploader)                │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AlertService (pure logic)                 │    │
//! │  │  classify · Notifier                                   │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Cadence (sample_interval_ms)                                  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, EspWifi};
use log::{error, info};

use hazardwatch::adapters::hardware::HardwareSource;
use hazardwatch::adapters::log_sink::LogEventSink;
use hazardwatch::adapters::mqtt::{MqttAdapter, MqttSettings};
use hazardwatch::adapters::thingspeak::ThingSpeakAdapter;
use hazardwatch::adapters::time::{MonotonicClock, SleepDelay};
use hazardwatch::adapters::uplink::Uplink;
use hazardwatch::adapters::wifi::WifiAdapter;
use hazardwatch::app::ports::SensorSource;
use hazardwatch::app::service::AlertService;
use hazardwatch::config::{SourceKind, SystemConfig};
use hazardwatch::drivers::hw_init;
use hazardwatch::pins;
use hazardwatch::scheduler::Cadence;
use hazardwatch::sensors::SensorHub;
use hazardwatch::sensors::anemometer::{ANEMOMETER_PULSES, Anemometer};
use hazardwatch::sensors::mpu6050::{DEFAULT_ADDRESS, Mpu6050};
use hazardwatch::sensors::rain::RainSensor;
use hazardwatch::sensors::simulated::SimulatedSource;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  HazardWatch v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config.validate()?;
    info!(
        "Device {} | source={:?} | cadence={}ms",
        config.device_id, config.source, config.sample_interval_ms
    );

    // ── 3. Network uplink ─────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs))?,
        sysloop,
    )?;
    let wifi = WifiAdapter::new(
        wifi,
        &config.wifi_ssid,
        &config.wifi_password,
        config.wifi_retry_ms,
    )?;
    let mut uplink = Uplink::new(
        wifi,
        MqttAdapter::new(MqttSettings::from_config(&config)),
        ThingSpeakAdapter::default(),
        SleepDelay,
    );

    let mut sink = LogEventSink::new();
    let mut service = AlertService::new(config.clone());
    let clock = MonotonicClock::new();

    // ── 4. Sensor source ──────────────────────────────────────
    match config.source {
        SourceKind::Simulated => {
            // SAFETY: esp_random reads the hardware RNG register.
            let seed = unsafe {
                (u64::from(esp_idf_svc::sys::esp_random()) << 32)
                    | u64::from(esp_idf_svc::sys::esp_random())
            };
            let mut source = SimulatedSource::new(seed, u64::from(config.phase_interval_ms));
            run(&mut service, &mut source, &mut uplink, &mut sink, &clock)
        }
        SourceKind::Hardware => {
            hw_init::init_peripherals()?;
            hw_init::init_isr_service()?;

            let i2c = I2cDriver::new(
                peripherals.i2c0,
                peripherals.pins.gpio21,
                peripherals.pins.gpio22,
                &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUD_HZ)),
            )?;
            info!(
                "I2C0 up (SDA=GPIO{}, SCL=GPIO{}, {} Hz)",
                pins::I2C_SDA_GPIO,
                pins::I2C_SCL_GPIO,
                pins::I2C_BAUD_HZ
            );

            // No accelerometer, no earthquake or temperature rules: halt.
            let imu = match Mpu6050::new(i2c, DEFAULT_ADDRESS) {
                Ok(imu) => imu,
                Err(e) => {
                    error!("MPU6050 init failed: {}, halting", e);
                    loop {
                        FreeRtos::delay_ms(1_000);
                    }
                }
            };

            let hub = SensorHub::new(
                RainSensor::new(pins::RAIN_ADC_CHANNEL),
                Anemometer::new(&ANEMOMETER_PULSES),
                imu,
            );
            let mut source = HardwareSource::new(hub);
            run(&mut service, &mut source, &mut uplink, &mut sink, &clock)
        }
    }
}

// ── Control loop ──────────────────────────────────────────────

fn run(
    service: &mut AlertService,
    source: &mut impl SensorSource,
    uplink: &mut Uplink<SleepDelay>,
    sink: &mut LogEventSink,
    clock: &MonotonicClock,
) -> ! {
    service.start(source, sink);
    let mut cadence = Cadence::new(service.config().sample_interval_ms);
    let mut delay = SleepDelay;

    info!("System ready. Entering control loop.");

    loop {
        let now = clock.uptime_ms();
        if cadence.is_due(now) {
            service.tick(clock, source, uplink, sink);
        }
        let idle = cadence.remaining_ms(clock.uptime_ms()).max(1);
        delay.delay_ms(idle.min(u64::from(u32::MAX)) as u32);
    }
}
