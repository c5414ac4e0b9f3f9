//! Network uplink: Wi-Fi, MQTT and the telemetry cloud behind the three
//! outbound ports.
//!
//! On the device all three share one network stack, so the alert service
//! takes them as a single `&mut` rather than three.

use embedded_hal::delay::DelayNs;

use super::mqtt::MqttAdapter;
use super::thingspeak::ThingSpeakAdapter;
use super::wifi::WifiAdapter;
use crate::app::ports::{ConnectivityPort, MessagePublisher, TelemetryUploader};
use crate::error::CommsError;

pub struct Uplink<D> {
    pub wifi: WifiAdapter,
    pub mqtt: MqttAdapter,
    pub telemetry: ThingSpeakAdapter,
    delay: D,
}

impl<D: DelayNs> Uplink<D> {
    pub fn new(wifi: WifiAdapter, mqtt: MqttAdapter, telemetry: ThingSpeakAdapter, delay: D) -> Self {
        Self {
            wifi,
            mqtt,
            telemetry,
            delay,
        }
    }
}

impl<D: DelayNs> ConnectivityPort for Uplink<D> {
    /// Wi-Fi first, then the broker.  The broker client cannot connect
    /// without a link, so the order matters.
    fn ensure_connected(&mut self) {
        self.wifi.ensure_connected(&mut self.delay);
        self.mqtt.ensure_connected(&mut self.delay);
    }

    fn is_connected(&self) -> bool {
        self.wifi.is_connected() && self.mqtt.is_connected()
    }
}

impl<D> MessagePublisher for Uplink<D> {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        self.mqtt.publish(topic, payload)
    }
}

impl<D> TelemetryUploader for Uplink<D> {
    fn set_field(&mut self, index: u8, value: f32) {
        self.telemetry.set_field(index, value);
    }

    fn write_fields(&mut self, channel_id: u32, api_key: &str) -> u16 {
        self.telemetry.write_fields(channel_id, api_key)
    }
}
