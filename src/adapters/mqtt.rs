//! MQTT publisher adapter.
//!
//! One broker session, publish-only.  The broker address, client id and
//! retry backoff come from [`SystemConfig`](crate::config::SystemConfig).
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::mqtt::client::EspMqttClient`.
//!   The client runs its own task; session state is tracked from its
//!   `Connected`/`Disconnected` events into an atomic flag.
//! - **all other targets**: an in-memory broker that records every
//!   publish, with failure injection for tests.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::error::CommsError;

#[cfg(target_os = "espidf")]
use std::sync::Arc;
#[cfg(target_os = "espidf")]
use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(target_os = "espidf")]
use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration, QoS};

/// Broker endpoint and session parameters.
#[derive(Debug, Clone)]
pub struct MqttSettings {
    pub broker: heapless::String<64>,
    pub port: u16,
    pub client_id: heapless::String<32>,
    pub retry_ms: u32,
}

impl MqttSettings {
    pub fn from_config(config: &crate::config::SystemConfig) -> Self {
        Self {
            broker: config.mqtt_broker.clone(),
            port: config.mqtt_port,
            client_id: config.mqtt_client_id.clone(),
            retry_ms: config.mqtt_retry_ms,
        }
    }

    /// `mqtt://host:port`
    pub fn url(&self) -> String {
        format!("mqtt://{}:{}", self.broker, self.port)
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
struct SimBroker {
    session_up: bool,
    refuse_next: u32,
    fail_publish: bool,
    attempts: u32,
    published: Vec<(String, Vec<u8>)>,
}

// ───────────────────────────────────────────────────────────────
// MQTT adapter
// ───────────────────────────────────────────────────────────────

pub struct MqttAdapter {
    settings: MqttSettings,
    #[cfg(target_os = "espidf")]
    client: Option<EspMqttClient<'static>>,
    #[cfg(target_os = "espidf")]
    connected: Arc<AtomicBool>,
    #[cfg(not(target_os = "espidf"))]
    sim: SimBroker,
}

impl MqttAdapter {
    /// No network traffic until the first [`ensure_connected`](Self::ensure_connected).
    pub fn new(settings: MqttSettings) -> Self {
        Self {
            settings,
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(target_os = "espidf")]
            connected: Arc::new(AtomicBool::new(false)),
            #[cfg(not(target_os = "espidf"))]
            sim: SimBroker::default(),
        }
    }

    pub fn settings(&self) -> &MqttSettings {
        &self.settings
    }

    /// Open the broker session if it is down, retrying every `retry_ms`.
    /// Returns the number of attempts made (0 if already up).
    pub fn ensure_connected(&mut self, delay: &mut impl DelayNs) -> u32 {
        if self.is_connected() {
            return 0;
        }
        let mut attempt = 0;
        loop {
            attempt += 1;
            info!(
                "MQTT: connecting to {} as '{}' (attempt {})",
                self.settings.url(),
                self.settings.client_id,
                attempt
            );
            match self.platform_connect() {
                Ok(()) => {
                    info!("MQTT: connected");
                    return attempt;
                }
                Err(e) => {
                    warn!("MQTT: {}, retrying in {} ms", e, self.settings.retry_ms);
                    delay.delay_ms(self.settings.retry_ms);
                }
            }
        }
    }

    /// Hand one message to the client (QoS 0, not retained).
    pub fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if !self.is_connected() {
            warn!("MQTT: publish to '{}' without a session", topic);
            return Err(CommsError::PublishFailed);
        }
        self.platform_publish(topic, payload)?;
        debug!("MQTT: published {} bytes to '{}'", payload.len(), topic);
        Ok(())
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    pub fn is_connected(&self) -> bool {
        self.client.is_some() && self.connected.load(Ordering::Acquire)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn is_connected(&self) -> bool {
        self.sim.session_up
    }

    /// Create the client on first use; afterwards the client reconnects on
    /// its own and this only reports whether the session is up yet.
    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        if self.client.is_none() {
            let conf = MqttClientConfiguration {
                client_id: Some(self.settings.client_id.as_str()),
                ..Default::default()
            };
            let flag = Arc::clone(&self.connected);
            let client = EspMqttClient::new_cb(&self.settings.url(), &conf, move |event| {
                match event.payload() {
                    EventPayload::Connected(_) => flag.store(true, Ordering::Release),
                    EventPayload::Disconnected => flag.store(false, Ordering::Release),
                    EventPayload::Error(e) => log::warn!("MQTT: client error {:?}", e),
                    _ => {}
                }
            })
            .map_err(|e| {
                warn!("MQTT: client init failed: {:?}", e);
                CommsError::ConnectivityLost
            })?;
            self.client = Some(client);
        }
        if self.connected.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(CommsError::ConnectivityLost)
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), CommsError> {
        self.sim.attempts += 1;
        if self.sim.refuse_next > 0 {
            self.sim.refuse_next -= 1;
            return Err(CommsError::ConnectivityLost);
        }
        self.sim.session_up = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        let client = self.client.as_mut().ok_or(CommsError::PublishFailed)?;
        client
            .publish(topic, QoS::AtMostOnce, false, payload)
            .map(|_| ())
            .map_err(|e| {
                warn!("MQTT: publish failed: {:?}", e);
                CommsError::PublishFailed
            })
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if self.sim.fail_publish {
            return Err(CommsError::PublishFailed);
        }
        self.sim.published.push((topic.to_owned(), payload.to_vec()));
        Ok(())
    }
}

// ── Simulation controls ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl MqttAdapter {
    /// Refuse the next `n` session attempts.
    pub fn sim_refuse_next(&mut self, n: u32) {
        self.sim.refuse_next = n;
    }

    /// Make every publish fail until reset.
    pub fn sim_fail_publish(&mut self, fail: bool) {
        self.sim.fail_publish = fail;
    }

    /// Drop the broker session.
    pub fn sim_drop_session(&mut self) {
        self.sim.session_up = false;
    }

    pub fn sim_attempts(&self) -> u32 {
        self.sim.attempts
    }

    /// Every `(topic, payload)` accepted so far.
    pub fn sim_published(&self) -> &[(String, Vec<u8>)] {
        &self.sim.published
    }
}
