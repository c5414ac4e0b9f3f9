//! WiFi station-mode adapter.
//!
//! Holds the credentials and the association state, and retries with a
//! fixed backoff until the access point accepts us.  The
//! [`Uplink`](super::uplink::Uplink) composes it with the MQTT adapter to
//! implement [`ConnectivityPort`](crate::app::ports::ConnectivityPort).
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via
//!   `esp_idf_svc::wifi::BlockingWifi<EspWifi>`.
//! - **all other targets**: deterministic simulation for host-side tests.
//!   Failures and link drops are injected explicitly.

use core::fmt;

use embedded_hal::delay::DelayNs;
use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID must be 1 to 32 printable ASCII characters"),
            Self::InvalidPassword => write!(f, "passphrase must be empty (open AP) or 8 to 64 bytes"),
            Self::ConnectionFailed => write!(f, "access point did not accept the association"),
        }
    }
}

impl core::error::Error for WifiError {}

// ───────────────────────────────────────────────────────────────
// Connection state
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiState {
    Disconnected,
    Connected,
    Reconnecting { attempt: u32 },
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_graphic() || b == b' ')
}

fn validate_ssid(ssid: &str) -> Result<(), WifiError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(WifiError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), WifiError> {
    if password.is_empty() {
        return Ok(());
    }
    if !(8..=64).contains(&password.len()) {
        return Err(WifiError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
struct SimRadio {
    /// Attempts still to be refused before one succeeds.
    fail_next: u32,
    link_up: bool,
    attempts: u32,
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    state: WifiState,
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    retry_ms: u32,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    #[cfg(not(target_os = "espidf"))]
    sim: SimRadio,
}

impl WifiAdapter {
    /// Validate credentials and take ownership of the station driver.
    /// Nothing is associated until the first [`ensure_connected`](Self::ensure_connected).
    #[cfg(target_os = "espidf")]
    pub fn new(
        wifi: BlockingWifi<EspWifi<'static>>,
        ssid: &str,
        password: &str,
        retry_ms: u32,
    ) -> Result<Self, WifiError> {
        let (ssid, password) = Self::credentials(ssid, password)?;
        Ok(Self {
            state: WifiState::Disconnected,
            ssid,
            password,
            retry_ms,
            wifi,
        })
    }

    /// Validate credentials; the radio is simulated.
    #[cfg(not(target_os = "espidf"))]
    pub fn new(ssid: &str, password: &str, retry_ms: u32) -> Result<Self, WifiError> {
        let (ssid, password) = Self::credentials(ssid, password)?;
        Ok(Self {
            state: WifiState::Disconnected,
            ssid,
            password,
            retry_ms,
            sim: SimRadio::default(),
        })
    }

    fn credentials(
        ssid: &str,
        password: &str,
    ) -> Result<(heapless::String<32>, heapless::String<64>), WifiError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        let mut s = heapless::String::new();
        s.push_str(ssid).map_err(|_| WifiError::InvalidSsid)?;
        let mut p = heapless::String::new();
        p.push_str(password).map_err(|_| WifiError::InvalidPassword)?;
        Ok((s, p))
    }

    pub fn state(&self) -> WifiState {
        self.state
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn is_connected(&self) -> bool {
        self.state == WifiState::Connected && self.platform_is_connected()
    }

    /// Associate if not associated, retrying every `retry_ms` until it
    /// works.  Returns the number of attempts made (0 if already up).
    pub fn ensure_connected(&mut self, delay: &mut impl DelayNs) -> u32 {
        if self.is_connected() {
            return 0;
        }
        if self.state == WifiState::Connected {
            warn!("WiFi: link to '{}' dropped", self.ssid);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            self.state = WifiState::Reconnecting { attempt };
            info!("WiFi: connecting to '{}' (attempt {})", self.ssid, attempt);
            match self.platform_connect() {
                Ok(()) => {
                    self.state = WifiState::Connected;
                    info!("WiFi: connected after {} attempt(s)", attempt);
                    return attempt;
                }
                Err(e) => {
                    warn!("WiFi: {}, retrying in {} ms", e, self.retry_ms);
                    delay.delay_ms(self.retry_ms);
                }
            }
        }
    }

    pub fn disconnect(&mut self) {
        self.platform_disconnect();
        self.state = WifiState::Disconnected;
        info!("WiFi: disconnected");
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), WifiError> {
        let auth_method = if self.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        };
        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| WifiError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| WifiError::InvalidPassword)?,
            auth_method,
            ..Default::default()
        });

        let fail = |_| WifiError::ConnectionFailed;
        self.wifi.set_configuration(&config).map_err(fail)?;
        if !self.wifi.is_started().map_err(fail)? {
            self.wifi.start().map_err(fail)?;
        }
        self.wifi.connect().map_err(fail)?;
        self.wifi.wait_netif_up().map_err(fail)?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), WifiError> {
        self.sim.attempts += 1;
        if self.sim.fail_next > 0 {
            self.sim.fail_next -= 1;
            return Err(WifiError::ConnectionFailed);
        }
        self.sim.link_up = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_disconnect(&mut self) {
        if let Err(e) = self.wifi.disconnect() {
            warn!("WiFi: disconnect failed: {:?}", e);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_disconnect(&mut self) {
        self.sim.link_up = false;
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.sim.link_up
    }
}

// ── Simulation controls ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl WifiAdapter {
    /// Refuse the next `n` association attempts.
    pub fn sim_fail_next(&mut self, n: u32) {
        self.sim.fail_next = n;
    }

    /// Drop the link as if the AP went away.
    pub fn sim_drop_link(&mut self) {
        self.sim.link_up = false;
    }

    /// Association attempts made so far.
    pub fn sim_attempts(&self) -> u32 {
        self.sim.attempts
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
