//! ThingSpeak-style telemetry uploader.
//!
//! Fields are staged with [`set_field`](ThingSpeakAdapter::set_field) and
//! flushed as one `GET /update` request.  The endpoint answers 200 with
//! the new entry id on success; anything else is a rejection.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::http::client::EspHttpConnection`.
//! - **all other targets**: records the request and answers a scripted
//!   status (200 unless told otherwise).

use core::fmt::Write as _;

use log::{debug, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::http::Method;
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

/// ThingSpeak channels have eight fields.
pub const MAX_FIELDS: usize = 8;

pub const DEFAULT_HOST: &str = "api.thingspeak.com";

/// Request path and query for one update.  Unset fields are omitted.
pub fn build_query(api_key: &str, fields: &[Option<f32>; MAX_FIELDS]) -> String {
    let mut q = format!("/update?api_key={}", api_key);
    for (i, value) in fields.iter().enumerate() {
        if let Some(v) = value {
            // Writing into a String cannot fail.
            let _ = write!(q, "&field{}={}", i + 1, v);
        }
    }
    q
}

pub struct ThingSpeakAdapter {
    host: &'static str,
    fields: [Option<f32>; MAX_FIELDS],
    #[cfg(not(target_os = "espidf"))]
    sim_status: u16,
    #[cfg(not(target_os = "espidf"))]
    sim_requests: Vec<(u32, String)>,
}

impl Default for ThingSpeakAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl ThingSpeakAdapter {
    pub fn new(host: &'static str) -> Self {
        Self {
            host,
            fields: [None; MAX_FIELDS],
            #[cfg(not(target_os = "espidf"))]
            sim_status: 200,
            #[cfg(not(target_os = "espidf"))]
            sim_requests: Vec::new(),
        }
    }

    /// Stage `value` for 1-based field `index`.  Out-of-range indices are
    /// ignored with a warning.
    pub fn set_field(&mut self, index: u8, value: f32) {
        match (index as usize).checked_sub(1).and_then(|i| self.fields.get_mut(i)) {
            Some(slot) => *slot = Some(value),
            None => warn!("ThingSpeak: field {} out of range 1..={}", index, MAX_FIELDS),
        }
    }

    pub fn staged(&self) -> &[Option<f32>; MAX_FIELDS] {
        &self.fields
    }

    /// Send the staged fields and clear them.  Returns the HTTP status
    /// (0 if no response was received).
    pub fn write_fields(&mut self, channel_id: u32, api_key: &str) -> u16 {
        let query = build_query(api_key, &self.fields);
        self.fields = [None; MAX_FIELDS];
        let status = self.platform_send(channel_id, &query);
        if status == 200 {
            debug!("ThingSpeak: channel {} updated", channel_id);
        } else {
            warn!("ThingSpeak: channel {} update failed (status {})", channel_id, status);
        }
        status
    }

    #[cfg(target_os = "espidf")]
    fn platform_send(&mut self, _channel_id: u32, query: &str) -> u16 {
        let url = format!("http://{}{}", self.host, query);
        let result = EspHttpConnection::new(&Configuration::default()).and_then(|mut conn| {
            conn.initiate_request(Method::Get, &url, &[])?;
            conn.initiate_response()?;
            Ok(conn.status())
        });
        match result {
            Ok(status) => status,
            Err(e) => {
                warn!("ThingSpeak: request to {} failed: {:?}", self.host, e);
                0
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_send(&mut self, channel_id: u32, query: &str) -> u16 {
        debug!("ThingSpeak(sim): GET http://{}{}", self.host, query);
        self.sim_requests.push((channel_id, query.to_owned()));
        self.sim_status
    }
}

// ── Simulation controls ───────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
impl ThingSpeakAdapter {
    /// Status returned by every following request.
    pub fn sim_respond_with(&mut self, status: u16) {
        self.sim_status = status;
    }

    /// `(channel, path+query)` of every request sent.
    pub fn sim_requests(&self) -> &[(u32, String)] {
        &self.sim_requests
    }
}
