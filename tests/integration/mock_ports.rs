//! Mock port adapters for integration tests.
//!
//! Records every outbound call so tests can assert on the full delivery
//! history without a network.

use std::cell::Cell;
use std::rc::Rc;

use hazardwatch::app::events::AppEvent;
use hazardwatch::app::ports::{
    Clock, ConnectivityPort, EventSink, MessagePublisher, SensorSource, TelemetryUploader,
};
use hazardwatch::error::CommsError;
use hazardwatch::sensors::SensorSnapshot;

// ── Manual clock ──────────────────────────────────────────────

/// Test clock.  Clones share the same time, so a mock port can move it.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: u64) {
        self.0.set(now_ms);
    }

    pub fn advance(&self, ms: u64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}

// ── Scripted sensor source ────────────────────────────────────

/// Replays a fixed list of snapshots, repeating the last one.
pub struct ScriptedSource {
    script: Vec<SensorSnapshot>,
    next: usize,
    pub sampled_at: Vec<u64>,
}

impl ScriptedSource {
    pub fn new(script: Vec<SensorSnapshot>) -> Self {
        Self {
            script,
            next: 0,
            sampled_at: Vec::new(),
        }
    }
}

impl SensorSource for ScriptedSource {
    fn sample(&mut self, now_ms: u64) -> SensorSnapshot {
        self.sampled_at.push(now_ms);
        let i = self.next.min(self.script.len() - 1);
        self.next += 1;
        self.script[i]
    }

    fn label(&self) -> &'static str {
        "scripted"
    }
}

// ── Mock uplink ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum UplinkCall {
    EnsureConnected,
    Publish { topic: String, payload: String },
    SetField { index: u8, value: f32 },
    WriteFields { channel_id: u32, api_key: String },
}

pub struct MockUplink {
    pub calls: Vec<UplinkCall>,
    pub connected: bool,
    pub fail_publish: bool,
    pub upload_status: u16,
    /// Every `ensure_connected` moves this clock forward, standing in for
    /// a blocking reconnect.
    pub reconnect: Option<(ManualClock, u64)>,
}

#[allow(dead_code)]
impl MockUplink {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            connected: false,
            fail_publish: false,
            upload_status: 200,
            reconnect: None,
        }
    }

    pub fn published(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                UplinkCall::Publish { payload, .. } => Some(payload.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn uploads(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, UplinkCall::WriteFields { .. }))
            .count()
    }
}

impl Default for MockUplink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityPort for MockUplink {
    fn ensure_connected(&mut self) {
        self.calls.push(UplinkCall::EnsureConnected);
        if let Some((clock, stall_ms)) = &self.reconnect {
            clock.advance(*stall_ms);
        }
        self.connected = true;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

impl MessagePublisher for MockUplink {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if self.fail_publish {
            return Err(CommsError::PublishFailed);
        }
        self.calls.push(UplinkCall::Publish {
            topic: topic.to_owned(),
            payload: String::from_utf8_lossy(payload).into_owned(),
        });
        Ok(())
    }
}

impl TelemetryUploader for MockUplink {
    fn set_field(&mut self, index: u8, value: f32) {
        self.calls.push(UplinkCall::SetField { index, value });
    }

    fn write_fields(&mut self, channel_id: u32, api_key: &str) -> u16 {
        self.calls.push(UplinkCall::WriteFields {
            channel_id,
            api_key: api_key.to_owned(),
        });
        self.upload_status
    }
}

// ── Recording sink ────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Snapshot helper ───────────────────────────────────────────

pub fn snap(precipitation: u16, wind: f32, temp: f32, ax: f32, ay: f32) -> SensorSnapshot {
    SensorSnapshot {
        precipitation,
        wind_speed: wind,
        temperature: temp,
        acceleration_x: ax,
        acceleration_y: ay,
    }
}
