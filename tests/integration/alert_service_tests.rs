//! Integration tests for the sample → classify → notify → deliver pipeline.
//!
//! These run on the host (x86_64) and drive [`AlertService`] through
//! scripted sensor readings, asserting on what reaches the uplink.

use crate::mock_ports::{LogSink, ManualClock, MockUplink, ScriptedSource, UplinkCall, snap};

use hazardwatch::app::events::AppEvent;
use hazardwatch::app::service::AlertService;
use hazardwatch::config::SystemConfig;
use hazardwatch::error::CommsError;
use hazardwatch::hazard::{HazardEvent, Transition};
use hazardwatch::sensors::SensorSnapshot;

fn storm() -> SensorSnapshot {
    snap(3_800, 600.0, 20.0, 0.0, 0.0)
}

fn calm() -> SensorSnapshot {
    snap(100, 5.0, 20.0, 0.0, 0.0)
}

fn run(script: Vec<SensorSnapshot>) -> (AlertService, MockUplink, LogSink) {
    let cycles = script.len();
    let mut app = AlertService::new(SystemConfig::default());
    let mut source = ScriptedSource::new(script);
    let mut uplink = MockUplink::new();
    let mut sink = LogSink::new();
    let clock = ManualClock::new();
    app.start(&source, &mut sink);
    for i in 0..cycles {
        clock.set(i as u64 * 2_000);
        app.tick(&clock, &mut source, &mut uplink, &mut sink);
    }
    (app, uplink, sink)
}

#[test]
fn start_announces_source() {
    let (_, _, sink) = run(vec![]);
    assert_eq!(sink.events, vec![AppEvent::Started { source: "scripted" }]);
}

// ── Report-once semantics ─────────────────────────────────────

#[test]
fn sustained_storm_is_published_once() {
    let (app, uplink, _) = run(vec![storm(), storm(), storm()]);
    assert_eq!(uplink.published().len(), 1);
    assert_eq!(uplink.uploads(), 1);
    assert_eq!(app.last_reported(), HazardEvent::Storm);
    assert_eq!(app.report_count(), 1);
    assert_eq!(app.cycle_count(), 3);
}

#[test]
fn storm_calm_storm_is_published_twice() {
    let (app, uplink, sink) = run(vec![storm(), calm(), storm()]);
    assert_eq!(uplink.published().len(), 2);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::HazardCleared { previous: HazardEvent::Storm })),
        1
    );
    assert_eq!(app.last_reported(), HazardEvent::Storm);
}

#[test]
fn calm_reading_resets_last_reported() {
    let (app, uplink, sink) = run(vec![calm()]);
    assert!(uplink.published().is_empty());
    assert_eq!(app.last_reported(), HazardEvent::None);
    // Nothing was active, so nothing is announced as cleared.
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HazardCleared { .. })), 0);
}

#[test]
fn every_cycle_checks_connectivity_first() {
    let (_, uplink, _) = run(vec![calm(), storm()]);
    assert_eq!(uplink.calls[0], UplinkCall::EnsureConnected);
    let ensures = uplink
        .calls
        .iter()
        .filter(|c| **c == UplinkCall::EnsureConnected)
        .count();
    assert_eq!(ensures, 2);
}

#[test]
fn tick_reports_transition() {
    let mut app = AlertService::new(SystemConfig::default());
    let mut source = ScriptedSource::new(vec![snap(100, 5.0, 42.0, 0.0, 0.0)]);
    let mut uplink = MockUplink::new();
    let mut sink = LogSink::new();
    let clock = ManualClock::new();

    let first = app.tick(&clock, &mut source, &mut uplink, &mut sink);
    assert_eq!(first.detected, HazardEvent::Heatwave);
    assert_eq!(first.transition, Transition::Report(HazardEvent::Heatwave));

    clock.set(2_000);
    let second = app.tick(&clock, &mut source, &mut uplink, &mut sink);
    assert_eq!(second.transition, Transition::Repeat(HazardEvent::Heatwave));
    assert_eq!(source.sampled_at, vec![0, 2_000]);
}

// ── Wire format ───────────────────────────────────────────────

#[test]
fn published_payload_is_compact_json() {
    let (_, uplink, _) = run(vec![calm(), snap(100, 5.0, 20.0, 4.0, 0.0)]);
    assert_eq!(
        uplink.published(),
        vec![r#"{"device":3232321,"evento":5,"timestamp":2000}"#]
    );
    let topic = uplink.calls.iter().find_map(|c| match c {
        UplinkCall::Publish { topic, .. } => Some(topic.clone()),
        _ => None,
    });
    assert_eq!(topic.as_deref(), Some("alerthaven/eventos"));
}

#[test]
fn telemetry_carries_device_event_and_precipitation() {
    let (_, uplink, _) = run(vec![storm()]);
    let fields: Vec<_> = uplink
        .calls
        .iter()
        .filter_map(|c| match c {
            UplinkCall::SetField { index, value } => Some((*index, *value)),
            _ => None,
        })
        .collect();
    assert_eq!(fields, vec![(1, 3_232_321.0), (2, 2.0), (3, 3_800.0)]);
    assert!(uplink.calls.iter().any(|c| matches!(
        c,
        UplinkCall::WriteFields { channel_id: 2_969_337, .. }
    )));
}

// ── Delivery failures ─────────────────────────────────────────

#[test]
fn failed_publish_does_not_roll_back_notifier() {
    let mut app = AlertService::new(SystemConfig::default());
    let mut source = ScriptedSource::new(vec![storm(), storm()]);
    let mut uplink = MockUplink::new();
    uplink.fail_publish = true;
    let mut sink = LogSink::new();
    let clock = ManualClock::new();

    app.tick(&clock, &mut source, &mut uplink, &mut sink);
    clock.set(2_000);
    app.tick(&clock, &mut source, &mut uplink, &mut sink);

    assert_eq!(app.last_reported(), HazardEvent::Storm);
    assert_eq!(app.report_count(), 1, "a failed report is not retried");
    assert!(sink.events.contains(&AppEvent::DeliveryFailed(CommsError::PublishFailed)));
    // The upload still goes out.
    assert_eq!(uplink.uploads(), 1);
}

#[test]
fn rejected_upload_is_reported_with_status() {
    let mut app = AlertService::new(SystemConfig::default());
    let mut source = ScriptedSource::new(vec![storm()]);
    let mut uplink = MockUplink::new();
    uplink.upload_status = 0;
    let mut sink = LogSink::new();

    app.tick(&ManualClock::new(), &mut source, &mut uplink, &mut sink);

    assert!(sink.events.contains(&AppEvent::Published { event: HazardEvent::Storm }));
    assert!(sink.events.contains(&AppEvent::DeliveryFailed(CommsError::UploadRejected(0))));
    assert_eq!(app.failure_count(), 1);
}

#[test]
fn hazard_change_reports_new_hazard_immediately() {
    let (_, uplink, sink) = run(vec![
        snap(3_600, 50.0, 20.0, 0.0, 0.0),
        storm(),
        snap(1_500, 900.0, 20.0, 4.0, 0.0),
    ]);
    let reported: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::HazardReported { event, .. } => Some(*event),
            _ => None,
        })
        .collect();
    assert_eq!(
        reported,
        vec![HazardEvent::Flood, HazardEvent::Storm, HazardEvent::Tornado]
    );
    assert_eq!(uplink.published().len(), 3);
}

// ── Reconnect stalls ──────────────────────────────────────────

#[test]
fn cycle_time_is_read_after_the_link_is_up() {
    let mut app = AlertService::new(SystemConfig::default());
    let mut source = ScriptedSource::new(vec![calm(), storm()]);
    let clock = ManualClock::new();
    let mut uplink = MockUplink::new();
    uplink.reconnect = Some((clock.clone(), 30_000));
    let mut sink = LogSink::new();

    app.tick(&clock, &mut source, &mut uplink, &mut sink);
    clock.advance(2_000);
    app.tick(&clock, &mut source, &mut uplink, &mut sink);

    assert_eq!(source.sampled_at, vec![30_000, 62_000]);
    assert!(sink.events.contains(&AppEvent::HazardReported {
        event: HazardEvent::Storm,
        timestamp_ms: 62_000,
    }));
    assert_eq!(
        uplink.published(),
        vec![r#"{"device":3232321,"evento":2,"timestamp":62000}"#]
    );
}
