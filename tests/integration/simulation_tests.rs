//! End-to-end runs of the simulated source through the alert service.

use crate::mock_ports::{LogSink, ManualClock, MockUplink};

use hazardwatch::adapters::log_sink::LogEventSink;
use hazardwatch::app::events::AppEvent;
use hazardwatch::app::ports::SensorSource;
use hazardwatch::app::service::AlertService;
use hazardwatch::config::SystemConfig;
use hazardwatch::hazard::{HazardEvent, classify};
use hazardwatch::scheduler::Cadence;
use hazardwatch::sensors::simulated::{Scenario, SimulatedSource};

#[test]
fn every_phase_center_classifies_to_its_hazard() {
    let mut src = SimulatedSource::new(0, 10_000);
    let mut seen = Vec::new();
    // Two samples per phase window plus the wrap back to Normal.
    for t in (0..=70_000u64).step_by(5_001) {
        src.sample(t);
        let s = src.scenario();
        assert_eq!(classify(&s.center()), s.expected_hazard());
        if !seen.contains(&s) {
            seen.push(s);
        }
    }
    assert_eq!(seen, Scenario::ALL.to_vec());
}

#[test]
fn seeded_run_reports_every_hazard() {
    let config = SystemConfig::default();
    let mut app = AlertService::new(config.clone());
    let mut source = SimulatedSource::new(config.simulation_seed, u64::from(config.phase_interval_ms));
    let mut uplink = MockUplink::new();
    let mut sink = LogSink::new();
    let mut cadence = Cadence::new(config.sample_interval_ms);
    let clock = ManualClock::new();

    app.start(&source, &mut sink);
    // Two laps of the six scenarios (12 s per phase at this cadence).
    for now in (0..150_000u64).step_by(100) {
        clock.set(now);
        if cadence.is_due(now) {
            app.tick(&clock, &mut source, &mut uplink, &mut sink);
        }
    }

    let reported: Vec<HazardEvent> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::HazardReported { event, .. } => Some(*event),
            _ => None,
        })
        .collect();
    for hazard in HazardEvent::ALL.into_iter().filter(|h| h.is_hazard()) {
        assert!(reported.contains(&hazard), "{} never reported", hazard);
    }
    assert_eq!(uplink.published().len() as u64, app.report_count());
}

#[test]
fn simulated_run_with_log_sink_does_not_panic() {
    let config = SystemConfig::default();
    let mut app = AlertService::new(config.clone());
    let mut source = SimulatedSource::new(1, 10_000);
    let mut uplink = MockUplink::new();
    let mut sink = LogEventSink::new();
    let clock = ManualClock::new();

    app.start(&source, &mut sink);
    for i in 0..40u64 {
        clock.set(i * 2_000);
        app.tick(&clock, &mut source, &mut uplink, &mut sink);
    }
    assert_eq!(app.cycle_count(), 40);
    assert_eq!(source.label(), "simulated");
}
