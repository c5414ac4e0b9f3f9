//! Fuzz target: `classify` + `Notifier::observe`
//!
//! Decodes arbitrary bytes into a stream of 18-byte sensor snapshots
//! (u16 precipitation, then four little-endian f32s, including NaN and
//! infinities) and pushes them through the classifier and the notifier.
//! Asserts that nothing panics and that a hazard is never reported twice
//! in a row.
//!
//! cargo fuzz run fuzz_hazard_pipeline

#![no_main]

use hazardwatch::hazard::{HazardEvent, Notifier, classify};
use hazardwatch::sensors::SensorSnapshot;
use libfuzzer_sys::fuzz_target;

fn f32_at(chunk: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([chunk[at], chunk[at + 1], chunk[at + 2], chunk[at + 3]])
}

fuzz_target!(|data: &[u8]| {
    let mut notifier = Notifier::new();
    let mut previous_report: Option<HazardEvent> = None;

    for chunk in data.chunks_exact(18) {
        let snapshot = SensorSnapshot {
            precipitation: u16::from_le_bytes([chunk[0], chunk[1]]),
            wind_speed: f32_at(chunk, 2),
            temperature: f32_at(chunk, 6),
            acceleration_x: f32_at(chunk, 10),
            acceleration_y: f32_at(chunk, 14),
        };

        let detected = classify(&snapshot);
        assert_eq!(classify(&snapshot), detected, "classify must be pure");

        let transition = notifier.observe(detected);
        match transition.reported() {
            Some(event) => {
                assert!(event.is_hazard());
                assert_ne!(previous_report, Some(event), "duplicate report");
                previous_report = Some(event);
            }
            None if !detected.is_hazard() => previous_report = None,
            None => {}
        }
        assert_eq!(notifier.last_reported(), transition.next_state());
    }
});
