//! Fuzz target: `AlertPayload::encode` and `build_query`
//!
//! Builds a payload from arbitrary device id, event code and timestamp,
//! checks the JSON encodes and parses back to the same numbers, then
//! renders a ThingSpeak query from arbitrary field values.
//!
//! cargo fuzz run fuzz_alert_payload

#![no_main]

use hazardwatch::adapters::thingspeak::{MAX_FIELDS, build_query};
use hazardwatch::app::report::AlertPayload;
use hazardwatch::hazard::HazardEvent;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 13 {
        return;
    }
    let device = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let Some(event) = HazardEvent::from_code(data[4] % 6) else {
        return;
    };
    let mut ts = [0u8; 8];
    ts.copy_from_slice(&data[5..13]);
    let timestamp = u64::from_le_bytes(ts);

    let payload = AlertPayload::new(device, event, timestamp);
    let bytes = payload.encode().expect("payload must encode");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("valid JSON");
    assert_eq!(value["device"].as_u64(), Some(u64::from(device)));
    assert_eq!(value["evento"].as_u64(), Some(u64::from(event.code())));
    assert_eq!(value["timestamp"].as_u64(), Some(timestamp));

    let mut fields = [None; MAX_FIELDS];
    for (slot, chunk) in fields.iter_mut().zip(data[13..].chunks_exact(4)) {
        *slot = Some(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    let query = build_query("KEY", &fields);
    assert!(query.starts_with("/update?api_key=KEY"));
    assert_eq!(query.matches("&field").count(), fields.iter().flatten().count());
});
