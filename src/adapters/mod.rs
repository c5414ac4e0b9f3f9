//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter      | Implements          | Connects to                 |
//! |--------------|---------------------|-----------------------------|
//! | `hardware`   | SensorSource        | Rain ADC, anemometer, MPU6050 |
//! | `log_sink`   | EventSink           | Serial log output           |
//! | `mqtt`       | (via `uplink`)      | MQTT broker                 |
//! | `thingspeak` | (via `uplink`)      | ThingSpeak HTTP API         |
//! | `time`       | (clock, delay)      | ESP32 system timer, FreeRTOS delay |
//! | `uplink`     | ConnectivityPort    | Wi-Fi + MQTT                |
//! |              | MessagePublisher    | MQTT                        |
//! |              | TelemetryUploader   | ThingSpeak                  |
//! | `wifi`       | (via `uplink`)      | ESP-IDF WiFi STA            |

pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod thingspeak;
pub mod time;
pub mod uplink;
pub mod wifi;
