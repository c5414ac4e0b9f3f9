//! Ordered threshold rules.
//!
//! A snapshot can satisfy several rules at once (a storm also has heavy
//! rain, a tornado often shakes the accelerometer).  Rules are evaluated
//! top to bottom and the first match wins, so the table order below is
//! part of the contract.
//!
//! | # | Condition                                   | Event      |
//! |---|---------------------------------------------|------------|
//! | 1 | precipitation > 3000 and wind > 500         | Storm      |
//! | 2 | wind > 800                                  | Tornado    |
//! | 3 | precipitation > 3500                        | Flood      |
//! | 4 | temperature > 40                            | Heatwave   |
//! | 5 | abs(accel X) > 3.0 or abs(accel Y) > 3.0    | Earthquake |

use super::HazardEvent;
use crate::sensors::SensorSnapshot;

/// Raw rain-sensor level above which a windy reading counts as a storm.
pub const STORM_PRECIPITATION: u16 = 3000;
/// Wind speed (rpm) above which heavy rain counts as a storm.
pub const STORM_WIND: f32 = 500.0;
/// Wind speed (rpm) for a tornado.
pub const TORNADO_WIND: f32 = 800.0;
/// Raw rain-sensor level for a flood.
pub const FLOOD_PRECIPITATION: u16 = 3500;
/// Air temperature (°C) for a heatwave.
pub const HEATWAVE_TEMPERATURE: f32 = 40.0;
/// Horizontal acceleration magnitude (m/s²) on either axis for an earthquake.
pub const QUAKE_ACCELERATION: f32 = 3.0;

/// Derive at most one hazard from a snapshot.  All comparisons are strict.
pub fn classify(s: &SensorSnapshot) -> HazardEvent {
    if s.precipitation > STORM_PRECIPITATION && s.wind_speed > STORM_WIND {
        HazardEvent::Storm
    } else if s.wind_speed > TORNADO_WIND {
        HazardEvent::Tornado
    } else if s.precipitation > FLOOD_PRECIPITATION {
        HazardEvent::Flood
    } else if s.temperature > HEATWAVE_TEMPERATURE {
        HazardEvent::Heatwave
    } else if s.acceleration_x.abs() > QUAKE_ACCELERATION
        || s.acceleration_y.abs() > QUAKE_ACCELERATION
    {
        HazardEvent::Earthquake
    } else {
        HazardEvent::None
    }
}
