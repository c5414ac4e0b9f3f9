//! Hazard detection core: classification and report suppression.
//!
//! ```text
//!  SensorSnapshot ──▶ classify() ──▶ HazardEvent ──▶ Notifier ──▶ Transition
//!                     (pure rules)                  (last reported)
//! ```
//!
//! Both halves are pure: nothing in here touches hardware, the network,
//! or global state.

pub mod classifier;
pub mod notifier;

pub use classifier::classify;
pub use notifier::{next_transition, Notifier, Transition};

use serde::{Deserialize, Serialize};

/// One discrete classified environmental condition.
///
/// The discriminants are the transport codes sent to MQTT subscribers and
/// the telemetry cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum HazardEvent {
    #[default]
    None = 0,
    Flood = 1,
    Storm = 2,
    Tornado = 3,
    Heatwave = 4,
    Earthquake = 5,
}

impl HazardEvent {
    /// All values, in transport-code order.
    pub const ALL: [HazardEvent; 6] = [
        Self::None,
        Self::Flood,
        Self::Storm,
        Self::Tornado,
        Self::Heatwave,
        Self::Earthquake,
    ];

    /// Numeric code used on the wire.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// `true` for every variant except [`HazardEvent::None`].
    pub const fn is_hazard(self) -> bool {
        !matches!(self, Self::None)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Flood => "FLOOD",
            Self::Storm => "STORM",
            Self::Tornado => "TORNADO",
            Self::Heatwave => "HEATWAVE",
            Self::Earthquake => "EARTHQUAKE",
        }
    }
}

impl core::fmt::Display for HazardEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
