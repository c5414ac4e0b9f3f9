//! Scenario generator standing in for the physical sensors.
//!
//! Cycles through six fixed weather profiles, dwelling on each for
//! `phase_interval_ms`.  Every sample draws base values uniformly from the
//! active profile, adds independent jitter, then clamps to the physical
//! ranges of the real sensors.
//!
//! | # | Scenario   | rain        | wind       | temp    | accel X   | accel Y   |
//! |---|------------|-------------|------------|---------|-----------|-----------|
//! | 0 | Normal     | 500..1000   | 10..50     | 20..30  | –         | –         |
//! | 1 | Flood      | 3500..4095  | 30..80     | 22..28  | –         | –         |
//! | 2 | Storm      | 3000..4000  | 500..700   | 18..25  | –         | –         |
//! | 3 | Tornado    | 1000..2000  | 800..1000  | 20..28  | 3.0..5.0  | –         |
//! | 4 | Heatwave   | 0..500      | 0..30      | 40..45  | –         | –         |
//! | 5 | Earthquake | 500..1500   | 10..100    | 20..30  | 4.0..8.0  | 4.0..8.0  |

use core::ops::Range;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::SensorSnapshot;
use crate::app::ports::SensorSource;
use crate::hazard::HazardEvent;

const PRECIPITATION_JITTER: i32 = 50;
const WIND_JITTER: f32 = 20.0;
const TEMPERATURE_JITTER: f32 = 0.5;
const ACCELERATION_JITTER: f32 = 1.0;

const PRECIPITATION_LIMITS: (i32, i32) = (0, 4095);
const WIND_LIMITS: (f32, f32) = (0.0, 1000.0);
const TEMPERATURE_LIMITS: (f32, f32) = (-10.0, 50.0);

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Normal,
    Flood,
    Storm,
    Tornado,
    Heatwave,
    Earthquake,
}

/// Base-value ranges for one scenario.  Axes without a range sit at 0.0.
#[derive(Debug, Clone)]
pub struct Profile {
    pub precipitation: Range<i32>,
    pub wind: Range<f32>,
    pub temperature: Range<f32>,
    pub accel_x: Option<Range<f32>>,
    pub accel_y: Option<Range<f32>>,
}

static PROFILES: [Profile; 6] = [
    Profile {
        precipitation: 500..1000,
        wind: 10.0..50.0,
        temperature: 20.0..30.0,
        accel_x: None,
        accel_y: None,
    },
    Profile {
        precipitation: 3500..4095,
        wind: 30.0..80.0,
        temperature: 22.0..28.0,
        accel_x: None,
        accel_y: None,
    },
    Profile {
        precipitation: 3000..4000,
        wind: 500.0..700.0,
        temperature: 18.0..25.0,
        accel_x: None,
        accel_y: None,
    },
    Profile {
        precipitation: 1000..2000,
        wind: 800.0..1000.0,
        temperature: 20.0..28.0,
        accel_x: Some(3.0..5.0),
        accel_y: None,
    },
    Profile {
        precipitation: 0..500,
        wind: 0.0..30.0,
        temperature: 40.0..45.0,
        accel_x: None,
        accel_y: None,
    },
    Profile {
        precipitation: 500..1500,
        wind: 10.0..100.0,
        temperature: 20.0..30.0,
        accel_x: Some(4.0..8.0),
        accel_y: Some(4.0..8.0),
    },
];

impl Scenario {
    /// Phase order.
    pub const ALL: [Scenario; 6] = [
        Self::Normal,
        Self::Flood,
        Self::Storm,
        Self::Tornado,
        Self::Heatwave,
        Self::Earthquake,
    ];

    pub fn from_phase(phase: usize) -> Self {
        Self::ALL[phase % Self::ALL.len()]
    }

    pub fn profile(self) -> &'static Profile {
        &PROFILES[self as usize]
    }

    /// The hazard this scenario is meant to provoke.
    pub fn expected_hazard(self) -> HazardEvent {
        match self {
            Self::Normal => HazardEvent::None,
            Self::Flood => HazardEvent::Flood,
            Self::Storm => HazardEvent::Storm,
            Self::Tornado => HazardEvent::Tornado,
            Self::Heatwave => HazardEvent::Heatwave,
            Self::Earthquake => HazardEvent::Earthquake,
        }
    }

    /// Pre-jitter midpoint of every range.
    pub fn center(self) -> SensorSnapshot {
        let p = self.profile();
        let mid = |r: &Range<f32>| (r.start + r.end) / 2.0;
        SensorSnapshot {
            precipitation: ((p.precipitation.start + p.precipitation.end) / 2) as u16,
            wind_speed: mid(&p.wind),
            temperature: mid(&p.temperature),
            acceleration_x: p.accel_x.as_ref().map_or(0.0, mid),
            acceleration_y: p.accel_y.as_ref().map_or(0.0, mid),
        }
    }
}

// ---------------------------------------------------------------------------
// Simulated source
// ---------------------------------------------------------------------------

/// Sensor source backed by the scenario table.
pub struct SimulatedSource<R = SmallRng> {
    rng: R,
    phase: usize,
    last_advance_ms: u64,
    phase_interval_ms: u64,
}

impl SimulatedSource<SmallRng> {
    /// Reproducible source: the same seed yields the same readings.
    pub fn new(seed: u64, phase_interval_ms: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed), phase_interval_ms)
    }
}

impl<R: Rng> SimulatedSource<R> {
    pub fn with_rng(rng: R, phase_interval_ms: u64) -> Self {
        Self {
            rng,
            phase: 0,
            last_advance_ms: 0,
            phase_interval_ms,
        }
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn scenario(&self) -> Scenario {
        Scenario::from_phase(self.phase)
    }

    /// Step to the next scenario once more than one dwell interval has
    /// passed since the last step.  A long gap still advances one phase.
    fn advance(&mut self, now_ms: u64) {
        if now_ms.saturating_sub(self.last_advance_ms) > self.phase_interval_ms {
            self.phase = (self.phase + 1) % Scenario::ALL.len();
            self.last_advance_ms = now_ms;
        }
    }

    /// Draw one jittered, clamped snapshot from `scenario`.
    pub fn generate(&mut self, scenario: Scenario) -> SensorSnapshot {
        let p = scenario.profile();
        let rng = &mut self.rng;

        let precipitation = rng.gen_range(p.precipitation.clone())
            + rng.gen_range(-PRECIPITATION_JITTER..=PRECIPITATION_JITTER);
        let wind = rng.gen_range(p.wind.clone()) + rng.gen_range(-WIND_JITTER..=WIND_JITTER);
        let temperature = rng.gen_range(p.temperature.clone())
            + rng.gen_range(-TEMPERATURE_JITTER..=TEMPERATURE_JITTER);
        let ax = p.accel_x.clone().map_or(0.0, |r| rng.gen_range(r))
            + rng.gen_range(-ACCELERATION_JITTER..=ACCELERATION_JITTER);
        let ay = p.accel_y.clone().map_or(0.0, |r| rng.gen_range(r))
            + rng.gen_range(-ACCELERATION_JITTER..=ACCELERATION_JITTER);

        SensorSnapshot {
            precipitation: precipitation.clamp(PRECIPITATION_LIMITS.0, PRECIPITATION_LIMITS.1) as u16,
            wind_speed: wind.clamp(WIND_LIMITS.0, WIND_LIMITS.1),
            temperature: temperature.clamp(TEMPERATURE_LIMITS.0, TEMPERATURE_LIMITS.1),
            acceleration_x: ax,
            acceleration_y: ay,
        }
    }
}

impl<R: Rng> SensorSource for SimulatedSource<R> {
    fn sample(&mut self, now_ms: u64) -> SensorSnapshot {
        self.advance(now_ms);
        let scenario = self.scenario();
        let s = self.generate(scenario);
        debug!(
            "SIM | phase={} ({:?}) | rain={} | wind={:.1}rpm | T={:.1}\u{00b0}C | ax={:.2} ay={:.2}",
            self.phase,
            scenario,
            s.precipitation,
            s.wind_speed,
            s.temperature,
            s.acceleration_x,
            s.acceleration_y,
        );
        s
    }

    fn label(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::classify;

    #[test]
    fn scenario_centers_classify_as_intended() {
        for s in Scenario::ALL {
            assert_eq!(classify(&s.center()), s.expected_hazard(), "{:?}", s);
        }
    }

    #[test]
    fn phase_advances_only_after_interval_elapses() {
        let mut src = SimulatedSource::new(1, 10_000);
        src.sample(0);
        assert_eq!(src.phase(), 0);
        src.sample(10_000);
        assert_eq!(src.phase(), 0, "exactly one interval is not enough");
        src.sample(10_001);
        assert_eq!(src.phase(), 1);
        src.sample(20_001);
        assert_eq!(src.phase(), 1);
        src.sample(20_002);
        assert_eq!(src.phase(), 2);
    }

    #[test]
    fn phase_wraps_after_earthquake() {
        let mut src = SimulatedSource::new(1, 100);
        for i in 1..=6u64 {
            src.sample(i * 101);
        }
        assert_eq!(src.phase(), 0);
        assert_eq!(src.scenario(), Scenario::Normal);
    }

    #[test]
    fn generated_values_stay_inside_physical_limits() {
        let mut src = SimulatedSource::new(7, 10_000);
        for s in Scenario::ALL {
            for _ in 0..200 {
                let r = src.generate(s);
                assert!(r.precipitation <= 4095);
                assert!((0.0..=1000.0).contains(&r.wind_speed));
                assert!((-10.0..=50.0).contains(&r.temperature));
            }
        }
    }

    #[test]
    fn jitter_stays_within_bounds_of_profile() {
        let mut src = SimulatedSource::new(42, 10_000);
        let p = Scenario::Storm.profile();
        for _ in 0..500 {
            let r = src.generate(Scenario::Storm);
            let rain = r.precipitation as i32;
            assert!(rain >= p.precipitation.start - 50 && rain < p.precipitation.end + 51);
            assert!(r.wind_speed >= p.wind.start - 20.0 && r.wind_speed <= p.wind.end + 20.0);
            assert!(r.acceleration_y.abs() <= 1.0);
        }
    }

    #[test]
    fn same_seed_same_readings() {
        let mut a = SimulatedSource::new(99, 10_000);
        let mut b = SimulatedSource::new(99, 10_000);
        for t in (0..60_000).step_by(2_000) {
            assert_eq!(a.sample(t), b.sample(t));
        }
    }
}
