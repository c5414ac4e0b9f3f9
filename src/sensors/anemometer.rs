//! Cup anemometer driver.
//!
//! A reed switch closes twice per rotation.  The GPIO ISR records each
//! falling edge into a [`PulseCounter`]; edges closer than
//! [`DEBOUNCE_MS`] to the previously accepted one are contact bounce and
//! are dropped.  The control loop swaps the count to zero once per cycle
//! and converts it to rotations per minute.
//!
//! The counter is two atomics and nothing else, so the ISR never blocks
//! and the reader never sees a torn value.

use core::sync::atomic::{AtomicU32, Ordering};

/// Minimum gap between accepted pulses (milliseconds); a pulse must arrive
/// strictly later than this after the previous one.
pub const DEBOUNCE_MS: u32 = 10;

/// Reed-switch closures per cup rotation.
pub const PULSES_PER_ROTATION: f32 = 2.0;

/// ISR-shared pulse accumulator.
#[derive(Debug)]
pub struct PulseCounter {
    count: AtomicU32,
    last_pulse_ms: AtomicU32,
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
            last_pulse_ms: AtomicU32::new(0),
        }
    }

    /// Record one edge seen at `now_ms` (wrapping millisecond clock).
    /// Returns `true` if the edge was accepted.
    ///
    /// Single producer: only the anemometer ISR calls this.
    pub fn record(&self, now_ms: u32) -> bool {
        let last = self.last_pulse_ms.load(Ordering::Relaxed);
        if now_ms.wrapping_sub(last) <= DEBOUNCE_MS {
            return false;
        }
        self.last_pulse_ms.store(now_ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Release);
        true
    }

    /// Take every pulse accepted since the previous call.
    pub fn take(&self) -> u32 {
        self.count.swap(0, Ordering::AcqRel)
    }

    /// Pending pulse count without resetting it.
    pub fn pending(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    /// Timestamp of the last accepted pulse.
    pub fn last_pulse_ms(&self) -> u32 {
        self.last_pulse_ms.load(Ordering::Relaxed)
    }
}

/// The board's single anemometer counter.
/// `static` because ESP-IDF ISR callbacks cannot capture state.
pub static ANEMOMETER_PULSES: PulseCounter = PulseCounter::new();

/// Called from the GPIO ISR on each falling edge.
pub fn anemometer_isr_handler(now_ms: u32) {
    ANEMOMETER_PULSES.record(now_ms);
}

/// Result of one wind measurement window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindReading {
    /// Pulses accepted during the window.
    pub pulses: u32,
    /// Window length (milliseconds).
    pub window_ms: u64,
    /// Rotation rate (rpm).
    pub rpm: f32,
}

/// Anemometer driver sampling a [`PulseCounter`].
pub struct Anemometer {
    pulses: &'static PulseCounter,
    last_sample_ms: u64,
}

impl Anemometer {
    pub fn new(pulses: &'static PulseCounter) -> Self {
        Self {
            pulses,
            last_sample_ms: 0,
        }
    }

    /// Drain the counter and convert the window to rpm.
    pub fn read(&mut self, now_ms: u64) -> WindReading {
        let count = self.pulses.take();
        let window_ms = now_ms.saturating_sub(self.last_sample_ms);
        self.last_sample_ms = now_ms;

        WindReading {
            pulses: count,
            window_ms,
            rpm: pulses_to_rpm(count, window_ms),
        }
    }
}

/// `rpm = rotations × (60 000 / window_ms)`.
pub fn pulses_to_rpm(pulses: u32, window_ms: u64) -> f32 {
    if pulses == 0 || window_ms == 0 {
        return 0.0;
    }
    (pulses as f32 / PULSES_PER_ROTATION) * (60_000.0 / window_ms as f32)
}
