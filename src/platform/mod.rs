//! Platform abstraction layer
//!
//! The simulation only needs a monotonic millisecond clock; [`SimClock`]
//! derives one from the delta-times fed into each tick so that runs stay
//! reproducible regardless of wall-clock jitter.

use serde::{Deserialize, Serialize};

/// Monotonic simulation time source
pub trait Clock {
    /// Milliseconds since the clock started
    fn now_ms(&self) -> f64;
}

/// Clock advanced explicitly by the tick driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    elapsed_ms: f64,
}

impl SimClock {
    /// Advance by `dt` seconds; negative or NaN deltas are ignored
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed_ms += f64::from(dt) * 1000.0;
        }
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_is_monotonic() {
        let mut clock = SimClock::default();
        assert_eq!(clock.now_ms(), 0.0);
        clock.advance(0.5);
        assert_eq!(clock.now_ms(), 500.0);
        clock.advance(-1.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.now_ms(), 500.0);
    }
}
