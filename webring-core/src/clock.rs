//! [`Clock`] implementations.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::traits::Clock;

/// The real monotonic clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Starts at the instant it was created and advances by explicit steps, so
/// TTL expiry can be exercised without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_frozen() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(clock.now(), t0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new();
        let t0 = clock.now();
        clock.advance(Duration::from_secs(301));
        assert_eq!(clock.now().duration_since(t0), Duration::from_secs(301));
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let t0 = clock.now();
        assert!(clock.now() >= t0);
    }
}
