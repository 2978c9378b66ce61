//! Wall-clock port definition.

use chrono::{DateTime, Utc};

/// Source of the current instant; statuses are derived against it.
pub trait ClockPort: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;

    /// Clock frozen at a settable instant.
    pub struct FixedClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl FixedClock {
        /// Creates a clock frozen at `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        /// Moves the clock.
        pub fn set(&self, now: DateTime<Utc>) {
            *self.now.lock() = now;
        }

        /// Moves the clock forward by `step`.
        pub fn advance(&self, step: chrono::TimeDelta) {
            *self.now.lock() += step;
        }
    }

    impl ClockPort for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }
}
