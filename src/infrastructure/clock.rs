//! Wall clock adapter.

use chrono::{DateTime, Utc};

use crate::domain::ports::ClockPort;

/// Clock reading the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
