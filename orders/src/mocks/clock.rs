//! Fixed clock for deterministic tests.

use crate::environment::Clock;
use chrono::{DateTime, Utc};

/// Fixed clock.
///
/// Always returns the same time, making tests reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock frozen at `time`.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}
