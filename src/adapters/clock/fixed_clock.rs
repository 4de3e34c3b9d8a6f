//! Settable clock for tests.

use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock frozen at a given instant until moved explicitly.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Jumps to `now`.
    pub fn set(&self, now: Timestamp) {
        *self.now.write().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Moves the clock forward by whole days.
    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now = now.add_days(days);
    }

    /// Moves the clock forward by whole hours.
    pub fn advance_hours(&self, hours: i64) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now = now.add_hours(hours);
    }

    /// Moves the clock forward by calendar months.
    pub fn advance_months(&self, months: u32) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now = now.add_months(months);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}
