//! Wall-clock time.

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock that reads the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}
