//! Clock port.

use crate::domain::foundation::Timestamp;

/// Source of "now" for calendar rules.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
