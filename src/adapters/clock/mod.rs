//! Clock Adapters
//!
//! - **SystemClock** - wall-clock time
//! - **FixedClock** - settable time for tests and replays

mod fixed_clock;
mod system_clock;

pub use fixed_clock::FixedClock;
pub use system_clock::SystemClock;
