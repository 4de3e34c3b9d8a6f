//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers and traits used by every other domain module.

mod caller;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use caller::{AuthError, Caller, ADMIN_ROLE, ROLE_ATTRIBUTE};
pub use errors::{ErrorCode, ValidationError};
pub use ids::{MembershipId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
