//! Membership domain module.
//!
//! Club tiers, levels, members and the membership lifecycle, plus the pure
//! pricing rules for upgrades and cancellations.
//!
//! # Module Structure
//!
//! - `aggregate` - Membership record and its transitions
//! - `status` - MembershipStatus state machine
//! - `tier` - The three recognized tiers
//! - `level` - Catalog entry: price and duration of a tier
//! - `user` - Registered member with membership history
//! - `proration` - Upgrade pricing
//! - `refund` - Cancellation refund schedule

mod aggregate;
mod errors;
mod level;
mod proration;
mod refund;
mod status;
mod tier;
mod user;

pub use aggregate::Membership;
pub use errors::MembershipError;
pub use level::{Level, MAX_DURATION_MONTHS};
pub use proration::{
    ProrationPolicy, UpgradeQuote, DEFAULT_HOURS_PER_MONTH, DEFAULT_UPGRADE_GRACE_HOURS,
};
pub use refund::{
    deduction_schedule, refund_for, RefundAssessment, RefundPolicy,
    DEFAULT_CANCELLATION_GRACE_DAYS,
};
pub use status::MembershipStatus;
pub use tier::MembershipTier;
pub use user::User;
