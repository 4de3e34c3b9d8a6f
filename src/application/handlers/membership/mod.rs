//! Membership handlers.
//!
//! Command and query handlers for the membership lifecycle:
//!
//! ## Commands
//! - Enrolling in a tier (completes a lapsed prior membership)
//! - Upgrading to a higher tier
//! - Cancelling with a time-based refund
//!
//! ## Queries
//! - Get membership by id
//! - List one user's memberships
//! - List every membership

mod cancel_membership;
mod enroll;
mod queries;
mod upgrade_membership;

// Commands
pub use cancel_membership::{
    CancelMembershipCommand, CancelMembershipHandler, CancelMembershipResult,
};
pub use enroll::{EnrollCommand, EnrollHandler, EnrollResult};
pub use upgrade_membership::{
    UpgradeMembershipCommand, UpgradeMembershipHandler, UpgradeMembershipResult,
};

// Queries
pub use queries::{
    GetMembershipHandler, GetMembershipQuery, GetMembershipResult, ListAllMembershipsHandler,
    ListAllMembershipsQuery, ListAllMembershipsResult, ListUserMembershipsHandler,
    ListUserMembershipsQuery, ListUserMembershipsResult,
};
