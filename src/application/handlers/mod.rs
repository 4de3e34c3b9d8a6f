//! Application handlers.
//!
//! Command and query handlers that orchestrate the lifecycle engine. Each
//! handler runs one ledger transaction: commands commit on success and
//! abort on any failure, queries always abort.

mod access;
pub mod club;
pub mod level;
pub mod membership;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use club::{
    GetBalanceHandler, GetBalanceQuery, GetBalanceResult, InitializeClubCommand,
    InitializeClubHandler, InitializeClubResult,
};
pub use level::{
    GetLevelHandler, GetLevelQuery, GetLevelResult, ListUsersByTierHandler, ListUsersByTierQuery,
    ListUsersByTierResult, SetLevelCommand, SetLevelHandler, SetLevelResult,
    UpdateLevelPriceCommand, UpdateLevelPriceHandler, UpdateLevelPriceResult,
};
pub use membership::{
    CancelMembershipCommand, CancelMembershipHandler, CancelMembershipResult, EnrollCommand,
    EnrollHandler, EnrollResult, GetMembershipHandler, GetMembershipQuery, GetMembershipResult,
    ListAllMembershipsHandler, ListAllMembershipsQuery, ListAllMembershipsResult,
    ListUserMembershipsHandler, ListUserMembershipsQuery, ListUserMembershipsResult,
    UpgradeMembershipCommand, UpgradeMembershipHandler, UpgradeMembershipResult,
};
pub use user::{
    GetUserHandler, GetUserQuery, GetUserResult, ListUsersHandler, ListUsersQuery,
    ListUsersResult, RegisterUserCommand, RegisterUserHandler, RegisterUserResult,
};
