//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, timestamps, caller, errors)
//! - `membership` - Tiers, levels, members and the membership lifecycle
//!
//! Nothing in here touches storage or the token ledger; those are reached
//! through the ports.

pub mod foundation;
pub mod membership;
