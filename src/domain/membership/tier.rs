//! Membership tier definitions.
//!
//! The club recognizes exactly three tiers. Tier names double as the ledger
//! keys of their level records, so parsing is case-sensitive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MembershipError;

/// Membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MembershipTier {
    /// Entry tier. Never refunded on cancellation.
    Gold,

    /// Refundable over four monthly buckets.
    Platinum,

    /// Refundable over seven monthly buckets.
    Diamond,
}

impl MembershipTier {
    /// Every recognized tier, in catalog order.
    pub const ALL: [MembershipTier; 3] = [
        MembershipTier::Gold,
        MembershipTier::Platinum,
        MembershipTier::Diamond,
    ];

    /// Returns the canonical tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Gold => "Gold",
            MembershipTier::Platinum => "Platinum",
            MembershipTier::Diamond => "Diamond",
        }
    }

    /// Parses a tier name, failing with `InvalidTier` for anything else.
    pub fn parse(name: &str) -> Result<Self, MembershipError> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str() == name)
            .ok_or_else(|| MembershipError::invalid_tier(name))
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = MembershipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
