//! Level definitions held in the catalog.

use serde::{Deserialize, Serialize};

use super::{MembershipError, MembershipTier};

/// Longest duration an administrator may configure for a tier.
pub const MAX_DURATION_MONTHS: u32 = 1200;

/// Price and length of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Tokens paid upfront to enroll.
    pub required_tokens: u64,
    /// Membership length in calendar months.
    pub duration_months: u32,
}

impl Level {
    /// Creates a level, rejecting a zero or absurd duration.
    pub fn new(duration_months: u32, required_tokens: u64) -> Result<Self, MembershipError> {
        if duration_months == 0 || duration_months > MAX_DURATION_MONTHS {
            return Err(MembershipError::validation(
                "duration_months",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_DURATION_MONTHS, duration_months
                ),
            ));
        }
        Ok(Self {
            required_tokens,
            duration_months,
        })
    }

    /// Returns this level at a new price.
    ///
    /// An update to the current price is rejected rather than treated as a no-op.
    pub fn repriced(&self, tier: MembershipTier, required_tokens: u64) -> Result<Self, MembershipError> {
        if required_tokens == self.required_tokens {
            return Err(MembershipError::PriceUnchanged {
                tier,
                price: required_tokens,
            });
        }
        Ok(Self {
            required_tokens,
            ..*self
        })
    }
}
