//! Upgrade proration.
//!
//! An upgrade restarts the membership now, carries over the whole months left
//! on the current term, and charges the difference between the new tier's
//! price and what has already been deposited.
//!
//! Months left are counted in fixed-length months of `hours_per_month` hours,
//! not calendar months. The new end date is then computed on the calendar.

use chrono::Duration;

use crate::domain::foundation::Timestamp;

use super::{Level, Membership, MembershipError, MembershipTier};

/// Default width of the no-modification window before expiry.
pub const DEFAULT_UPGRADE_GRACE_HOURS: i64 = 24;

/// Default length of a proration month.
pub const DEFAULT_HOURS_PER_MONTH: i64 = 730;

/// Tunables for upgrade pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProrationPolicy {
    /// Memberships ending within this many hours cannot be upgraded.
    pub grace_hours: i64,
    /// Hours per month when counting the months left on a term.
    pub hours_per_month: i64,
}

impl Default for ProrationPolicy {
    fn default() -> Self {
        Self {
            grace_hours: DEFAULT_UPGRADE_GRACE_HOURS,
            hours_per_month: DEFAULT_HOURS_PER_MONTH,
        }
    }
}

/// Outcome of pricing an upgrade. Nothing has been applied yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeQuote {
    pub from_tier: MembershipTier,
    pub to_tier: MembershipTier,
    /// Whole months left on the current term.
    pub elapsed_months: u32,
    /// Tokens the member must pay on top of their deposit.
    pub token_delta: u64,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

impl UpgradeQuote {
    /// Rejects a caller-supplied amount that disagrees with the quoted delta.
    pub fn confirm_payment(&self, given: Option<u64>) -> Result<(), MembershipError> {
        match given {
            Some(given) if given != self.token_delta => Err(MembershipError::TokenMismatch {
                required: self.token_delta,
                given,
            }),
            _ => Ok(()),
        }
    }
}

impl ProrationPolicy {
    /// Prices moving `membership` to `new_tier` at instant `now`.
    ///
    /// Checks run in a fixed order: expiry, grace window, de-grade, delta.
    pub fn quote(
        &self,
        membership: &Membership,
        new_tier: MembershipTier,
        new_level: &Level,
        now: Timestamp,
    ) -> Result<UpgradeQuote, MembershipError> {
        if membership.is_terminal() {
            return Err(MembershipError::NoMembership(
                membership.owner_user_id.clone(),
            ));
        }

        let remaining = membership.end_date.duration_since(&now);
        if remaining <= Duration::zero() {
            return Err(MembershipError::Expired(membership.id));
        }
        if remaining <= Duration::hours(self.grace_hours) {
            return Err(MembershipError::GraceWindowTooClose {
                id: membership.id,
                hours_remaining: remaining.num_hours(),
            });
        }

        let months = remaining.num_hours() / self.hours_per_month.max(1);
        let elapsed_months = u32::try_from(months).unwrap_or(u32::MAX);
        if elapsed_months >= new_level.duration_months {
            return Err(MembershipError::DeGrade {
                tier: new_tier,
                elapsed_months,
                tier_months: new_level.duration_months,
            });
        }

        let delta = i128::from(new_level.required_tokens) - i128::from(membership.token_deposited);
        if delta <= 0 {
            return Err(MembershipError::AlreadyAtLevel {
                tier: new_tier,
                delta,
            });
        }
        let token_delta = u64::try_from(delta)
            .map_err(|_| MembershipError::validation("token_delta", "delta out of range"))?;

        // elapsed_months < duration_months, so this cannot underflow
        let new_months = elapsed_months + new_level.duration_months - 1;

        Ok(UpgradeQuote {
            from_tier: membership.tier,
            to_tier: new_tier,
            elapsed_months,
            token_delta,
            starts_at: now,
            ends_at: now.add_months(new_months),
        })
    }
}
