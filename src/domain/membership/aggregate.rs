//! Membership record - one enrollment of one user in one tier.
//!
//! A membership is created by enrollment and then mutated in place by
//! upgrade, cancellation or lazy completion. It is never deleted.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MembershipId, StateMachine, Timestamp, UserId};

use super::{Level, MembershipError, MembershipStatus, MembershipTier, UpgradeQuote};

/// Persisted membership record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: MembershipId,
    pub tier: MembershipTier,
    /// Every token paid toward this membership: enrollment plus upgrades.
    pub token_deposited: u64,
    pub is_completed: bool,
    pub is_cancelled: bool,
    pub is_upgraded: bool,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub refund_amount: u64,
    pub owner_user_id: UserId,
}

impl Membership {
    /// Starts a new membership at the level's price and duration.
    pub fn enroll(
        id: MembershipId,
        owner_user_id: UserId,
        tier: MembershipTier,
        level: &Level,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            tier,
            token_deposited: level.required_tokens,
            is_completed: false,
            is_cancelled: false,
            is_upgraded: false,
            start_date: now,
            end_date: now.add_months(level.duration_months),
            refund_amount: 0,
            owner_user_id,
        }
    }

    /// Returns the status derived from the lifecycle flags.
    pub fn status(&self) -> MembershipStatus {
        MembershipStatus::from_flags(self.is_completed, self.is_cancelled, self.is_upgraded)
    }

    /// Returns true once the membership is completed or cancelled.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Returns true if the end date is at or before `now`.
    pub fn has_lapsed(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.end_date)
    }

    /// Applies a validated upgrade quote.
    pub fn apply_upgrade(&mut self, quote: &UpgradeQuote) -> Result<(), MembershipError> {
        self.transition(MembershipStatus::Upgraded)?;

        let deposited = self
            .token_deposited
            .checked_add(quote.token_delta)
            .ok_or_else(|| MembershipError::validation("token_deposited", "token total overflows"))?;

        self.tier = quote.to_tier;
        self.token_deposited = deposited;
        self.start_date = quote.starts_at;
        self.end_date = quote.ends_at;
        self.is_upgraded = true;
        self.is_completed = false;
        Ok(())
    }

    /// Marks the membership as having run its course.
    pub fn complete(&mut self) -> Result<(), MembershipError> {
        self.transition(MembershipStatus::Completed)?;
        self.is_completed = true;
        Ok(())
    }

    /// Ends the membership early, recording the refund owed.
    pub fn cancel(&mut self, refund_amount: u64) -> Result<(), MembershipError> {
        self.transition(MembershipStatus::Cancelled)?;
        self.is_cancelled = true;
        self.is_completed = true;
        self.refund_amount = refund_amount;
        Ok(())
    }

    fn transition(&self, target: MembershipStatus) -> Result<(), MembershipError> {
        let from = self.status();
        from.transition_to(target)
            .map(|_| ())
            .map_err(|_| MembershipError::InvalidState { from, to: target })
    }
}
