//! Cancellation refunds.
//!
//! The refund depends on the tier and on how many month boundaries have
//! passed since the membership started. Each boundary gets a grace buffer
//! of a few days. Deductions are expressed in per-mille so that the
//! Diamond 12.5% steps stay exact in integer arithmetic.

use crate::domain::foundation::Timestamp;

use super::{Membership, MembershipError, MembershipTier};

/// Default buffer added to each month boundary.
pub const DEFAULT_CANCELLATION_GRACE_DAYS: i64 = 7;

const PLATINUM_DEDUCTIONS: [u64; 4] = [200, 400, 600, 800];
const DIAMOND_DEDUCTIONS: [u64; 7] = [125, 250, 375, 500, 625, 750, 875];

/// Per-mille deductions for buckets 1, 2, ... of a tier. Empty for Gold.
pub fn deduction_schedule(tier: MembershipTier) -> &'static [u64] {
    match tier {
        MembershipTier::Gold => &[],
        MembershipTier::Platinum => &PLATINUM_DEDUCTIONS,
        MembershipTier::Diamond => &DIAMOND_DEDUCTIONS,
    }
}

/// Refund owed for `deposited` tokens cancelled in the given 1-based bucket.
///
/// Gold always refunds nothing. Returns `None` when the bucket lies past the
/// tier's schedule, which means cancellation is no longer possible.
pub fn refund_for(deposited: u64, tier: MembershipTier, bucket: u32) -> Option<u64> {
    if tier == MembershipTier::Gold {
        return Some(0);
    }
    let index = usize::try_from(bucket).ok()?.checked_sub(1)?;
    let per_mille = *deduction_schedule(tier).get(index)?;
    let deduction = u128::from(deposited) * u128::from(per_mille) / 1000;
    // deduction <= deposited because per_mille < 1000
    Some(deposited - deduction as u64)
}

/// Result of assessing a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundAssessment {
    /// Elapsed-month bucket, `None` for tiers without a schedule.
    pub bucket: Option<u32>,
    pub amount: u64,
}

/// Tunables for the refund clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefundPolicy {
    /// Days of buffer after each month boundary.
    pub grace_days: i64,
    /// Months the clock is pushed forward before bucketing. Normally zero.
    pub clock_offset_months: u32,
}

impl Default for RefundPolicy {
    fn default() -> Self {
        Self {
            grace_days: DEFAULT_CANCELLATION_GRACE_DAYS,
            clock_offset_months: 0,
        }
    }
}

impl RefundPolicy {
    /// Smallest `k` in `1..=max_bucket` with `now < start + k months + grace`.
    pub fn elapsed_bucket(&self, start: &Timestamp, now: &Timestamp, max_bucket: u32) -> Option<u32> {
        let effective_now = now.add_months(self.clock_offset_months);
        (1..=max_bucket).find(|k| {
            let boundary = start.add_months(*k).add_days(self.grace_days);
            effective_now.is_before(&boundary)
        })
    }

    /// Computes the refund for cancelling `membership` at `now`.
    pub fn assess(
        &self,
        membership: &Membership,
        now: &Timestamp,
    ) -> Result<RefundAssessment, MembershipError> {
        let schedule = deduction_schedule(membership.tier);
        if schedule.is_empty() {
            return Ok(RefundAssessment {
                bucket: None,
                amount: 0,
            });
        }

        let closed = || MembershipError::CancellationWindowClosed {
            id: membership.id,
            tier: membership.tier,
        };
        let max_bucket = u32::try_from(schedule.len()).map_err(|_| closed())?;
        let bucket = self
            .elapsed_bucket(&membership.start_date, now, max_bucket)
            .ok_or_else(closed)?;
        let amount =
            refund_for(membership.token_deposited, membership.tier, bucket).ok_or_else(closed)?;

        Ok(RefundAssessment {
            bucket: Some(bucket),
            amount,
        })
    }
}
