//! UpgradeMembershipHandler - Command handler for moving to a higher tier.

use std::sync::Arc;

use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::Caller;
use crate::domain::membership::{
    Membership, MembershipError, MembershipTier, ProrationPolicy, UpgradeQuote,
};
use crate::ports::{Clock, LedgerStore, LedgerTransaction, TokenLedger};

/// Command to upgrade the caller's current membership.
#[derive(Debug, Clone)]
pub struct UpgradeMembershipCommand {
    pub caller: Caller,
    pub tier: String,
    /// Tokens the caller agreed to pay, checked against the computed delta.
    pub expected_tokens: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeMembershipResult {
    pub membership: Membership,
    pub quote: UpgradeQuote,
}

/// Handler for upgrades.
///
/// The caller pays the difference between the new tier's price and what the
/// membership already holds. The level index entry moves with the tier.
pub struct UpgradeMembershipHandler {
    store: Arc<dyn LedgerStore>,
    tokens: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
    proration: ProrationPolicy,
}

impl UpgradeMembershipHandler {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        tokens: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        proration: ProrationPolicy,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
            proration,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpgradeMembershipCommand,
    ) -> Result<UpgradeMembershipResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = self.upgrade(tx.as_mut(), &cmd).await;
        let result = settle(tx, outcome).await?;

        tracing::info!(
            user_id = %cmd.caller.id,
            membership_id = %result.membership.id,
            from = %result.quote.from_tier,
            to = %result.quote.to_tier,
            delta = result.quote.token_delta,
            ends_at = %result.membership.end_date,
            "membership upgraded"
        );
        Ok(result)
    }

    async fn upgrade(
        &self,
        tx: &mut dyn LedgerTransaction,
        cmd: &UpgradeMembershipCommand,
    ) -> Result<UpgradeMembershipResult, MembershipError> {
        let tier = MembershipTier::parse(&cmd.tier)?;
        let now = self.clock.now();

        let mut records = ClubRecords::new(tx);
        let user = records.require_user(&cmd.caller.id).await?;
        let mut membership = match records.latest_membership_of(&user).await? {
            Some(current) if !current.is_terminal() => current,
            _ => return Err(MembershipError::NoMembership(user.id)),
        };
        let level = records.require_level(tier).await?;

        let quote = self.proration.quote(&membership, tier, &level, now)?;
        quote.confirm_payment(cmd.expected_tokens)?;
        let owner = records.require_owner().await?;

        membership.apply_upgrade(&quote)?;
        records.put_membership(&membership).await?;

        // Remove before add: with read-your-writes this also holds when
        // the tier name does not change.
        records.index_remove(quote.from_tier, &user.id).await?;
        records.index_add(quote.to_tier, &user.id).await?;

        self.tokens
            .transfer(records.transaction(), &user.id, &owner, quote.token_delta)
            .await?;

        Ok(UpgradeMembershipResult { membership, quote })
    }
}
