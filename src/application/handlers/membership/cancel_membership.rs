//! CancelMembershipHandler - Command handler for ending a membership early.

use std::sync::Arc;

use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::Caller;
use crate::domain::membership::{Membership, MembershipError, RefundAssessment, RefundPolicy};
use crate::ports::{Clock, LedgerStore, LedgerTransaction, TokenLedger};

/// Command to cancel the caller's current membership.
#[derive(Debug, Clone)]
pub struct CancelMembershipCommand {
    pub caller: Caller,
}

/// Result of successful membership cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelMembershipResult {
    pub membership: Membership,
    pub refund: RefundAssessment,
}

/// Handler for cancelling memberships.
///
/// Cancellation takes effect immediately. The refund shrinks with each
/// elapsed month and is minted back to the caller; Gold never refunds.
pub struct CancelMembershipHandler {
    store: Arc<dyn LedgerStore>,
    tokens: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
    refunds: RefundPolicy,
}

impl CancelMembershipHandler {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        tokens: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        refunds: RefundPolicy,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
            refunds,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelMembershipCommand,
    ) -> Result<CancelMembershipResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = self.cancel(tx.as_mut(), &cmd).await;
        let result = settle(tx, outcome).await?;

        tracing::info!(
            user_id = %cmd.caller.id,
            membership_id = %result.membership.id,
            tier = %result.membership.tier,
            bucket = ?result.refund.bucket,
            refund = result.refund.amount,
            "membership cancelled"
        );
        Ok(result)
    }

    async fn cancel(
        &self,
        tx: &mut dyn LedgerTransaction,
        cmd: &CancelMembershipCommand,
    ) -> Result<CancelMembershipResult, MembershipError> {
        let now = self.clock.now();

        let mut records = ClubRecords::new(tx);
        let user = records.require_user(&cmd.caller.id).await?;
        let mut membership = match records.latest_membership_of(&user).await? {
            Some(current) if !current.is_terminal() => current,
            _ => return Err(MembershipError::NoMembership(user.id)),
        };
        if membership.has_lapsed(&now) {
            return Err(MembershipError::Expired(membership.id));
        }

        let refund = self.refunds.assess(&membership, &now)?;
        membership.cancel(refund.amount)?;
        records.put_membership(&membership).await?;
        records.index_remove(membership.tier, &user.id).await?;

        if refund.amount > 0 {
            self.tokens
                .mint(records.transaction(), &user.id, refund.amount)
                .await?;
        }

        Ok(CancelMembershipResult { membership, refund })
    }
}
