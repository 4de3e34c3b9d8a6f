//! EnrollHandler - Command handler for starting a membership.

use std::sync::Arc;

use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::{Caller, MembershipId};
use crate::domain::membership::{Membership, MembershipError, MembershipTier};
use crate::ports::{Clock, LedgerStore, LedgerTransaction, TokenLedger};

/// Command to enroll the caller in a tier.
#[derive(Debug, Clone)]
pub struct EnrollCommand {
    pub caller: Caller,
    pub tier: String,
}

/// Result of successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollResult {
    pub membership: Membership,
    /// Prior membership completed because it had lapsed.
    pub completed_previous: Option<MembershipId>,
}

/// Handler for enrollment.
///
/// A user may hold one current membership. A prior membership that has
/// lapsed is completed here, lazily, before the new one starts.
pub struct EnrollHandler {
    store: Arc<dyn LedgerStore>,
    tokens: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
}

impl EnrollHandler {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        tokens: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
        }
    }

    pub async fn handle(&self, cmd: EnrollCommand) -> Result<EnrollResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = self.enroll(tx.as_mut(), &cmd).await;
        let result = settle(tx, outcome).await?;

        if let Some(previous) = result.completed_previous {
            tracing::info!(
                user_id = %cmd.caller.id,
                membership_id = %previous,
                "lapsed membership completed"
            );
        }
        tracing::info!(
            user_id = %cmd.caller.id,
            membership_id = %result.membership.id,
            tier = %result.membership.tier,
            tokens = result.membership.token_deposited,
            "membership enrolled"
        );
        Ok(result)
    }

    async fn enroll(
        &self,
        tx: &mut dyn LedgerTransaction,
        cmd: &EnrollCommand,
    ) -> Result<EnrollResult, MembershipError> {
        let tier = MembershipTier::parse(&cmd.tier)?;
        let now = self.clock.now();

        let mut records = ClubRecords::new(tx);
        let mut user = records.require_user(&cmd.caller.id).await?;

        // 1. Clear the way: only a terminal or lapsed prior membership allows a new one
        let mut completed_previous = None;
        if let Some(mut previous) = records.latest_membership_of(&user).await? {
            if !previous.is_terminal() {
                if !previous.has_lapsed(&now) {
                    return Err(MembershipError::MembershipInProgress {
                        id: previous.id,
                        ends_at: previous.end_date,
                    });
                }
                previous.complete()?;
                records.put_membership(&previous).await?;
                records.index_remove(previous.tier, &user.id).await?;
                completed_previous = Some(previous.id);
            }
        }

        let level = records.require_level(tier).await?;
        let owner = records.require_owner().await?;

        // 2. Create the membership and link it to the user
        let id = records.allocate_membership_id().await?;
        let membership = Membership::enroll(id, user.id.clone(), tier, &level, now);
        user.attach_membership(id);
        records.put_membership(&membership).await?;
        records.put_user(&user).await?;
        records.index_add(tier, &user.id).await?;

        // 3. Collect payment
        self.tokens
            .transfer(records.transaction(), &user.id, &owner, level.required_tokens)
            .await?;

        Ok(EnrollResult {
            membership,
            completed_previous,
        })
    }
}
