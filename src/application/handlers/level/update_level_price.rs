//! UpdateLevelPriceHandler - Command handler for repricing a tier.

use std::sync::Arc;

use crate::application::handlers::access::require_owner;
use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::Caller;
use crate::domain::membership::{Level, MembershipError, MembershipTier};
use crate::ports::{LedgerStore, LedgerTransaction};

/// Command to change a tier's required tokens.
#[derive(Debug, Clone)]
pub struct UpdateLevelPriceCommand {
    pub caller: Caller,
    pub tier: String,
    pub required_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLevelPriceResult {
    pub tier: MembershipTier,
    pub previous_tokens: u64,
    pub level: Level,
}

/// Handler for repricing levels.
///
/// Owner only. Existing memberships keep what they paid; the new price
/// applies to later enrollments and upgrade deltas.
pub struct UpdateLevelPriceHandler {
    store: Arc<dyn LedgerStore>,
}

impl UpdateLevelPriceHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateLevelPriceCommand,
    ) -> Result<UpdateLevelPriceResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::reprice(tx.as_mut(), &cmd).await;
        let result = settle(tx, outcome).await?;

        tracing::info!(
            tier = %result.tier,
            from = result.previous_tokens,
            to = result.level.required_tokens,
            "level repriced"
        );
        Ok(result)
    }

    async fn reprice(
        tx: &mut dyn LedgerTransaction,
        cmd: &UpdateLevelPriceCommand,
    ) -> Result<UpdateLevelPriceResult, MembershipError> {
        let tier = MembershipTier::parse(&cmd.tier)?;

        let mut records = ClubRecords::new(tx);
        require_owner(&mut records, &cmd.caller, "update level prices").await?;

        let current = records.require_level(tier).await?;
        let level = current.repriced(tier, cmd.required_tokens)?;
        records.put_level(tier, &level).await?;

        Ok(UpdateLevelPriceResult {
            tier,
            previous_tokens: current.required_tokens,
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{admin, member, user_id, TestClub, OWNER};

    fn command(caller: Caller, tier: &str, tokens: u64) -> UpdateLevelPriceCommand {
        UpdateLevelPriceCommand {
            caller,
            tier: tier.to_string(),
            required_tokens: tokens,
        }
    }

    #[tokio::test]
    async fn owner_reprices_and_keeps_duration() {
        let club = TestClub::initialized().await;
        let handler = UpdateLevelPriceHandler::new(club.store());

        let result = handler
            .handle(command(member(OWNER), "Platinum", 6000))
            .await
            .unwrap();

        assert_eq!(result.previous_tokens, 5000);
        assert_eq!(result.level, Level::new(6, 6000).unwrap());
    }

    #[tokio::test]
    async fn admin_role_is_not_enough() {
        let club = TestClub::initialized().await;
        let handler = UpdateLevelPriceHandler::new(club.store());

        let err = handler
            .handle(command(admin("ops"), "Platinum", 6000))
            .await
            .unwrap_err();

        assert!(matches!(err, MembershipError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn same_price_is_rejected() {
        let club = TestClub::initialized().await;
        let handler = UpdateLevelPriceHandler::new(club.store());

        let err = handler
            .handle(command(member(OWNER), "Diamond", 8000))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            MembershipError::PriceUnchanged {
                tier: MembershipTier::Diamond,
                price: 8000
            }
        );
    }

    #[tokio::test]
    async fn unset_tier_is_not_found() {
        let club = TestClub::new();
        let mut tx = club.store.begin().await.unwrap();
        ClubRecords::new(tx.as_mut())
            .set_owner(&user_id(OWNER))
            .await
            .unwrap();
        tx.commit().await.unwrap();
        let handler = UpdateLevelPriceHandler::new(club.store());

        let err = handler
            .handle(command(member(OWNER), "Gold", 10))
            .await
            .unwrap_err();

        assert_eq!(err, MembershipError::not_found("Level", "Gold"));
    }

    #[tokio::test]
    async fn uninitialized_club_is_reported() {
        let club = TestClub::new();
        let handler = UpdateLevelPriceHandler::new(club.store());

        let err = handler
            .handle(command(member(OWNER), "Gold", 10))
            .await
            .unwrap_err();

        assert_eq!(err, MembershipError::NotInitialized);
    }
}
