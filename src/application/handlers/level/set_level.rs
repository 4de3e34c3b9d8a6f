//! SetLevelHandler - Command handler for creating or overwriting a tier.

use std::sync::Arc;

use crate::application::handlers::access::require_admin;
use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::Caller;
use crate::domain::membership::{Level, MembershipError, MembershipTier};
use crate::ports::{LedgerStore, LedgerTransaction};

/// Command to define a tier's price and duration.
#[derive(Debug, Clone)]
pub struct SetLevelCommand {
    pub caller: Caller,
    pub tier: String,
    pub duration_months: u32,
    pub required_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetLevelResult {
    pub tier: MembershipTier,
    pub level: Level,
}

/// Handler for defining levels. Admin role or owner only.
pub struct SetLevelHandler {
    store: Arc<dyn LedgerStore>,
}

impl SetLevelHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: SetLevelCommand) -> Result<SetLevelResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = Self::set(tx.as_mut(), &cmd).await;
        let result = settle(tx, outcome).await?;

        tracing::info!(
            caller = %cmd.caller.id,
            tier = %result.tier,
            duration_months = result.level.duration_months,
            required_tokens = result.level.required_tokens,
            "level set"
        );
        Ok(result)
    }

    async fn set(
        tx: &mut dyn LedgerTransaction,
        cmd: &SetLevelCommand,
    ) -> Result<SetLevelResult, MembershipError> {
        let tier = MembershipTier::parse(&cmd.tier)?;
        let level = Level::new(cmd.duration_months, cmd.required_tokens)?;

        let mut records = ClubRecords::new(tx);
        require_admin(&mut records, &cmd.caller, "set levels").await?;
        records.put_level(tier, &level).await?;

        Ok(SetLevelResult { tier, level })
    }
}
