//! InitializeClubHandler - Command handler for the one-time owner bootstrap.

use std::sync::Arc;

use crate::application::ledger::{settle, ClubRecords};
use crate::domain::foundation::{Caller, UserId};
use crate::domain::membership::MembershipError;
use crate::ports::{LedgerStore, LedgerTransaction};

/// Command to record the club owner.
#[derive(Debug, Clone)]
pub struct InitializeClubCommand {
    pub caller: Caller,
}

/// Result of successful initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeClubResult {
    pub owner: UserId,
}

/// Handler for initializing the club.
///
/// The caller becomes the owner. When a bootstrap identity is configured,
/// only that identity may initialize.
pub struct InitializeClubHandler {
    store: Arc<dyn LedgerStore>,
    bootstrap_id: Option<UserId>,
}

impl InitializeClubHandler {
    pub fn new(store: Arc<dyn LedgerStore>, bootstrap_id: Option<UserId>) -> Self {
        Self {
            store,
            bootstrap_id,
        }
    }

    pub async fn handle(
        &self,
        cmd: InitializeClubCommand,
    ) -> Result<InitializeClubResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let outcome = self.initialize(tx.as_mut(), &cmd).await;
        let result = settle(tx, outcome).await?;

        tracing::info!(owner = %result.owner, "club initialized");
        Ok(result)
    }

    async fn initialize(
        &self,
        tx: &mut dyn LedgerTransaction,
        cmd: &InitializeClubCommand,
    ) -> Result<InitializeClubResult, MembershipError> {
        let mut records = ClubRecords::new(tx);

        if records.owner().await?.is_some() {
            return Err(MembershipError::AlreadyInitialized);
        }
        if let Some(bootstrap) = &self.bootstrap_id {
            if *bootstrap != cmd.caller.id {
                return Err(MembershipError::unauthorized(&cmd.caller.id, "initialize the club"));
            }
        }

        records.set_owner(&cmd.caller.id).await?;
        Ok(InitializeClubResult {
            owner: cmd.caller.id.clone(),
        })
    }
}
