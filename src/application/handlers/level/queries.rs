//! Level catalog queries.

use std::sync::Arc;

use crate::application::ledger::ClubRecords;
use crate::domain::foundation::UserId;
use crate::domain::membership::{Level, MembershipError, MembershipTier};
use crate::ports::LedgerStore;

/// Query for one tier's level.
#[derive(Debug, Clone)]
pub struct GetLevelQuery {
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetLevelResult {
    pub tier: MembershipTier,
    pub level: Level,
}

pub struct GetLevelHandler {
    store: Arc<dyn LedgerStore>,
}

impl GetLevelHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetLevelQuery) -> Result<GetLevelResult, MembershipError> {
        let tier = MembershipTier::parse(&query.tier)?;

        let mut tx = self.store.begin().await?;
        let level = ClubRecords::new(tx.as_mut()).require_level(tier).await;
        tx.abort().await;

        Ok(GetLevelResult { tier, level: level? })
    }
}

/// Query for the users indexed under a tier.
#[derive(Debug, Clone)]
pub struct ListUsersByTierQuery {
    pub tier: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListUsersByTierResult {
    pub tier: MembershipTier,
    pub users: Vec<UserId>,
}

/// Lists level index entries for a tier, in store key order.
///
/// A membership that lapsed without a later enrollment stays indexed until
/// its owner enrolls again.
pub struct ListUsersByTierHandler {
    store: Arc<dyn LedgerStore>,
}

impl ListUsersByTierHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListUsersByTierQuery,
    ) -> Result<ListUsersByTierResult, MembershipError> {
        let tier = MembershipTier::parse(&query.tier)?;

        let mut tx = self.store.begin().await?;
        let users = ClubRecords::new(tx.as_mut()).users_in_tier(tier).await;
        tx.abort().await;

        Ok(ListUsersByTierResult {
            tier,
            users: users?,
        })
    }
}
