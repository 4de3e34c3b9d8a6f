//! Shared fixtures for handler tests.

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::adapters::clock::FixedClock;
use crate::adapters::storage::InMemoryLedgerStore;
use crate::adapters::token::StoreTokenLedger;
use crate::application::ledger::ClubRecords;
use crate::domain::foundation::{Caller, Timestamp, UserId, ADMIN_ROLE, ROLE_ATTRIBUTE};
use crate::domain::membership::{Level, Membership, MembershipTier, User};
use crate::ports::{Clock, LedgerStore, TokenLedger};

pub(crate) const OWNER: &str = "owner";

pub(crate) fn user_id(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub(crate) fn member(id: &str) -> Caller {
    Caller::new(user_id(id))
}

pub(crate) fn admin(id: &str) -> Caller {
    Caller::new(user_id(id)).with_attribute(ROLE_ATTRIBUTE, ADMIN_ROLE)
}

pub(crate) fn new_year() -> Timestamp {
    Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
}

/// Real store, real token ledger, frozen clock.
pub(crate) struct TestClub {
    pub store: Arc<InMemoryLedgerStore>,
    pub tokens: Arc<StoreTokenLedger>,
    pub clock: Arc<FixedClock>,
}

impl TestClub {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryLedgerStore::new()),
            tokens: Arc::new(StoreTokenLedger::new()),
            clock: Arc::new(FixedClock::new(new_year())),
        }
    }

    pub fn store(&self) -> Arc<dyn LedgerStore> {
        self.store.clone()
    }

    pub fn tokens(&self) -> Arc<dyn TokenLedger> {
        self.tokens.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Owner set, all three tiers priced, no users.
    pub async fn initialized() -> Self {
        let club = Self::new();
        let mut tx = club.store.begin().await.unwrap();
        {
            let mut records = ClubRecords::new(tx.as_mut());
            records.set_owner(&user_id(OWNER)).await.unwrap();
            records
                .put_level(MembershipTier::Gold, &Level::new(3, 1000).unwrap())
                .await
                .unwrap();
            records
                .put_level(MembershipTier::Platinum, &Level::new(6, 5000).unwrap())
                .await
                .unwrap();
            records
                .put_level(MembershipTier::Diamond, &Level::new(12, 8000).unwrap())
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();
        club
    }

    /// Registers `id` directly and funds it.
    pub async fn seed_user(&self, id: &str, tokens: u64) {
        let mut tx = self.store.begin().await.unwrap();
        {
            let mut records = ClubRecords::new(tx.as_mut());
            let user = User::register(user_id(id), id, format!("{}@club.test", id)).unwrap();
            records.put_user(&user).await.unwrap();
            self.tokens
                .mint(records.transaction(), &user_id(id), tokens)
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();
    }

    pub async fn set_level(&self, tier: MembershipTier, months: u32, tokens: u64) {
        let mut tx = self.store.begin().await.unwrap();
        ClubRecords::new(tx.as_mut())
            .put_level(tier, &Level::new(months, tokens).unwrap())
            .await
            .unwrap();
        tx.commit().await.unwrap();
    }

    pub async fn balance(&self, id: &str) -> u64 {
        let mut tx = self.store.begin().await.unwrap();
        self.tokens
            .balance_of(tx.as_mut(), &user_id(id))
            .await
            .unwrap()
    }

    pub async fn user(&self, id: &str) -> Option<User> {
        let mut tx = self.store.begin().await.unwrap();
        let user = ClubRecords::new(tx.as_mut()).user(&user_id(id)).await.unwrap();
        user
    }

    pub async fn membership_of(&self, id: &str) -> Option<Membership> {
        let mut tx = self.store.begin().await.unwrap();
        let mut records = ClubRecords::new(tx.as_mut());
        let user = records.user(&user_id(id)).await.unwrap()?;
        records.latest_membership_of(&user).await.unwrap()
    }

    pub async fn tiers_of(&self, id: &str) -> Vec<MembershipTier> {
        let mut tx = self.store.begin().await.unwrap();
        let tiers = ClubRecords::new(tx.as_mut())
            .tiers_of(&user_id(id))
            .await
            .unwrap();
        tiers
    }

    pub async fn total_memberships(&self) -> u64 {
        let mut tx = self.store.begin().await.unwrap();
        let total = ClubRecords::new(tx.as_mut()).total_memberships().await.unwrap();
        total
    }
}
