//! Integration tests for the membership lifecycle.
//!
//! Drives the application handlers against the in-memory ledger store,
//! the store-backed token ledger and a fixed clock:
//! 1. Full enroll / upgrade / cancel / re-enroll journey
//! 2. Atomicity of failed settlements
//! 3. Optimistic concurrency on shared keys

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use miniclub::adapters::{FixedClock, InMemoryLedgerStore, StoreTokenLedger};
use miniclub::application::handlers::{
    CancelMembershipCommand, CancelMembershipHandler, EnrollCommand, EnrollHandler,
    GetBalanceHandler, GetBalanceQuery, InitializeClubCommand, InitializeClubHandler,
    ListUsersByTierHandler, ListUsersByTierQuery, RegisterUserCommand, RegisterUserHandler,
    SetLevelCommand, SetLevelHandler, UpgradeMembershipCommand, UpgradeMembershipHandler,
};
use miniclub::application::ClubRecords;
use miniclub::domain::foundation::{Caller, MembershipId, Timestamp, UserId};
use miniclub::domain::membership::{
    MembershipError, MembershipStatus, MembershipTier, ProrationPolicy, RefundPolicy,
};
use miniclub::ports::{Clock, LedgerStore, LedgerTransaction, TokenLedger};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Club {
    store: Arc<dyn LedgerStore>,
    tokens: Arc<dyn TokenLedger>,
    clock: Arc<FixedClock>,
}

fn caller(id: &str) -> Caller {
    Caller::new(UserId::new(id).unwrap())
}

impl Club {
    async fn open() -> Self {
        let club = Self {
            store: Arc::new(InMemoryLedgerStore::new()),
            tokens: Arc::new(StoreTokenLedger::new()),
            clock: Arc::new(FixedClock::new(Timestamp::from_datetime(
                Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            ))),
        };

        InitializeClubHandler::new(club.store.clone(), None)
            .handle(InitializeClubCommand {
                caller: caller("owner"),
            })
            .await
            .unwrap();

        let levels = SetLevelHandler::new(club.store.clone());
        for (tier, months, tokens) in [("Gold", 3, 1000), ("Platinum", 6, 5000), ("Diamond", 12, 8000)] {
            levels
                .handle(SetLevelCommand {
                    caller: caller("owner"),
                    tier: tier.to_string(),
                    duration_months: months,
                    required_tokens: tokens,
                })
                .await
                .unwrap();
        }
        club
    }

    fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    async fn register(&self, id: &str) {
        RegisterUserHandler::new(self.store.clone(), self.tokens.clone(), 10_000)
            .handle(RegisterUserCommand {
                caller: caller(id),
                name: id.to_string(),
                email: format!("{}@club.test", id),
            })
            .await
            .unwrap();
    }

    async fn enroll(&self, id: &str, tier: &str) -> Result<MembershipId, MembershipError> {
        EnrollHandler::new(self.store.clone(), self.tokens.clone(), self.clock())
            .handle(EnrollCommand {
                caller: caller(id),
                tier: tier.to_string(),
            })
            .await
            .map(|result| result.membership.id)
    }

    async fn upgrade(&self, id: &str, tier: &str) -> Result<u64, MembershipError> {
        UpgradeMembershipHandler::new(
            self.store.clone(),
            self.tokens.clone(),
            self.clock(),
            ProrationPolicy::default(),
        )
        .handle(UpgradeMembershipCommand {
            caller: caller(id),
            tier: tier.to_string(),
            expected_tokens: None,
        })
        .await
        .map(|result| result.quote.token_delta)
    }

    async fn cancel(&self, id: &str) -> Result<u64, MembershipError> {
        CancelMembershipHandler::new(
            self.store.clone(),
            self.tokens.clone(),
            self.clock(),
            RefundPolicy::default(),
        )
        .handle(CancelMembershipCommand { caller: caller(id) })
        .await
        .map(|result| result.refund.amount)
    }

    async fn balance(&self, id: &str) -> u64 {
        GetBalanceHandler::new(self.store.clone(), self.tokens.clone())
            .handle(GetBalanceQuery {
                account: UserId::new(id).unwrap(),
            })
            .await
            .unwrap()
            .balance
    }

    async fn members_of(&self, tier: &str) -> Vec<String> {
        ListUsersByTierHandler::new(self.store.clone())
            .handle(ListUsersByTierQuery {
                tier: tier.to_string(),
            })
            .await
            .unwrap()
            .users
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn member_journey_from_enrollment_to_reenrollment() {
    let club = Club::open().await;
    club.register("ivy").await;
    assert_eq!(club.balance("ivy").await, 10_000);

    let first = club.enroll("ivy", "Gold").await.unwrap();
    assert_eq!(first, MembershipId::new(1));
    assert_eq!(club.members_of("Gold").await, vec!["ivy"]);

    club.clock.advance_days(10);
    let delta = club.upgrade("ivy", "Platinum").await.unwrap();
    assert_eq!(delta, 4000);
    assert!(club.members_of("Gold").await.is_empty());
    assert_eq!(club.members_of("Platinum").await, vec!["ivy"]);
    assert_eq!(club.balance("ivy").await, 5000);
    assert_eq!(club.balance("owner").await, 5000);

    // Upgrade restarted the term, so ten days in is still bucket 1.
    club.clock.advance_days(10);
    let refund = club.cancel("ivy").await.unwrap();
    assert_eq!(refund, 4000);
    assert_eq!(club.balance("ivy").await, 9000);
    assert!(club.members_of("Platinum").await.is_empty());

    let second = club.enroll("ivy", "Diamond").await.unwrap();
    assert_eq!(second, MembershipId::new(2));
    assert_eq!(club.balance("ivy").await, 1000);
    assert_eq!(club.members_of("Diamond").await, vec!["ivy"]);
}

#[tokio::test]
async fn lapsed_membership_stays_indexed_until_next_enrollment() {
    let club = Club::open().await;
    club.register("ivy").await;
    let first = club.enroll("ivy", "Gold").await.unwrap();

    club.clock.advance_months(4);
    assert_eq!(club.members_of("Gold").await, vec!["ivy"]);
    assert!(matches!(
        club.cancel("ivy").await,
        Err(MembershipError::Expired(id)) if id == first
    ));

    club.enroll("ivy", "Gold").await.unwrap();
    let mut tx = club.store.begin().await.unwrap();
    let previous = ClubRecords::new(tx.as_mut())
        .require_membership(first)
        .await
        .unwrap();
    assert_eq!(previous.status(), MembershipStatus::Completed);
    assert_eq!(club.members_of("Gold").await, vec!["ivy"]);
}

#[tokio::test]
async fn one_index_entry_per_member_across_tiers() {
    let club = Club::open().await;
    for id in ["amy", "bob", "cat"] {
        club.register(id).await;
        club.enroll(id, "Gold").await.unwrap();
    }

    club.upgrade("bob", "Diamond").await.unwrap();
    club.upgrade("cat", "Platinum").await.unwrap();

    assert_eq!(club.members_of("Gold").await, vec!["amy"]);
    assert_eq!(club.members_of("Platinum").await, vec!["cat"]);
    assert_eq!(club.members_of("Diamond").await, vec!["bob"]);
}

// =============================================================================
// Atomicity and concurrency
// =============================================================================

#[tokio::test]
async fn failed_payment_leaves_every_table_untouched() {
    let club = Club::open().await;
    club.register("ivy").await;
    let first = club.enroll("ivy", "Diamond").await.unwrap();
    assert_eq!(club.balance("ivy").await, 2000);

    club.clock.advance_months(13);
    let err = club.enroll("ivy", "Diamond").await.unwrap_err();
    assert!(matches!(
        err,
        MembershipError::InsufficientBalance { required: 8000, available: 2000, .. }
    ));

    // The lapsed membership was not completed either.
    let mut tx = club.store.begin().await.unwrap();
    let mut records = ClubRecords::new(tx.as_mut());
    assert_eq!(records.total_memberships().await.unwrap(), 1);
    let previous = records.require_membership(first).await.unwrap();
    assert_eq!(previous.status(), MembershipStatus::Active);
    let user = records.require_user(&UserId::new("ivy").unwrap()).await.unwrap();
    assert_eq!(user.memberships, vec![first]);
    assert_eq!(records.tiers_of(&user.id).await.unwrap(), vec![MembershipTier::Diamond]);
    assert_eq!(club.balance("ivy").await, 2000);
    assert_eq!(club.balance("owner").await, 8000);
}

#[tokio::test]
async fn concurrent_counter_writers_cannot_both_commit() {
    let club = Club::open().await;

    let mut first = club.store.begin().await.unwrap();
    let mut second = club.store.begin().await.unwrap();
    let a = ClubRecords::new(first.as_mut())
        .allocate_membership_id()
        .await
        .unwrap();
    let b = ClubRecords::new(second.as_mut())
        .allocate_membership_id()
        .await
        .unwrap();
    assert_eq!(a, b);

    first.commit().await.unwrap();
    let err = MembershipError::from(second.commit().await.unwrap_err());

    assert!(matches!(err, MembershipError::Conflict(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn disjoint_users_commit_independently() {
    let club = Club::open().await;
    club.register("amy").await;
    club.register("bob").await;

    let mut first = club.store.begin().await.unwrap();
    let mut second = club.store.begin().await.unwrap();
    club.tokens
        .mint(first.as_mut(), &UserId::new("amy").unwrap(), 5)
        .await
        .unwrap();
    club.tokens
        .mint(second.as_mut(), &UserId::new("bob").unwrap(), 7)
        .await
        .unwrap();

    first.commit().await.unwrap();
    second.commit().await.unwrap();

    assert_eq!(club.balance("amy").await, 10_005);
    assert_eq!(club.balance("bob").await, 10_007);
}

#[tokio::test]
async fn lost_race_on_enrollment_is_reported_as_conflict() {
    let club = Club::open().await;
    club.register("ivy").await;

    // A competing transaction reads ivy's record, then enrollment commits first.
    let mut stale = club.store.begin().await.unwrap();
    let mut user = ClubRecords::new(stale.as_mut())
        .require_user(&UserId::new("ivy").unwrap())
        .await
        .unwrap();
    club.enroll("ivy", "Gold").await.unwrap();

    user.name = "Ivy Renamed".to_string();
    ClubRecords::new(stale.as_mut()).put_user(&user).await.unwrap();
    let err = stale.commit().await.unwrap_err();
    assert!(err.is_conflict());
}
