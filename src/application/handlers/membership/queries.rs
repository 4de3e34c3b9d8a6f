//! Membership ledger queries.

use std::sync::Arc;

use crate::application::ledger::ClubRecords;
use crate::domain::foundation::{MembershipId, UserId};
use crate::domain::membership::{Membership, MembershipError};
use crate::ports::{LedgerStore, LedgerTransaction};

/// Query for one membership by id.
#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub id: MembershipId,
}

pub type GetMembershipResult = Membership;

pub struct GetMembershipHandler {
    store: Arc<dyn LedgerStore>,
}

impl GetMembershipHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetMembershipQuery,
    ) -> Result<GetMembershipResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let membership = ClubRecords::new(tx.as_mut())
            .require_membership(query.id)
            .await;
        tx.abort().await;
        membership
    }
}

/// Query for a user's membership history.
#[derive(Debug, Clone)]
pub struct ListUserMembershipsQuery {
    pub user_id: UserId,
}

pub type ListUserMembershipsResult = Vec<Membership>;

/// Lists a user's memberships oldest first; the last one is current
/// unless terminal.
pub struct ListUserMembershipsHandler {
    store: Arc<dyn LedgerStore>,
}

impl ListUserMembershipsHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListUserMembershipsQuery,
    ) -> Result<ListUserMembershipsResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let memberships = Self::list(tx.as_mut(), &query.user_id).await;
        tx.abort().await;
        memberships
    }

    async fn list(
        tx: &mut dyn LedgerTransaction,
        user_id: &UserId,
    ) -> Result<ListUserMembershipsResult, MembershipError> {
        let mut records = ClubRecords::new(tx);
        let user = records.require_user(user_id).await?;
        records.memberships_of(&user).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListAllMembershipsQuery;

pub type ListAllMembershipsResult = Vec<Membership>;

/// Lists memberships `1..=TotalMemberships` in id order.
pub struct ListAllMembershipsHandler {
    store: Arc<dyn LedgerStore>,
}

impl ListAllMembershipsHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        _query: ListAllMembershipsQuery,
    ) -> Result<ListAllMembershipsResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let memberships = ClubRecords::new(tx.as_mut()).all_memberships().await;
        tx.abort().await;
        memberships
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::membership::{
        CancelMembershipCommand, CancelMembershipHandler, EnrollCommand, EnrollHandler,
    };
    use crate::application::handlers::test_support::{member, user_id, TestClub};
    use crate::domain::membership::{MembershipTier, RefundPolicy};

    async fn club_with_history() -> TestClub {
        let club = TestClub::initialized().await;
        club.seed_user("ivy", 20_000).await;
        club.seed_user("max", 20_000).await;
        let enroll = EnrollHandler::new(club.store(), club.tokens(), club.clock());
        let cancel = CancelMembershipHandler::new(
            club.store(),
            club.tokens(),
            club.clock(),
            RefundPolicy::default(),
        );

        for (id, tier) in [("ivy", "Diamond"), ("max", "Gold")] {
            enroll
                .handle(EnrollCommand {
                    caller: member(id),
                    tier: tier.to_string(),
                })
                .await
                .unwrap();
        }
        cancel
            .handle(CancelMembershipCommand {
                caller: member("ivy"),
            })
            .await
            .unwrap();
        enroll
            .handle(EnrollCommand {
                caller: member("ivy"),
                tier: "Platinum".to_string(),
            })
            .await
            .unwrap();
        club
    }

    #[tokio::test]
    async fn get_membership_by_id() {
        let club = club_with_history().await;
        let handler = GetMembershipHandler::new(club.store());

        let membership = handler
            .handle(GetMembershipQuery {
                id: MembershipId::new(2),
            })
            .await
            .unwrap();
        assert_eq!(membership.owner_user_id, user_id("max"));

        let err = handler
            .handle(GetMembershipQuery {
                id: MembershipId::new(9),
            })
            .await
            .unwrap_err();
        assert_eq!(err, MembershipError::not_found("Membership", "9"));
    }

    #[tokio::test]
    async fn user_history_is_oldest_first() {
        let club = club_with_history().await;
        let handler = ListUserMembershipsHandler::new(club.store());

        let history = handler
            .handle(ListUserMembershipsQuery {
                user_id: user_id("ivy"),
            })
            .await
            .unwrap();

        let tiers: Vec<_> = history.iter().map(|m| m.tier).collect();
        assert_eq!(tiers, vec![MembershipTier::Diamond, MembershipTier::Platinum]);
        assert!(history[0].is_cancelled);
        assert!(!history[1].is_terminal());
    }

    #[tokio::test]
    async fn all_memberships_follow_the_counter() {
        let club = club_with_history().await;
        let handler = ListAllMembershipsHandler::new(club.store());

        let all = handler.handle(ListAllMembershipsQuery).await.unwrap();

        let ids: Vec<_> = all.iter().map(|m| m.id.value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
