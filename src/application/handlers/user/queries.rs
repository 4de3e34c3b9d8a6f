//! User directory queries.

use std::sync::Arc;

use crate::application::ledger::ClubRecords;
use crate::domain::foundation::UserId;
use crate::domain::membership::{MembershipError, User};
use crate::ports::LedgerStore;

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub type GetUserResult = User;

pub struct GetUserHandler {
    store: Arc<dyn LedgerStore>,
}

impl GetUserHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<GetUserResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let user = ClubRecords::new(tx.as_mut())
            .require_user(&query.user_id)
            .await;
        tx.abort().await;
        user
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListUsersQuery;

pub type ListUsersResult = Vec<User>;

/// Lists every registered user in key order.
pub struct ListUsersHandler {
    store: Arc<dyn LedgerStore>,
}

impl ListUsersHandler {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListUsersQuery) -> Result<ListUsersResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let users = ClubRecords::new(tx.as_mut()).all_users().await;
        tx.abort().await;
        users
    }
}
