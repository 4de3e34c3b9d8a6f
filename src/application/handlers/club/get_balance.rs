//! GetBalanceHandler - Query handler for an account's token balance.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::MembershipError;
use crate::ports::{LedgerStore, TokenLedger};

/// Query for one account's balance.
#[derive(Debug, Clone)]
pub struct GetBalanceQuery {
    pub account: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBalanceResult {
    pub account: UserId,
    pub balance: u64,
}

pub struct GetBalanceHandler {
    store: Arc<dyn LedgerStore>,
    tokens: Arc<dyn TokenLedger>,
}

impl GetBalanceHandler {
    pub fn new(store: Arc<dyn LedgerStore>, tokens: Arc<dyn TokenLedger>) -> Self {
        Self { store, tokens }
    }

    pub async fn handle(&self, query: GetBalanceQuery) -> Result<GetBalanceResult, MembershipError> {
        let mut tx = self.store.begin().await?;
        let balance = self.tokens.balance_of(tx.as_mut(), &query.account).await;
        tx.abort().await;

        Ok(GetBalanceResult {
            balance: balance?,
            account: query.account,
        })
    }
}
