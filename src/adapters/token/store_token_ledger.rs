//! Store-backed token ledger.
//!
//! Keeps one decimal-string balance per account under the composite scheme
//! `balance~account`. Balances live in the same ledger store as the club
//! records, so a failed transfer aborts the membership writes with it.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::ports::{encode_composite_key, LedgerTransaction, TokenError, TokenLedger};

/// Composite key scheme of balance records.
pub const BALANCE_SCHEME: &str = "balance~account";

/// Token ledger that keeps balances in the ledger store.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreTokenLedger;

impl StoreTokenLedger {
    pub fn new() -> Self {
        Self
    }

    fn key(account: &UserId) -> Result<String, TokenError> {
        Ok(encode_composite_key(BALANCE_SCHEME, &[account.as_str()])?)
    }

    async fn read_balance(
        tx: &mut dyn LedgerTransaction,
        account: &UserId,
    ) -> Result<u64, TokenError> {
        let Some(raw) = tx.get(&Self::key(account)?).await? else {
            return Ok(0);
        };
        std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| TokenError::CorruptBalance {
                account: account.clone(),
                reason: "balance is not a decimal integer".to_string(),
            })
    }

    async fn write_balance(
        tx: &mut dyn LedgerTransaction,
        account: &UserId,
        balance: u64,
    ) -> Result<(), TokenError> {
        tx.put(&Self::key(account)?, balance.to_string().into_bytes())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl TokenLedger for StoreTokenLedger {
    async fn mint(
        &self,
        tx: &mut dyn LedgerTransaction,
        to: &UserId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let balance = Self::read_balance(tx, to).await?;
        let updated = balance
            .checked_add(amount)
            .ok_or_else(|| TokenError::Overflow(to.clone()))?;
        Self::write_balance(tx, to, updated).await?;
        tracing::debug!(account = %to, amount, balance = updated, "tokens minted");
        Ok(())
    }

    async fn transfer(
        &self,
        tx: &mut dyn LedgerTransaction,
        from: &UserId,
        to: &UserId,
        amount: u64,
    ) -> Result<(), TokenError> {
        let available = Self::read_balance(tx, from).await?;
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                account: from.clone(),
                required: amount,
                available,
            });
        }
        if amount == 0 || from == to {
            return Ok(());
        }

        Self::write_balance(tx, from, available - amount).await?;
        let received = Self::read_balance(tx, to).await?;
        let updated = received
            .checked_add(amount)
            .ok_or_else(|| TokenError::Overflow(to.clone()))?;
        Self::write_balance(tx, to, updated).await?;

        tracing::debug!(from = %from, to = %to, amount, "tokens transferred");
        Ok(())
    }

    async fn balance_of(
        &self,
        tx: &mut dyn LedgerTransaction,
        account: &UserId,
    ) -> Result<u64, TokenError> {
        Self::read_balance(tx, account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryLedgerStore;
    use crate::ports::LedgerStore;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn unknown_accounts_have_zero_balance() {
        let store = InMemoryLedgerStore::new();
        let mut tx = store.begin().await.unwrap();
        let balance = StoreTokenLedger.balance_of(tx.as_mut(), &user("ivy")).await.unwrap();
        assert_eq!(balance, 0);
    }

    #[tokio::test]
    async fn mint_accumulates_and_commits() {
        let store = InMemoryLedgerStore::new();
        let ledger = StoreTokenLedger::new();

        let mut tx = store.begin().await.unwrap();
        ledger.mint(tx.as_mut(), &user("ivy"), 10_000).await.unwrap();
        ledger.mint(tx.as_mut(), &user("ivy"), 500).await.unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        assert_eq!(ledger.balance_of(tx.as_mut(), &user("ivy")).await.unwrap(), 10_500);
    }

    #[tokio::test]
    async fn transfer_moves_tokens_between_accounts() {
        let store = InMemoryLedgerStore::new();
        let ledger = StoreTokenLedger::new();
        let mut tx = store.begin().await.unwrap();
        ledger.mint(tx.as_mut(), &user("ivy"), 10_000).await.unwrap();

        ledger
            .transfer(tx.as_mut(), &user("ivy"), &user("owner"), 8000)
            .await
            .unwrap();

        assert_eq!(ledger.balance_of(tx.as_mut(), &user("ivy")).await.unwrap(), 2000);
        assert_eq!(ledger.balance_of(tx.as_mut(), &user("owner")).await.unwrap(), 8000);
    }

    #[tokio::test]
    async fn transfer_rejects_short_balance_without_writing() {
        let store = InMemoryLedgerStore::new();
        let ledger = StoreTokenLedger::new();
        let mut tx = store.begin().await.unwrap();
        ledger.mint(tx.as_mut(), &user("ivy"), 100).await.unwrap();

        let err = ledger
            .transfer(tx.as_mut(), &user("ivy"), &user("owner"), 101)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TokenError::InsufficientBalance {
                account: user("ivy"),
                required: 101,
                available: 100
            }
        );
        assert_eq!(ledger.balance_of(tx.as_mut(), &user("ivy")).await.unwrap(), 100);
        assert_eq!(ledger.balance_of(tx.as_mut(), &user("owner")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn self_transfer_leaves_balance_unchanged() {
        let store = InMemoryLedgerStore::new();
        let ledger = StoreTokenLedger::new();
        let mut tx = store.begin().await.unwrap();
        ledger.mint(tx.as_mut(), &user("owner"), 50).await.unwrap();

        ledger
            .transfer(tx.as_mut(), &user("owner"), &user("owner"), 50)
            .await
            .unwrap();
        assert_eq!(ledger.balance_of(tx.as_mut(), &user("owner")).await.unwrap(), 50);
    }

    #[tokio::test]
    async fn mint_overflow_is_reported() {
        let store = InMemoryLedgerStore::new();
        let ledger = StoreTokenLedger::new();
        let mut tx = store.begin().await.unwrap();
        ledger.mint(tx.as_mut(), &user("ivy"), u64::MAX).await.unwrap();

        let err = ledger.mint(tx.as_mut(), &user("ivy"), 1).await.unwrap_err();
        assert_eq!(err, TokenError::Overflow(user("ivy")));
    }

    #[tokio::test]
    async fn corrupt_balance_is_reported() {
        let store = InMemoryLedgerStore::new();
        let mut tx = store.begin().await.unwrap();
        let key = encode_composite_key(BALANCE_SCHEME, &["ivy"]).unwrap();
        tx.put(&key, b"lots".to_vec()).await.unwrap();

        let err = StoreTokenLedger
            .balance_of(tx.as_mut(), &user("ivy"))
            .await
            .unwrap_err();
        assert!(matches!(err, TokenError::CorruptBalance { .. }));
    }
}
