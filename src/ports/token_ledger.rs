//! Token ledger port.
//!
//! The fungible-token capability the lifecycle engine settles with. Every
//! call takes the enclosing ledger transaction, so token movements commit
//! or abort together with the membership writes they pay for.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::membership::MembershipError;

use super::{LedgerTransaction, StoreError};

/// Errors raised by a token ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Insufficient balance for {account}: needs {required}, has {available}")]
    InsufficientBalance {
        account: UserId,
        required: u64,
        available: u64,
    },

    #[error("Balance of {0} would overflow")]
    Overflow(UserId),

    #[error("Corrupt balance record for {account}: {reason}")]
    CorruptBalance { account: UserId, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<TokenError> for MembershipError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InsufficientBalance {
                account,
                required,
                available,
            } => MembershipError::InsufficientBalance {
                account: account.to_string(),
                required,
                available,
            },
            TokenError::Store(store) => store.into(),
            other => MembershipError::Infrastructure(other.to_string()),
        }
    }
}

/// Mint and transfer capability of a token contract.
#[async_trait]
pub trait TokenLedger: Send + Sync {
    /// Creates `amount` new tokens in `to`'s account.
    async fn mint(
        &self,
        tx: &mut dyn LedgerTransaction,
        to: &UserId,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Moves `amount` tokens. Fails with `InsufficientBalance` if `from` is short.
    async fn transfer(
        &self,
        tx: &mut dyn LedgerTransaction,
        from: &UserId,
        to: &UserId,
        amount: u64,
    ) -> Result<(), TokenError>;

    /// Current balance of `account`, zero if it never held tokens.
    async fn balance_of(
        &self,
        tx: &mut dyn LedgerTransaction,
        account: &UserId,
    ) -> Result<u64, TokenError>;
}
