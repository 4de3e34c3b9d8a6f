//! Typed access to club records in the ledger store.
//!
//! [`ClubRecords`] wraps one open transaction and exposes the club's tables:
//! settings, level catalog, user directory, membership ledger and the
//! by-tier level index. Every read and write goes through the wrapped
//! transaction, so a handler's changes commit or abort together.

mod codec;
mod keys;
mod level_index;
mod levels;
mod memberships;
mod settings;
mod users;

pub use keys::{
    level_key, membership_key, user_key, LEVEL_INDEX_SCHEME, MEMBERSHIP_PREFIX, OWNER_KEY,
    TOTAL_MEMBERSHIPS_KEY, USER_PREFIX,
};

use crate::domain::membership::MembershipError;
use crate::ports::LedgerTransaction;

/// Club tables over an open ledger transaction.
pub struct ClubRecords<'a> {
    tx: &'a mut dyn LedgerTransaction,
}

impl<'a> ClubRecords<'a> {
    pub fn new(tx: &'a mut dyn LedgerTransaction) -> Self {
        Self { tx }
    }

    /// The underlying transaction, for collaborators such as the token ledger.
    pub fn transaction(&mut self) -> &mut dyn LedgerTransaction {
        &mut *self.tx
    }
}

/// Commits `tx` if `outcome` succeeded, aborts it otherwise.
///
/// A failed commit replaces the successful outcome with the commit error.
pub async fn settle<T>(
    tx: Box<dyn LedgerTransaction>,
    outcome: Result<T, MembershipError>,
) -> Result<T, MembershipError> {
    match outcome {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            tx.abort().await;
            Err(err)
        }
    }
}
