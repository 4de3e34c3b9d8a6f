//! Ledger store port.
//!
//! A flat, transactional key-value store. Every lifecycle operation runs in
//! exactly one [`LedgerTransaction`]: reads are taken when issued, writes are
//! staged, and `commit` applies the whole write set or nothing.
//!
//! # Concurrency contract
//!
//! Implementations use optimistic concurrency. Every key read (including
//! keys found absent) and every range or prefix scanned is validated at
//! commit against the latest committed state. If another transaction
//! committed a change to any of them first, `commit` fails with
//! [`StoreError::Conflict`] and none of the staged writes become visible.
//!
//! Reads observe the transaction's own staged writes.
//!
//! # Composite keys
//!
//! Secondary structures encode tuples as
//! `\u{0}scheme\u{0}part1\u{0}part2\u{0}`, so a prefix scan over the leading
//! parts returns every tuple that shares them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::membership::MembershipError;

/// Delimiter and namespace marker for composite keys.
pub const COMPOSITE_KEY_DELIMITER: char = '\u{0}';

/// Errors raised by a ledger store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A value read by this transaction was changed by a concurrent commit.
    #[error("Transaction conflict on {0}")]
    Conflict(String),

    /// A composite key or one of its parts is malformed.
    #[error("Invalid composite key: {0}")]
    InvalidCompositeKey(String),

    /// The backing store failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Returns true if rerunning the transaction may succeed.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

impl From<StoreError> for MembershipError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(key) => MembershipError::Conflict(key),
            other => MembershipError::Infrastructure(other.to_string()),
        }
    }
}

/// A key and its value, as returned by scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: String,
    pub value: Vec<u8>,
}

/// Factory for transactions.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Opens a new transaction against the latest committed state.
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, StoreError>;
}

/// One atomic unit of reads and staged writes.
#[async_trait]
pub trait LedgerTransaction: Send {
    /// Reads a key. `None` if absent (or deleted earlier in this transaction).
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stages a write.
    async fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Stages a delete. Deleting an absent key is not an error.
    async fn delete(&mut self, key: &str) -> Result<(), StoreError>;

    /// Returns entries with `start <= key < end`, in key order.
    async fn range_scan(&mut self, start: &str, end: &str) -> Result<Vec<KvEntry>, StoreError>;

    /// Returns entries whose composite key starts with `scheme` and `parts`, in key order.
    async fn prefix_scan(
        &mut self,
        scheme: &str,
        parts: &[&str],
    ) -> Result<Vec<KvEntry>, StoreError>;

    /// Validates the read set and applies the staged writes atomically.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;

    /// Discards the staged writes.
    async fn abort(self: Box<Self>);
}

/// Encodes `scheme` and `parts` into a composite key.
pub fn encode_composite_key(scheme: &str, parts: &[&str]) -> Result<String, StoreError> {
    if scheme.is_empty() {
        return Err(StoreError::InvalidCompositeKey(
            "scheme cannot be empty".to_string(),
        ));
    }
    let mut key = String::with_capacity(
        2 + scheme.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>(),
    );
    key.push(COMPOSITE_KEY_DELIMITER);
    for segment in std::iter::once(&scheme).chain(parts.iter()) {
        if segment.contains(COMPOSITE_KEY_DELIMITER) {
            return Err(StoreError::InvalidCompositeKey(format!(
                "segment {:?} contains the delimiter",
                segment
            )));
        }
        key.push_str(segment);
        key.push(COMPOSITE_KEY_DELIMITER);
    }
    Ok(key)
}

/// Splits a composite key back into its scheme and parts.
pub fn decode_composite_key(key: &str) -> Result<(String, Vec<String>), StoreError> {
    let body = key
        .strip_prefix(COMPOSITE_KEY_DELIMITER)
        .and_then(|rest| rest.strip_suffix(COMPOSITE_KEY_DELIMITER))
        .ok_or_else(|| StoreError::InvalidCompositeKey(format!("{:?} is not composite", key)))?;

    let mut segments = body.split(COMPOSITE_KEY_DELIMITER).map(str::to_string);
    let scheme = segments
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| StoreError::InvalidCompositeKey(format!("{:?} has no scheme", key)))?;

    Ok((scheme, segments.collect()))
}
