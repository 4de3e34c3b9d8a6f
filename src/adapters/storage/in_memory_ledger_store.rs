//! In-Memory Ledger Store Adapter
//!
//! A versioned, ordered key-value store with optimistic concurrency control.
//! Useful for tests, development and single-process deployments.
//!
//! Each committed key carries a version stamped from a global counter. A
//! transaction records the version it saw for every key it read (or that
//! the key was absent) and the exact key/version listing of every scan.
//! `commit` takes the write lock, re-checks all of it, and only then
//! applies the staged writes.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{
    encode_composite_key, KvEntry, LedgerStore, LedgerTransaction, StoreError,
    COMPOSITE_KEY_DELIMITER,
};

#[derive(Debug, Clone)]
struct Versioned {
    value: Vec<u8>,
    version: u64,
}

#[derive(Debug, Default)]
struct LedgerState {
    entries: BTreeMap<String, Versioned>,
    last_version: u64,
}

impl LedgerState {
    fn version_of(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|v| v.version)
    }

    fn scan(&self, bounds: &ScanBounds) -> Vec<(&String, &Versioned)> {
        self.entries
            .range::<str, _>((Bound::Included(bounds.lower()), Bound::Unbounded))
            .take_while(|(key, _)| bounds.below_upper(key))
            .collect()
    }

    fn listing(&self, bounds: &ScanBounds) -> Vec<(String, u64)> {
        self.scan(bounds)
            .into_iter()
            .map(|(key, v)| (key.clone(), v.version))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanBounds {
    Range { start: String, end: String },
    Prefix(String),
}

impl ScanBounds {
    fn lower(&self) -> &str {
        match self {
            ScanBounds::Range { start, .. } => start,
            ScanBounds::Prefix(prefix) => prefix,
        }
    }

    fn below_upper(&self, key: &str) -> bool {
        match self {
            ScanBounds::Range { end, .. } => key < end.as_str(),
            ScanBounds::Prefix(prefix) => key.starts_with(prefix.as_str()),
        }
    }

    fn contains(&self, key: &str) -> bool {
        key >= self.lower() && self.below_upper(key)
    }
}

impl fmt::Display for ScanBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanBounds::Range { start, end } => {
                write!(f, "range [{}, {})", printable(start), printable(end))
            }
            ScanBounds::Prefix(prefix) => write!(f, "prefix {}", printable(prefix)),
        }
    }
}

fn printable(key: &str) -> String {
    key.replace(COMPOSITE_KEY_DELIMITER, "/")
}

#[derive(Debug)]
struct ScanRecord {
    bounds: ScanBounds,
    observed: Vec<(String, u64)>,
}

/// In-memory transactional key-value store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedgerStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed keys
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    /// True if nothing has been committed
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Clear all committed data (useful for tests)
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn begin(&self) -> Result<Box<dyn LedgerTransaction>, StoreError> {
        Ok(Box::new(InMemoryLedgerTransaction {
            state: Arc::clone(&self.state),
            reads: HashMap::new(),
            scans: Vec::new(),
            writes: BTreeMap::new(),
        }))
    }
}

/// Transaction over an [`InMemoryLedgerStore`].
#[derive(Debug)]
pub struct InMemoryLedgerTransaction {
    state: Arc<RwLock<LedgerState>>,
    reads: HashMap<String, Option<u64>>,
    scans: Vec<ScanRecord>,
    /// `None` marks a staged delete.
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl InMemoryLedgerTransaction {
    async fn scan(&mut self, bounds: ScanBounds) -> Vec<KvEntry> {
        let state = self.state.read().await;
        let committed = state.scan(&bounds);
        let observed = committed
            .iter()
            .map(|(key, v)| ((*key).clone(), v.version))
            .collect();
        let mut merged: BTreeMap<String, Vec<u8>> = committed
            .into_iter()
            .map(|(key, v)| (key.clone(), v.value.clone()))
            .collect();
        drop(state);

        for (key, staged) in self.writes.iter().filter(|(key, _)| bounds.contains(key)) {
            match staged {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        self.scans.push(ScanRecord { bounds, observed });
        merged
            .into_iter()
            .map(|(key, value)| KvEntry { key, value })
            .collect()
    }
}

#[async_trait]
impl LedgerTransaction for InMemoryLedgerTransaction {
    async fn get(&mut self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(staged) = self.writes.get(key) {
            return Ok(staged.clone());
        }

        let state = self.state.read().await;
        let entry = state.entries.get(key);
        self.reads
            .entry(key.to_string())
            .or_insert_with(|| entry.map(|v| v.version));
        Ok(entry.map(|v| v.value.clone()))
    }

    async fn put(&mut self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.writes.insert(key.to_string(), Some(value));
        Ok(())
    }

    async fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.writes.insert(key.to_string(), None);
        Ok(())
    }

    async fn range_scan(&mut self, start: &str, end: &str) -> Result<Vec<KvEntry>, StoreError> {
        Ok(self
            .scan(ScanBounds::Range {
                start: start.to_string(),
                end: end.to_string(),
            })
            .await)
    }

    async fn prefix_scan(
        &mut self,
        scheme: &str,
        parts: &[&str],
    ) -> Result<Vec<KvEntry>, StoreError> {
        let prefix = encode_composite_key(scheme, parts)?;
        Ok(self.scan(ScanBounds::Prefix(prefix)).await)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryLedgerTransaction {
            state,
            reads,
            scans,
            writes,
        } = *self;
        let mut state = state.write().await;

        for (key, observed) in &reads {
            if state.version_of(key) != *observed {
                tracing::warn!(key = %printable(key), "ledger commit conflict on read key");
                return Err(StoreError::Conflict(format!("key {}", printable(key))));
            }
        }
        for scan in &scans {
            if state.listing(&scan.bounds) != scan.observed {
                tracing::warn!(bounds = %scan.bounds, "ledger commit conflict on scanned range");
                return Err(StoreError::Conflict(scan.bounds.to_string()));
            }
        }

        let write_count = writes.len();
        for (key, staged) in writes {
            match staged {
                Some(value) => {
                    state.last_version += 1;
                    let version = state.last_version;
                    state.entries.insert(key, Versioned { value, version });
                }
                None => {
                    state.entries.remove(&key);
                }
            }
        }

        tracing::debug!(
            reads = reads.len(),
            scans = scans.len(),
            writes = write_count,
            version = state.last_version,
            "ledger transaction committed"
        );
        Ok(())
    }

    async fn abort(self: Box<Self>) {
        tracing::debug!(
            staged_writes = self.writes.len(),
            "ledger transaction aborted"
        );
    }
}
