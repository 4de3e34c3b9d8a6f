//! Storage Adapters
//!
//! Implementations of the LedgerStore port.
//!
//! ## Available Adapters
//!
//! - **InMemoryLedgerStore** - versioned in-memory store with optimistic
//!   concurrency (testing/development/single process)
//!
//! ## Usage
//!
//! ```ignore
//! use miniclub::adapters::storage::InMemoryLedgerStore;
//! use miniclub::ports::LedgerStore;
//!
//! let store = InMemoryLedgerStore::new();
//! let mut tx = store.begin().await?;
//! tx.put("owner", b"alice".to_vec()).await?;
//! tx.commit().await?;
//! ```

mod in_memory_ledger_store;

pub use in_memory_ledger_store::{InMemoryLedgerStore, InMemoryLedgerTransaction};
