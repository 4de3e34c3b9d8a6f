//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the lifecycle engine to concrete infrastructure:
//! - `auth` - identity resolvers (static table, development tokens)
//! - `clock` - system and fixed clocks
//! - `http` - axum REST surface
//! - `storage` - optimistic in-memory ledger store
//! - `token` - store-backed token ledger

pub mod auth;
pub mod clock;
pub mod http;
pub mod storage;
pub mod token;

pub use auth::{DevTokenResolver, StaticIdentityResolver};
pub use clock::{FixedClock, SystemClock};
pub use storage::InMemoryLedgerStore;
pub use token::StoreTokenLedger;
