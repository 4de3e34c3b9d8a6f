//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the lifecycle engine and its collaborators. Adapters implement these ports.
//!
//! - `LedgerStore` / `LedgerTransaction` - transactional key-value ledger
//! - `TokenLedger` - mint and transfer of club tokens
//! - `IdentityResolver` - credential to caller resolution
//! - `Clock` - current instant

mod clock;
mod identity_resolver;
mod ledger_store;
mod token_ledger;

pub use clock::Clock;
pub use identity_resolver::IdentityResolver;
pub use ledger_store::{
    decode_composite_key, encode_composite_key, KvEntry, LedgerStore, LedgerTransaction,
    StoreError, COMPOSITE_KEY_DELIMITER,
};
pub use token_ledger::{TokenError, TokenLedger};
