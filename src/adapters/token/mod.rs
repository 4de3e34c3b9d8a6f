//! Token Adapters
//!
//! Implementations of the TokenLedger port.
//!
//! - **StoreTokenLedger** - balances kept in the ledger store, settled
//!   inside the caller's transaction

mod store_token_ledger;

pub use store_token_ledger::{StoreTokenLedger, BALANCE_SCHEME};
