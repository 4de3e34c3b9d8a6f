//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations over the ledger store.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;
pub mod ledger;

pub use handlers::*;
pub use ledger::{settle, ClubRecords};
