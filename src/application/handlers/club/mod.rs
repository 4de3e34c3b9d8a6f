//! Club handlers.
//!
//! ## Commands
//! - Initializing the club owner
//!
//! ## Queries
//! - Token balance of an account

mod get_balance;
mod initialize_club;

pub use get_balance::{GetBalanceHandler, GetBalanceQuery, GetBalanceResult};
pub use initialize_club::{InitializeClubCommand, InitializeClubHandler, InitializeClubResult};
