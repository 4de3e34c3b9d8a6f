//! Level catalog handlers.
//!
//! ## Commands
//! - Setting a tier's duration and price (admin)
//! - Repricing a tier (owner)
//!
//! ## Queries
//! - Get one level
//! - List users holding a tier

mod queries;
mod set_level;
mod update_level_price;

pub use queries::{
    GetLevelHandler, GetLevelQuery, GetLevelResult, ListUsersByTierHandler, ListUsersByTierQuery,
    ListUsersByTierResult,
};
pub use set_level::{SetLevelCommand, SetLevelHandler, SetLevelResult};
pub use update_level_price::{
    UpdateLevelPriceCommand, UpdateLevelPriceHandler, UpdateLevelPriceResult,
};
