//! User directory handlers.
//!
//! ## Commands
//! - Registering the caller
//!
//! ## Queries
//! - Get one user
//! - List all users

mod queries;
mod register_user;

pub use queries::{
    GetUserHandler, GetUserQuery, GetUserResult, ListUsersHandler, ListUsersQuery,
    ListUsersResult,
};
pub use register_user::{RegisterUserCommand, RegisterUserHandler, RegisterUserResult};
