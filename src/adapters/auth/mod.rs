//! Authentication adapters.
//!
//! Implementations of the `IdentityResolver` port:
//!
//! - `static_resolver` - fixed token table (tests, provisioned operators)
//! - `dev_token` - token text is the identity (local development only)

mod dev_token;
mod static_resolver;

pub use dev_token::DevTokenResolver;
pub use static_resolver::StaticIdentityResolver;
