//! Static identity resolver.
//!
//! Maps a fixed set of bearer tokens to callers. Used by tests and by
//! deployments that provision a handful of operator credentials up front.
//!
//! # Example
//!
//! ```ignore
//! use miniclub::adapters::auth::StaticIdentityResolver;
//! use miniclub::domain::foundation::{Caller, UserId};
//!
//! let resolver = StaticIdentityResolver::new()
//!     .with_caller("owner-token", Caller::new(UserId::new("owner")?))
//!     .with_member("alice-token", "alice");
//!
//! let caller = resolver.resolve("alice-token").await?;
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Caller, UserId, ADMIN_ROLE, ROLE_ATTRIBUTE};
use crate::ports::IdentityResolver;

/// Identity resolver backed by a fixed token table.
///
/// Tokens not in the table return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct StaticIdentityResolver {
    callers: HashMap<String, Caller>,
    forced_error: Option<AuthError>,
}

impl StaticIdentityResolver {
    /// Creates an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token that resolves to `caller`.
    pub fn with_caller(mut self, token: impl Into<String>, caller: Caller) -> Self {
        self.callers.insert(token.into(), caller);
        self
    }

    /// Adds a token for a plain member identity.
    ///
    /// Identities that fail validation are skipped.
    pub fn with_member(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_caller(token, Caller::new(id)),
            Err(_) => self,
        }
    }

    /// Adds a token for an identity carrying `role=admin`.
    pub fn with_admin(self, token: impl Into<String>, user_id: &str) -> Self {
        match UserId::new(user_id) {
            Ok(id) => self.with_caller(
                token,
                Caller::new(id).with_attribute(ROLE_ATTRIBUTE, ADMIN_ROLE),
            ),
            Err(_) => self,
        }
    }

    /// Forces every resolution to fail with `error`.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.forced_error = Some(error);
        self
    }

    /// Number of known tokens.
    pub fn token_count(&self) -> usize {
        self.callers.len()
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve(&self, credential: &str) -> Result<Caller, AuthError> {
        if let Some(error) = &self.forced_error {
            return Err(error.clone());
        }
        self.callers
            .get(credential)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
