//! Development identity resolver.
//!
//! Treats the bearer token itself as the identity, with optional attributes
//! appended after semicolons:
//!
//! ```text
//! Authorization: Bearer alice
//! Authorization: Bearer root;role=admin
//! ```
//!
//! Never use this outside local development: anyone can claim any identity.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Caller, UserId};
use crate::ports::IdentityResolver;

/// Resolver that trusts the credential text.
#[derive(Debug, Default, Clone, Copy)]
pub struct DevTokenResolver;

impl DevTokenResolver {
    pub fn new() -> Self {
        Self
    }

    fn parse(credential: &str) -> Result<Caller, AuthError> {
        let mut segments = credential.split(';');
        let id = segments
            .next()
            .map(str::trim)
            .and_then(|id| UserId::new(id).ok())
            .ok_or(AuthError::InvalidToken)?;

        segments
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .try_fold(Caller::new(id), |caller, segment| {
                let (name, value) = segment.split_once('=').ok_or(AuthError::InvalidToken)?;
                Ok(caller.with_attribute(name.trim(), value.trim()))
            })
    }
}

#[async_trait]
impl IdentityResolver for DevTokenResolver {
    async fn resolve(&self, credential: &str) -> Result<Caller, AuthError> {
        Self::parse(credential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bare_token_is_the_identity() {
        let caller = DevTokenResolver.resolve("alice").await.unwrap();
        assert_eq!(caller.id.as_str(), "alice");
        assert!(!caller.has_admin_role());
    }

    #[tokio::test]
    async fn attributes_follow_semicolons() {
        let caller = DevTokenResolver
            .resolve("root; role=admin ;team=ops")
            .await
            .unwrap();
        assert_eq!(caller.id.as_str(), "root");
        assert!(caller.has_admin_role());
        assert_eq!(caller.attribute("team"), Some("ops"));
    }

    #[tokio::test]
    async fn malformed_tokens_are_rejected() {
        for token in ["", "  ", ";role=admin", "alice;admin"] {
            assert_eq!(
                DevTokenResolver.resolve(token).await,
                Err(AuthError::InvalidToken),
                "token {:?}",
                token
            );
        }
    }
}
