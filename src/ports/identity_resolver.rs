//! Identity resolver port.
//!
//! Turns a presented credential into the [`Caller`] the lifecycle engine
//! authorizes against. The engine never sees raw credentials.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, Caller};

/// Resolves credentials into callers.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves a bearer credential.
    ///
    /// # Errors
    ///
    /// - `InvalidToken` if the credential is unknown or malformed
    /// - `ServiceUnavailable` if the identity source cannot be reached
    async fn resolve(&self, credential: &str) -> Result<Caller, AuthError>;
}
