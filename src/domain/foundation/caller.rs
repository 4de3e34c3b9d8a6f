//! Caller identity for the domain layer.
//!
//! A `Caller` is whoever submitted the current request: an identity plus
//! whatever attributes the credential carried. Any identity source can
//! produce one through the `IdentityResolver` port.

use std::collections::BTreeMap;

use super::UserId;
use thiserror::Error;

/// Attribute name that carries the caller's role.
pub const ROLE_ATTRIBUTE: &str = "role";

/// Role value that grants catalog administration.
pub const ADMIN_ROLE: &str = "admin";

/// The resolved submitter of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Identity derived from the caller's credentials.
    pub id: UserId,
    attributes: BTreeMap<String, String>,
}

impl Caller {
    /// Creates a caller with no attributes.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a credential attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Looks up a credential attribute. `None` means the attribute is absent.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Returns true if the credential carries `role=admin`.
    pub fn has_admin_role(&self) -> bool {
        self.attribute(ROLE_ATTRIBUTE) == Some(ADMIN_ROLE)
    }
}

/// Errors raised while resolving a credential into a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The credential is malformed or unknown.
    #[error("Invalid credential")]
    InvalidToken,

    /// The identity source could not be reached.
    #[error("Identity service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Returns true if retrying later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
