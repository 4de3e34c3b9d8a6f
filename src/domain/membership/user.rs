//! Registered club members.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MembershipId, UserId, ValidationError};

use super::MembershipError;

/// A registered member and the ordered history of their memberships.
///
/// The membership list is append-only; its last entry is the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub memberships: Vec<MembershipId>,
}

impl User {
    /// Creates a user with an empty membership history.
    pub fn register(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, MembershipError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if email.is_empty() {
            return Err(ValidationError::empty_field("email").into());
        }
        Ok(Self {
            id,
            name,
            email,
            memberships: Vec::new(),
        })
    }

    /// Returns the most recent membership reference, if any.
    pub fn latest_membership(&self) -> Option<MembershipId> {
        self.memberships.last().copied()
    }

    /// Appends a newly enrolled membership.
    pub fn attach_membership(&mut self, id: MembershipId) {
        self.memberships.push(id);
    }
}
