//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Identity of a club member, as resolved from caller credentials.
///
/// The identity doubles as a key component in the ledger, so it may not be
/// empty and may not contain a NUL character (the composite key delimiter).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty or not key-safe.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if id.contains('\u{0}') {
            return Err(ValidationError::invalid_format(
                "user_id",
                "contains a NUL character",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Sequential identifier of a membership record.
///
/// Allocated from the persisted membership counter; the first membership
/// ever created is id 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MembershipId(u64);

impl MembershipId {
    /// The first id handed out by an empty ledger.
    pub const FIRST: MembershipId = MembershipId(1);

    /// Wraps a raw sequence number.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for MembershipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MembershipId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("membership_id", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_plain_identity() {
        let id = UserId::new("alice").unwrap();
        assert_eq!(id.as_str(), "alice");
        assert_eq!(id.to_string(), "alice");
    }

    #[test]
    fn user_id_rejects_empty_and_blank() {
        assert!(matches!(
            UserId::new(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_rejects_nul_character() {
        let result = UserId::new("ali\u{0}ce");
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let id = UserId::new("bob").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"bob\"");

        let parsed: UserId = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn user_id_deserialization_validates() {
        let result: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn membership_id_sequence_starts_at_one() {
        assert_eq!(MembershipId::FIRST.value(), 1);
        assert_eq!(MembershipId::FIRST.next(), MembershipId::new(2));
    }

    #[test]
    fn membership_id_parses_from_decimal() {
        assert_eq!("42".parse::<MembershipId>().unwrap(), MembershipId::new(42));
        assert!("forty-two".parse::<MembershipId>().is_err());
    }

    #[test]
    fn membership_id_serializes_as_number() {
        let id = MembershipId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
