//! JSON encoding of ledger records.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::membership::MembershipError;

pub(crate) fn encode<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, MembershipError> {
    serde_json::to_vec(value)
        .map_err(|e| MembershipError::infrastructure(format!("cannot encode {}: {}", key, e)))
}

pub(crate) fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, MembershipError> {
    serde_json::from_slice(bytes)
        .map_err(|e| MembershipError::infrastructure(format!("corrupt record {}: {}", key, e)))
}

pub(crate) fn decode_counter(key: &str, bytes: &[u8]) -> Result<u64, MembershipError> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| MembershipError::infrastructure(format!("corrupt counter {}", key)))
}
