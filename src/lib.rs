//! Mini Club - Membership lifecycle and token settlement engine
//!
//! Members enroll in one of three tiers, upgrade with prorated token
//! deltas, or cancel for a time-based refund. All state lives in a
//! transactional key-value ledger with optimistic concurrency.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
