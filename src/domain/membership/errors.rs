//! Membership lifecycle errors.
//!
//! Every failure a lifecycle operation can report. Validation failures are
//! raised before any write, so an error is always the sole observable effect
//! of a rejected call.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound, NoMembership | 404 |
//! | Unauthorized | 403 |
//! | AlreadyInitialized, AlreadyRegistered, MembershipInProgress, Conflict | 409 |
//! | NotInitialized | 503 |
//! | InvalidTier, ValidationFailed, TokenMismatch, PriceUnchanged | 400 |
//! | Expired, GraceWindowTooClose, DeGrade, AlreadyAtLevel, CancellationWindowClosed, InvalidState | 422 |
//! | InsufficientBalance | 402 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, MembershipId, Timestamp, UserId, ValidationError};

use super::{MembershipStatus, MembershipTier};

/// Membership lifecycle errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("Club has already been initialized")]
    AlreadyInitialized,

    #[error("Club has not been initialized")]
    NotInitialized,

    #[error("Caller {caller} is not allowed to {action}")]
    Unauthorized { caller: String, action: String },

    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Invalid membership tier: {0}")]
    InvalidTier(String),

    #[error("User {0} is already registered")]
    AlreadyRegistered(UserId),

    #[error("Membership {id} runs until {ends_at}; must wait for current membership to end")]
    MembershipInProgress { id: MembershipId, ends_at: Timestamp },

    #[error("Membership {0} has expired")]
    Expired(MembershipId),

    #[error("Membership {id} ends in {hours_remaining} hours, too close to expiry to modify")]
    GraceWindowTooClose { id: MembershipId, hours_remaining: i64 },

    #[error("Cannot de-grade: {elapsed_months} months remain but {tier} lasts {tier_months} months")]
    DeGrade {
        tier: MembershipTier,
        elapsed_months: u32,
        tier_months: u32,
    },

    #[error("Membership is already at the {tier} level (token delta {delta})")]
    AlreadyAtLevel { tier: MembershipTier, delta: i128 },

    #[error("Required tokens = {required} but given = {given}")]
    TokenMismatch { required: u64, given: u64 },

    #[error("{tier} already costs {price} tokens")]
    PriceUnchanged { tier: MembershipTier, price: u64 },

    #[error("Cancellation window closed for {tier} membership {id}")]
    CancellationWindowClosed { id: MembershipId, tier: MembershipTier },

    #[error("User {0} has no current membership")]
    NoMembership(UserId),

    #[error("Cannot move membership from {from:?} to {to:?}")]
    InvalidState {
        from: MembershipStatus,
        to: MembershipStatus,
    },

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Insufficient balance for {account}: needs {required}, has {available}")]
    InsufficientBalance {
        account: String,
        required: u64,
        available: u64,
    },

    #[error("Transaction conflict: {0}")]
    Conflict(String),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl MembershipError {
    pub fn unauthorized(caller: &UserId, action: impl Into<String>) -> Self {
        MembershipError::Unauthorized {
            caller: caller.to_string(),
            action: action.into(),
        }
    }

    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        MembershipError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn invalid_tier(tier: impl Into<String>) -> Self {
        MembershipError::InvalidTier(tier.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::AlreadyInitialized => ErrorCode::AlreadyInitialized,
            MembershipError::NotInitialized => ErrorCode::NotInitialized,
            MembershipError::Unauthorized { .. } => ErrorCode::Unauthorized,
            MembershipError::NotFound { .. } => ErrorCode::NotFound,
            MembershipError::InvalidTier(_) => ErrorCode::InvalidTier,
            MembershipError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            MembershipError::MembershipInProgress { .. } => ErrorCode::MembershipInProgress,
            MembershipError::Expired(_) => ErrorCode::MembershipExpired,
            MembershipError::GraceWindowTooClose { .. } => ErrorCode::GraceWindowTooClose,
            MembershipError::DeGrade { .. } => ErrorCode::DeGrade,
            MembershipError::AlreadyAtLevel { .. } => ErrorCode::AlreadyAtLevel,
            MembershipError::TokenMismatch { .. } => ErrorCode::TokenMismatch,
            MembershipError::PriceUnchanged { .. } => ErrorCode::PriceUnchanged,
            MembershipError::CancellationWindowClosed { .. } => {
                ErrorCode::CancellationWindowClosed
            }
            MembershipError::NoMembership(_) => ErrorCode::NoMembership,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::InsufficientBalance { .. } => ErrorCode::InsufficientBalance,
            MembershipError::Conflict(_) => ErrorCode::Conflict,
            MembershipError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    /// Returns true if resubmitting the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MembershipError::Conflict(_) | MembershipError::Infrastructure(_)
        )
    }
}

impl From<ValidationError> for MembershipError {
    fn from(err: ValidationError) -> Self {
        MembershipError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
