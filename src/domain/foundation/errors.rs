//! Error types shared across the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidTier,
    TokenMismatch,
    PriceUnchanged,

    // Not found errors
    NotFound,
    NoMembership,

    // Lifecycle state errors
    AlreadyInitialized,
    NotInitialized,
    AlreadyRegistered,
    MembershipInProgress,
    MembershipExpired,
    GraceWindowTooClose,
    DeGrade,
    AlreadyAtLevel,
    CancellationWindowClosed,
    InvalidStateTransition,

    // Authorization errors
    Unauthorized,

    // Settlement errors
    InsufficientBalance,

    // Infrastructure errors
    Conflict,
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidTier => "INVALID_TIER",
            ErrorCode::TokenMismatch => "TOKEN_MISMATCH",
            ErrorCode::PriceUnchanged => "PRICE_UNCHANGED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::NoMembership => "NO_MEMBERSHIP",
            ErrorCode::AlreadyInitialized => "ALREADY_INITIALIZED",
            ErrorCode::NotInitialized => "NOT_INITIALIZED",
            ErrorCode::AlreadyRegistered => "ALREADY_REGISTERED",
            ErrorCode::MembershipInProgress => "MEMBERSHIP_IN_PROGRESS",
            ErrorCode::MembershipExpired => "MEMBERSHIP_EXPIRED",
            ErrorCode::GraceWindowTooClose => "GRACE_WINDOW_TOO_CLOSE",
            ErrorCode::DeGrade => "DE_GRADE",
            ErrorCode::AlreadyAtLevel => "ALREADY_AT_LEVEL",
            ErrorCode::CancellationWindowClosed => "CANCELLATION_WINDOW_CLOSED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InsufficientBalance => "INSUFFICIENT_BALANCE",
            ErrorCode::Conflict => "CONFLICT",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
