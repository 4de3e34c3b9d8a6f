//! HTTP DTOs (Data Transfer Objects) for club endpoints.
//!
//! These types define the JSON request/response structure for the club API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::membership::{
    Level, Membership, MembershipStatus, MembershipTier, RefundAssessment, UpgradeQuote, User,
};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to register the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
}

/// Request to define a tier.
#[derive(Debug, Clone, Deserialize)]
pub struct SetLevelRequest {
    pub duration_months: u32,
    pub required_tokens: u64,
}

/// Request to reprice a tier.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLevelPriceRequest {
    pub required_tokens: u64,
}

/// Request to enroll the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub tier: String,
}

/// Request to upgrade the caller's membership.
#[derive(Debug, Clone, Deserialize)]
pub struct UpgradeRequest {
    pub tier: String,
    /// Tokens the caller expects to pay; rejected if it differs from the delta.
    #[serde(default)]
    pub expected_tokens: Option<u64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeClubResponse {
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Membership ids, oldest first.
    pub memberships: Vec<u64>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
            memberships: user.memberships.iter().map(|id| id.value()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user: UserResponse,
    pub bonus_minted: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelResponse {
    pub tier: MembershipTier,
    pub duration_months: u32,
    pub required_tokens: u64,
}

impl LevelResponse {
    pub fn new(tier: MembershipTier, level: Level) -> Self {
        Self {
            tier,
            duration_months: level.duration_months,
            required_tokens: level.required_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierMembersResponse {
    pub tier: MembershipTier,
    pub users: Vec<String>,
}

/// Membership view for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipResponse {
    pub id: u64,
    pub owner_user_id: String,
    pub tier: MembershipTier,
    pub status: MembershipStatus,
    pub token_deposited: u64,
    pub is_completed: bool,
    pub is_cancelled: bool,
    pub is_upgraded: bool,
    /// Start of the current term (RFC 3339).
    pub start_date: String,
    /// End of the current term (RFC 3339).
    pub end_date: String,
    pub refund_amount: u64,
}

impl From<Membership> for MembershipResponse {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id.value(),
            owner_user_id: membership.owner_user_id.to_string(),
            tier: membership.tier,
            status: membership.status(),
            token_deposited: membership.token_deposited,
            is_completed: membership.is_completed,
            is_cancelled: membership.is_cancelled,
            is_upgraded: membership.is_upgraded,
            start_date: membership.start_date.to_rfc3339(),
            end_date: membership.end_date.to_rfc3339(),
            refund_amount: membership.refund_amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub membership: MembershipResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_previous: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeResponse {
    pub membership: MembershipResponse,
    pub from_tier: MembershipTier,
    pub elapsed_months: u32,
    pub token_delta: u64,
}

impl UpgradeResponse {
    pub fn new(membership: Membership, quote: &UpgradeQuote) -> Self {
        Self {
            membership: membership.into(),
            from_tier: quote.from_tier,
            elapsed_months: quote.elapsed_months,
            token_delta: quote.token_delta,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub membership: MembershipResponse,
    /// Refund bucket, absent for tiers without a schedule.
    pub refund_bucket: Option<u32>,
    pub refund_amount: u64,
}

impl CancelResponse {
    pub fn new(membership: Membership, refund: RefundAssessment) -> Self {
        Self {
            membership: membership.into(),
            refund_bucket: refund.bucket,
            refund_amount: refund.amount,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub account: String,
    pub balance: u64,
}

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
