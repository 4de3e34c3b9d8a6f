//! HTTP handlers for club endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::middleware::RequireCaller;
use crate::application::handlers::{
    CancelMembershipCommand, CancelMembershipHandler, EnrollCommand, EnrollHandler,
    GetBalanceHandler, GetBalanceQuery, GetLevelHandler, GetLevelQuery, GetMembershipHandler,
    GetMembershipQuery, GetUserHandler, GetUserQuery, InitializeClubCommand,
    InitializeClubHandler, ListAllMembershipsHandler, ListAllMembershipsQuery,
    ListUserMembershipsHandler, ListUserMembershipsQuery, ListUsersByTierHandler,
    ListUsersByTierQuery, ListUsersHandler, ListUsersQuery, RegisterUserCommand,
    RegisterUserHandler, SetLevelCommand, SetLevelHandler, UpdateLevelPriceCommand,
    UpdateLevelPriceHandler, UpgradeMembershipCommand, UpgradeMembershipHandler,
};
use crate::config::{ClubConfig, ValidationError};
use crate::domain::foundation::{ErrorCode, MembershipId, UserId};
use crate::domain::membership::{MembershipError, ProrationPolicy, RefundPolicy};
use crate::ports::{Clock, LedgerStore, TokenLedger};

use super::dto::{
    BalanceResponse, CancelResponse, EnrollRequest, EnrollResponse, ErrorResponse,
    InitializeClubResponse, LevelResponse, MembershipResponse, RegisterUserRequest,
    RegisterUserResponse, SetLevelRequest, TierMembersResponse, UpdateLevelPriceRequest,
    UpgradeRequest, UpgradeResponse, UserResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Club rules the handlers are built with.
#[derive(Debug, Clone, Default)]
pub struct ClubRules {
    pub bootstrap_id: Option<UserId>,
    pub registration_bonus: u64,
    pub proration: ProrationPolicy,
    pub refunds: RefundPolicy,
}

impl ClubRules {
    pub fn from_config(config: &ClubConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            bootstrap_id: config.bootstrap_id()?,
            registration_bonus: config.registration_bonus,
            proration: config.proration_policy(),
            refunds: config.refund_policy(),
        })
    }
}

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct ClubAppState {
    pub store: Arc<dyn LedgerStore>,
    pub tokens: Arc<dyn TokenLedger>,
    pub clock: Arc<dyn Clock>,
    pub rules: ClubRules,
}

impl ClubAppState {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        tokens: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
        rules: ClubRules,
    ) -> Self {
        Self {
            store,
            tokens,
            clock,
            rules,
        }
    }

    /// Create handlers on demand from the shared state.
    pub fn initialize_club_handler(&self) -> InitializeClubHandler {
        InitializeClubHandler::new(self.store.clone(), self.rules.bootstrap_id.clone())
    }

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(
            self.store.clone(),
            self.tokens.clone(),
            self.rules.registration_bonus,
        )
    }

    pub fn set_level_handler(&self) -> SetLevelHandler {
        SetLevelHandler::new(self.store.clone())
    }

    pub fn update_level_price_handler(&self) -> UpdateLevelPriceHandler {
        UpdateLevelPriceHandler::new(self.store.clone())
    }

    pub fn enroll_handler(&self) -> EnrollHandler {
        EnrollHandler::new(self.store.clone(), self.tokens.clone(), self.clock.clone())
    }

    pub fn upgrade_handler(&self) -> UpgradeMembershipHandler {
        UpgradeMembershipHandler::new(
            self.store.clone(),
            self.tokens.clone(),
            self.clock.clone(),
            self.rules.proration,
        )
    }

    pub fn cancel_handler(&self) -> CancelMembershipHandler {
        CancelMembershipHandler::new(
            self.store.clone(),
            self.tokens.clone(),
            self.clock.clone(),
            self.rules.refunds,
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT/PATCH endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/club/init - Record the caller as club owner
pub async fn initialize_club(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .initialize_club_handler()
        .handle(InitializeClubCommand { caller })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(InitializeClubResponse {
            owner: result.owner.to_string(),
        }),
    ))
}

/// POST /api/users - Register the caller
pub async fn register_user(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
    Json(request): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .register_user_handler()
        .handle(RegisterUserCommand {
            caller,
            name: request.name,
            email: request.email,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            user: result.user.into(),
            bonus_minted: result.bonus_minted,
        }),
    ))
}

/// PUT /api/levels/:tier - Define a tier (admin)
pub async fn set_level(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
    Path(tier): Path<String>,
    Json(request): Json<SetLevelRequest>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .set_level_handler()
        .handle(SetLevelCommand {
            caller,
            tier,
            duration_months: request.duration_months,
            required_tokens: request.required_tokens,
        })
        .await?;

    Ok(Json(LevelResponse::new(result.tier, result.level)))
}

/// PATCH /api/levels/:tier/price - Reprice a tier (owner)
pub async fn update_level_price(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
    Path(tier): Path<String>,
    Json(request): Json<UpdateLevelPriceRequest>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .update_level_price_handler()
        .handle(UpdateLevelPriceCommand {
            caller,
            tier,
            required_tokens: request.required_tokens,
        })
        .await?;

    Ok(Json(LevelResponse::new(result.tier, result.level)))
}

/// POST /api/memberships - Enroll the caller
pub async fn enroll(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
    Json(request): Json<EnrollRequest>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .enroll_handler()
        .handle(EnrollCommand {
            caller,
            tier: request.tier,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollResponse {
            membership: result.membership.into(),
            completed_previous: result.completed_previous.map(|id| id.value()),
        }),
    ))
}

/// POST /api/memberships/upgrade - Upgrade the caller's membership
pub async fn upgrade(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
    Json(request): Json<UpgradeRequest>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .upgrade_handler()
        .handle(UpgradeMembershipCommand {
            caller,
            tier: request.tier,
            expected_tokens: request.expected_tokens,
        })
        .await?;

    Ok(Json(UpgradeResponse::new(result.membership, &result.quote)))
}

/// POST /api/memberships/cancel - Cancel the caller's membership
pub async fn cancel(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = state
        .cancel_handler()
        .handle(CancelMembershipCommand { caller })
        .await?;

    Ok(Json(CancelResponse::new(result.membership, result.refund)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/users - List every user
pub async fn list_users(
    State(state): State<ClubAppState>,
) -> Result<impl IntoResponse, ClubApiError> {
    let users = ListUsersHandler::new(state.store.clone())
        .handle(ListUsersQuery)
        .await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/users/:id - Get one user
pub async fn get_user(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ClubApiError> {
    let user_id = UserId::new(id).map_err(MembershipError::from)?;
    let user = GetUserHandler::new(state.store.clone())
        .handle(GetUserQuery { user_id })
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// GET /api/levels/:tier - Get one level
pub async fn get_level(
    State(state): State<ClubAppState>,
    Path(tier): Path<String>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = GetLevelHandler::new(state.store.clone())
        .handle(GetLevelQuery { tier })
        .await?;

    Ok(Json(LevelResponse::new(result.tier, result.level)))
}

/// GET /api/levels/:tier/members - Users currently holding a tier
pub async fn list_tier_members(
    State(state): State<ClubAppState>,
    Path(tier): Path<String>,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = ListUsersByTierHandler::new(state.store.clone())
        .handle(ListUsersByTierQuery { tier })
        .await?;

    Ok(Json(TierMembersResponse {
        tier: result.tier,
        users: result.users.iter().map(ToString::to_string).collect(),
    }))
}

/// GET /api/memberships - List every membership
pub async fn list_all_memberships(
    State(state): State<ClubAppState>,
) -> Result<impl IntoResponse, ClubApiError> {
    let memberships = ListAllMembershipsHandler::new(state.store.clone())
        .handle(ListAllMembershipsQuery)
        .await?;

    let response: Vec<MembershipResponse> =
        memberships.into_iter().map(MembershipResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/memberships/mine - The caller's membership history
pub async fn list_my_memberships(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
) -> Result<impl IntoResponse, ClubApiError> {
    let memberships = ListUserMembershipsHandler::new(state.store.clone())
        .handle(ListUserMembershipsQuery { user_id: caller.id })
        .await?;

    let response: Vec<MembershipResponse> =
        memberships.into_iter().map(MembershipResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/memberships/:id - Get one membership
pub async fn get_membership(
    State(state): State<ClubAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ClubApiError> {
    let id = MembershipId::from_str(&id).map_err(MembershipError::from)?;
    let membership = GetMembershipHandler::new(state.store.clone())
        .handle(GetMembershipQuery { id })
        .await?;

    Ok(Json(MembershipResponse::from(membership)))
}

/// GET /api/balance - The caller's token balance
pub async fn get_balance(
    State(state): State<ClubAppState>,
    RequireCaller(caller): RequireCaller,
) -> Result<impl IntoResponse, ClubApiError> {
    let result = GetBalanceHandler::new(state.store.clone(), state.tokens.clone())
        .handle(GetBalanceQuery { account: caller.id })
        .await?;

    Ok(Json(BalanceResponse {
        account: result.account.to_string(),
        balance: result.balance,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for consistent error responses.
#[derive(Debug)]
pub struct ClubApiError(pub MembershipError);

impl From<MembershipError> for ClubApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound | ErrorCode::NoMembership => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
        ErrorCode::AlreadyInitialized
        | ErrorCode::AlreadyRegistered
        | ErrorCode::MembershipInProgress
        | ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidTier
        | ErrorCode::TokenMismatch
        | ErrorCode::PriceUnchanged => StatusCode::BAD_REQUEST,
        ErrorCode::MembershipExpired
        | ErrorCode::GraceWindowTooClose
        | ErrorCode::DeGrade
        | ErrorCode::AlreadyAtLevel
        | ErrorCode::CancellationWindowClosed
        | ErrorCode::InvalidStateTransition => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InsufficientBalance => StatusCode::PAYMENT_REQUIRED,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ClubApiError {
    fn into_response(self) -> axum::response::Response {
        let code = self.0.code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorResponse::new(code.to_string(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipTier;

    fn status_of(err: MembershipError) -> StatusCode {
        ClubApiError(err).into_response().status()
    }

    #[test]
    fn lifecycle_errors_map_to_statuses() {
        let ivy = UserId::new("ivy").unwrap();
        assert_eq!(
            status_of(MembershipError::not_found("User", "ivy")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(MembershipError::unauthorized(&ivy, "set levels")),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(MembershipError::AlreadyRegistered(ivy)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(MembershipError::invalid_tier("Bronze")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MembershipError::DeGrade {
                tier: MembershipTier::Gold,
                elapsed_months: 4,
                tier_months: 3
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(MembershipError::InsufficientBalance {
                account: "ivy".to_string(),
                required: 2,
                available: 1
            }),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            status_of(MembershipError::NotInitialized),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(MembershipError::infrastructure("disk on fire")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rules_follow_club_config() {
        let config = ClubConfig {
            owner_bootstrap_id: Some("founder".to_string()),
            registration_bonus: 42,
            ..Default::default()
        };

        let rules = ClubRules::from_config(&config).unwrap();

        assert_eq!(rules.bootstrap_id, Some(UserId::new("founder").unwrap()));
        assert_eq!(rules.registration_bonus, 42);
        assert_eq!(rules.proration, ProrationPolicy::default());
    }
}
