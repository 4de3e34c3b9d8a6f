//! Caller resolution middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that resolves Bearer tokens and injects the caller into extensions
//! - `RequireCaller` - Extractor that requires a resolved caller
//!
//! # Architecture
//!
//! The middleware uses the `IdentityResolver` port, keeping it provider-agnostic.
//!
//! ```text
//! Request → auth_middleware → injects Caller into extensions
//!                                      ↓
//!                              Handler → RequireCaller extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::club::ErrorResponse;
use crate::domain::foundation::{AuthError, Caller};
use crate::ports::IdentityResolver;

/// Auth middleware state - wraps the identity resolver.
pub type AuthState = Arc<dyn IdentityResolver>;

/// Middleware that resolves Bearer tokens into callers.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Resolves it using the `IdentityResolver` port
/// 3. On success, injects the `Caller` into request extensions
/// 4. On missing token, continues without injecting (public reads)
/// 5. On an unknown token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(resolver): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return next.run(request).await;
    };

    match resolver.resolve(token).await {
        Ok(caller) => {
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => {
            let status = match &e {
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Identity service unavailable: {}", msg);
                    StatusCode::SERVICE_UNAVAILABLE
                }
            };
            (status, Json(ErrorResponse::new("AUTH_ERROR", e.to_string()))).into_response()
        }
    }
}

/// Extractor that requires a resolved caller.
///
/// If the auth middleware did not inject a caller, returns 401 Unauthorized.
#[derive(Debug, Clone)]
pub struct RequireCaller(pub Caller);

impl<S> axum::extract::FromRequestParts<S> for RequireCaller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Caller>()
                .cloned()
                .map(RequireCaller)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for missing callers.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid bearer token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    "UNAUTHENTICATED",
                    "Authentication required",
                )),
            )
                .into_response(),
        }
    }
}
