//! HTTP adapters - REST API implementations.
//!
//! The club API is mounted under `/api`, behind caller resolution,
//! request tracing and a request timeout.

pub mod club;
pub mod middleware;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::ports::IdentityResolver;

// Re-export key types for convenience
pub use club::{club_routes, ClubApiError, ClubAppState, ClubRules};
pub use middleware::{auth_middleware, RequireCaller};

/// Build the full application router.
pub fn api_router(
    state: ClubAppState,
    resolver: Arc<dyn IdentityResolver>,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .nest("/api", club_routes())
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(
            resolver,
            auth_middleware,
        ))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
