//! Axum router configuration for club endpoints.
//!
//! This module defines the route structure for the club API and wires each
//! route to its handler.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::{
    cancel, enroll, get_balance, get_level, get_membership, get_user, initialize_club,
    list_all_memberships, list_my_memberships, list_tier_members, list_users, register_user,
    set_level, update_level_price, upgrade, ClubAppState,
};

/// Create the club API router.
///
/// # Routes
///
/// ## Bootstrap
/// - `POST /club/init` - Record the caller as owner (once)
///
/// ## Users
/// - `POST /users` - Register the caller
/// - `GET /users` - List all users
/// - `GET /users/:id` - Get one user
///
/// ## Levels
/// - `PUT /levels/:tier` - Define a tier (admin)
/// - `GET /levels/:tier` - Get a tier
/// - `PATCH /levels/:tier/price` - Reprice a tier (owner)
/// - `GET /levels/:tier/members` - Users holding a tier
///
/// ## Memberships
/// - `POST /memberships` - Enroll
/// - `GET /memberships` - List all memberships
/// - `POST /memberships/upgrade` - Upgrade
/// - `POST /memberships/cancel` - Cancel
/// - `GET /memberships/mine` - The caller's history
/// - `GET /memberships/:id` - Get one membership
///
/// ## Tokens
/// - `GET /balance` - The caller's balance
pub fn club_routes() -> Router<ClubAppState> {
    Router::new()
        .route("/club/init", post(initialize_club))
        .route("/users", post(register_user).get(list_users))
        .route("/users/:id", get(get_user))
        .route("/levels/:tier", get(get_level).put(set_level))
        .route("/levels/:tier/price", patch(update_level_price))
        .route("/levels/:tier/members", get(list_tier_members))
        .route("/memberships", post(enroll).get(list_all_memberships))
        .route("/memberships/upgrade", post(upgrade))
        .route("/memberships/cancel", post(cancel))
        .route("/memberships/mine", get(list_my_memberships))
        .route("/memberships/:id", get(get_membership))
        .route("/balance", get(get_balance))
}
