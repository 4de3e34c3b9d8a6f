//! HTTP adapter for club endpoints.
//!
//! Exposes the membership lifecycle engine via REST API under `/api`.
//! See [`routes::club_routes`] for the route table.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{status_for, ClubApiError, ClubAppState, ClubRules};
pub use routes::club_routes;
