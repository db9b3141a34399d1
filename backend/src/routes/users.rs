//! User API routes
//!
//! Every per-user resource hangs off `/users/:id`; the onboarding, profile
//! and stats routers are merged in here.

use super::{onboarding, profile, stats};
use crate::error::ApiError;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use macromasters_shared::types::UserResponse;
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/:id", get(get_user).delete(delete_user))
        .merge(onboarding::onboarding_routes())
        .merge(profile::profile_routes())
        .merge(stats::stats_routes())
}

/// POST /api/v1/users - Start a new user at the first onboarding step
async fn create_user(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = UserService::create(state.store()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    Ok(Json(UserService::get(state.store(), user_id).await?))
}

/// DELETE /api/v1/users/:id - Reset: drop the profile, plan and stats
async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    UserService::delete(state.store(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
