//! Completed profile and plan routes

use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use macromasters_shared::types::{ProfileResponse, UpdateProfileRequest};
use macromasters_shared::MacroCalculation;
use uuid::Uuid;

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/profile", get(get_profile).put(update_profile))
        .route("/:id/macros", get(get_macros))
}

/// GET /api/v1/users/:id/profile
async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(ProfileService::get_profile(state.store(), user_id).await?))
}

/// PUT /api/v1/users/:id/profile - Edit and recalculate
async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    Ok(Json(
        ProfileService::update_profile(state.store(), user_id, req).await?,
    ))
}

/// GET /api/v1/users/:id/macros
async fn get_macros(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MacroCalculation>, ApiError> {
    Ok(Json(ProfileService::get_macros(state.store(), user_id).await?))
}
