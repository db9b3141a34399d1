//! Onboarding questionnaire routes

use crate::error::ApiError;
use crate::services::OnboardingService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use macromasters_shared::types::{CompleteOnboardingResponse, OnboardingStateResponse};
use macromasters_shared::OnboardingData;
use uuid::Uuid;

pub fn onboarding_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/onboarding", get(get_state).patch(update_data))
        .route("/:id/onboarding/next", post(next_step))
        .route("/:id/onboarding/back", post(previous_step))
        .route("/:id/onboarding/complete", post(complete))
}

/// GET /api/v1/users/:id/onboarding
async fn get_state(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OnboardingStateResponse>, ApiError> {
    Ok(Json(OnboardingService::get_state(state.store(), user_id).await?))
}

/// PATCH /api/v1/users/:id/onboarding - Merge answers
async fn update_data(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(patch): Json<OnboardingData>,
) -> Result<Json<OnboardingStateResponse>, ApiError> {
    Ok(Json(
        OnboardingService::update_data(state.store(), user_id, patch).await?,
    ))
}

/// POST /api/v1/users/:id/onboarding/next
async fn next_step(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OnboardingStateResponse>, ApiError> {
    Ok(Json(OnboardingService::next_step(state.store(), user_id).await?))
}

/// POST /api/v1/users/:id/onboarding/back
async fn previous_step(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OnboardingStateResponse>, ApiError> {
    Ok(Json(
        OnboardingService::previous_step(state.store(), user_id).await?,
    ))
}

/// POST /api/v1/users/:id/onboarding/complete
async fn complete(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<CompleteOnboardingResponse>, ApiError> {
    Ok(Json(OnboardingService::complete(state.store(), user_id).await?))
}
