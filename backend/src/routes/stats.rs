//! Gamification stats routes

use crate::error::ApiError;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use macromasters_shared::types::{AddBadgeRequest, AddBadgeResponse, AddXpRequest, StatsResponse};
use uuid::Uuid;

pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/stats", get(get_stats))
        .route("/:id/stats/xp", post(add_xp))
        .route("/:id/stats/streak", post(increment_streak))
        .route("/:id/stats/streak/reset", post(reset_streak))
        .route("/:id/stats/badges", post(add_badge))
}

async fn get_stats(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(StatsService::get_stats(state.store(), user_id).await?))
}

async fn add_xp(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AddXpRequest>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(
        StatsService::add_xp(state.store(), user_id, req.amount).await?,
    ))
}

async fn increment_streak(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(
        StatsService::increment_streak(state.store(), user_id).await?,
    ))
}

async fn reset_streak(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(StatsService::reset_streak(state.store(), user_id).await?))
}

async fn add_badge(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<AddBadgeRequest>,
) -> Result<Json<AddBadgeResponse>, ApiError> {
    Ok(Json(
        StatsService::add_badge(state.store(), user_id, &req.badge).await?,
    ))
}
