//! Stateless calculator routes

use crate::error::ApiError;
use crate::services::CalculatorService;
use crate::state::AppState;
use axum::{
    extract::Query,
    routing::{get, post},
    Json, Router,
};
use macromasters_shared::types::{
    CalculateMacrosRequest, HeightConversionQuery, HeightConversionResponse, WeightConversionQuery,
    WeightConversionResponse,
};
use macromasters_shared::MacroCalculation;
use tracing::debug;

pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/macros", post(calculate_macros))
        .route("/height", get(convert_height))
        .route("/weight", get(convert_weight))
}

/// POST /api/v1/calculator/macros
async fn calculate_macros(
    Json(req): Json<CalculateMacrosRequest>,
) -> Result<Json<MacroCalculation>, ApiError> {
    let macros = CalculatorService::calculate(&req)?;
    debug!(daily_calories = macros.daily_calories, "Stateless macro calculation");
    Ok(Json(macros))
}

/// GET /api/v1/calculator/height?feet=5&inches=10 or ?cm=178
async fn convert_height(
    Query(query): Query<HeightConversionQuery>,
) -> Result<Json<HeightConversionResponse>, ApiError> {
    Ok(Json(CalculatorService::convert_height(&query)?))
}

/// GET /api/v1/calculator/weight?lbs=160 or ?kg=72.6
async fn convert_weight(
    Query(query): Query<WeightConversionQuery>,
) -> Result<Json<WeightConversionResponse>, ApiError> {
    Ok(Json(CalculatorService::convert_weight(&query)?))
}
