//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use macromasters_shared::types::{ErrorDetail, ErrorResponse};
use macromasters_shared::validation::get_missing_fields_labels;
use macromasters_shared::ProfileError;
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {field}: {message}")]
    FieldValidation { field: String, message: String },

    #[error("Profile incomplete, missing: {}", .0.join(", "))]
    Incomplete(Vec<String>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::Incomplete(fields) => ApiError::Incomplete(fields),
            ProfileError::Validation { field, message } => {
                ApiError::FieldValidation { field, message }
            }
            ProfileError::InvalidMealsPerDay(_) => ApiError::FieldValidation {
                field: "meals_per_day".to_string(),
                message: err.to_string(),
            },
            ProfileError::NotFinished { .. } => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let mut details = None;

        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::FieldValidation { field: f, message } => {
                field = Some(f.clone());
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message.clone())
            }
            ApiError::Incomplete(fields) => {
                details = Some(serde_json::json!({
                    "missing_fields": fields,
                    "labels": get_missing_fields_labels(fields),
                }));
                (StatusCode::BAD_REQUEST, "PROFILE_INCOMPLETE", self.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                details,
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::Validation("Invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_status() {
        let error = ApiError::NotFound("User not found".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_profile_error_mapping() {
        let err: ApiError = ProfileError::Incomplete(vec!["goal".to_string()]).into();
        assert!(matches!(err, ApiError::Incomplete(ref f) if f == &["goal"]));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err: ApiError = ProfileError::InvalidMealsPerDay(9).into();
        assert!(matches!(err, ApiError::FieldValidation { ref field, .. } if field == "meals_per_day"));

        let err: ApiError = ProfileError::NotFinished { step: 2, total: 14 }.into();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal(anyhow::anyhow!("boom"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
