//! Error handling for the Krishi Advisory Platform
//!
//! All handler errors are converted to a structured JSON error response.
//! Advisory computation itself never fails; errors originate at the
//! fetch/parse boundaries and the data collaborators.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // External service errors
    #[error("Weather API error: {0}")]
    WeatherApi(String),

    #[error("Malformed weather payload: {0}")]
    WeatherPayload(String),

    #[error("Classifier service error: {0}")]
    Classifier(String),

    // Local data source errors
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                },
            ),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: msg.clone(),
                },
            ),
            AppError::WeatherApi(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "WEATHER_API_ERROR".to_string(),
                    message: format!("Failed to fetch weather data: {}", msg),
                },
            ),
            AppError::WeatherPayload(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "WEATHER_PAYLOAD_ERROR".to_string(),
                    message: format!("Invalid data received from weather provider: {}", msg),
                },
            ),
            AppError::Classifier(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "CLASSIFIER_ERROR".to_string(),
                    message: format!("Classifier service error: {}", msg),
                },
            ),
            AppError::DataSourceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "DATA_SOURCE_UNAVAILABLE".to_string(),
                    message: format!("Data source unavailable: {}", msg),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                },
            ),
            AppError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message: "A database error occurred".to_string(),
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
