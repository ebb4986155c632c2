//! Route definitions for the Krishi Advisory Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather advisory dashboard
        .route("/cities", get(handlers::list_cities))
        .route("/dashboard/:city", get(handlers::get_dashboard))
        // Leaf-disease detection
        .route("/predict", post(handlers::predict))
        .route("/classes", get(handlers::list_classes))
        // Disease knowledge base
        .route("/explore", get(handlers::list_disease_guide))
        .route("/crops", get(handlers::list_crops))
        // Priority-region lookups
        .route("/options", get(handlers::get_region_options))
        .route("/search", post(handlers::search_regions))
}
