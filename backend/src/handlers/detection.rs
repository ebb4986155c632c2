//! HTTP handlers for leaf-disease detection

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{AppError, AppResult};
use crate::services::detection::{ClassListing, DetectionService, PredictionResult};
use crate::AppState;

/// Classify an uploaded leaf image (multipart field `image`)
pub async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<PredictionResult>> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {}", e)))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("failed to read image: {}", e)))?;
            image = Some(bytes.to_vec());
        }
    }

    let image = image.ok_or_else(|| AppError::Validation("No image provided".to_string()))?;
    if image.is_empty() {
        return Err(AppError::Validation("No image selected".to_string()));
    }

    let service = DetectionService::new(state.classifier.clone(), state.labels.clone());
    let result = service.predict(&image).await?;
    Ok(Json(result))
}

/// List all disease classes the classifier can report
pub async fn list_classes(State(state): State<AppState>) -> Json<ClassListing> {
    let service = DetectionService::new(state.classifier.clone(), state.labels.clone());
    Json(service.classes())
}
