//! HTTP handlers for the disease knowledge base

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::services::disease::{Crop, DiseaseGuideEntry, DiseaseService};
use crate::AppState;

/// Disease guide response
#[derive(Debug, Serialize)]
pub struct DiseaseGuideResponse {
    pub count: usize,
    pub data: Vec<DiseaseGuideEntry>,
}

/// Crop list response
#[derive(Debug, Serialize)]
pub struct CropListResponse {
    pub count: usize,
    pub data: Vec<Crop>,
}

/// All diseases joined with crop and treatment details
pub async fn list_disease_guide(
    State(state): State<AppState>,
) -> AppResult<Json<DiseaseGuideResponse>> {
    let service = DiseaseService::new(state.db.clone());
    let data = service.list_disease_guide().await?;
    Ok(Json(DiseaseGuideResponse {
        count: data.len(),
        data,
    }))
}

/// All crops
pub async fn list_crops(State(state): State<AppState>) -> AppResult<Json<CropListResponse>> {
    let service = DiseaseService::new(state.db.clone());
    let data = service.list_crops().await?;
    Ok(Json(CropListResponse {
        count: data.len(),
        data,
    }))
}
