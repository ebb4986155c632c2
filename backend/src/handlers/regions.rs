//! HTTP handlers for priority-region lookups

use axum::{extract::State, Json};
use serde::Serialize;
use shared::models::region::{DropdownOptions, RegionRecord};

use crate::services::regions::RegionFilter;
use crate::AppState;

/// Region search response
#[derive(Debug, Serialize)]
pub struct RegionSearchResponse {
    pub items: Vec<RegionRecord>,
    pub count: usize,
}

/// Options for the region-search dropdowns
pub async fn get_region_options(State(state): State<AppState>) -> Json<DropdownOptions> {
    Json(state.regions.options())
}

/// Search the region sheet by dropdown selections
pub async fn search_regions(
    State(state): State<AppState>,
    Json(filter): Json<RegionFilter>,
) -> Json<RegionSearchResponse> {
    let items = state.regions.search(&filter);
    Json(RegionSearchResponse {
        count: items.len(),
        items,
    })
}
