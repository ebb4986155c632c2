//! HTTP handlers for the weather advisory dashboard

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::error::AppResult;
use crate::services::dashboard::{city_names, DashboardData, DashboardService};
use crate::AppState;

/// Supported cities response
#[derive(Debug, Serialize)]
pub struct CityListResponse {
    pub cities: Vec<&'static str>,
}

/// List the cities the dashboard supports
pub async fn list_cities() -> Json<CityListResponse> {
    Json(CityListResponse {
        cities: city_names(),
    })
}

/// Full dashboard for a city: normalized weather plus both advisories
pub async fn get_dashboard(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> AppResult<Json<DashboardData>> {
    let service = DashboardService::new(state.weather.clone());
    let data = service.dashboard_for_city(&city).await?;
    Ok(Json(data))
}
