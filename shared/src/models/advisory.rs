//! Advisory output models
//!
//! An advisory is a status code, a recommendation line, and the ordered list
//! of reasons that led to it, plus a snapshot of the numeric inputs that
//! drove the decision. Advisories are built once and never mutated.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Irrigation decision outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationStatus {
    NotRequired,
    Reduce,
    Increase,
    Normal,
}

/// Spray decision outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SprayStatus {
    NotRecommendedWind,
    NotRecommendedRain,
    Delay,
    Safe,
    Caution,
}

/// Irrigation advisory for the current conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationAdvisory {
    pub status: IrrigationStatus,
    pub recommendation: String,
    /// Ordered by rule evaluation, not importance
    pub reasons: Vec<String>,
    pub data: IrrigationData,
}

/// Numeric inputs behind an irrigation decision, rounded for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationData {
    pub rain_today_mm: Decimal,
    pub rain_forecast_24h_mm: Decimal,
    pub humidity_percent: i32,
    pub temperature_celsius: Decimal,
}

/// Spray advisory for the current conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprayAdvisory {
    pub status: SprayStatus,
    pub recommendation: String,
    /// Ordered by rule evaluation, not importance
    pub reasons: Vec<String>,
    /// Static description of the daily optimal spraying windows
    pub optimal_time: String,
    pub data: SprayData,
}

/// Numeric inputs behind a spray decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprayData {
    pub wind_speed_kmh: Decimal,
    pub humidity_percent: i32,
    pub rain_expected_12h: bool,
    pub current_time_optimal: bool,
}
