//! Weather observation models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current conditions reduced to the fields the advisors evaluate
///
/// Optional provider fields (rainfall) are defaulted to zero at the parsing
/// boundary, so a reading is always fully populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub wind_speed_mps: Decimal,
    /// Rainfall over the last hour; zero when the provider omits it
    pub rainfall_1h_mm: Decimal,
}

/// One 3-hour forecast bucket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastBucket {
    pub timestamp: DateTime<Utc>,
    /// Accumulated rainfall over the bucket; zero when the provider omits it
    pub rain_3h_mm: Decimal,
}

/// Chronological sequence of 3-hour forecast buckets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastWindow {
    pub buckets: Vec<ForecastBucket>,
}

impl ForecastWindow {
    pub fn new(buckets: Vec<ForecastBucket>) -> Self {
        Self { buckets }
    }

    /// Total rainfall over the first `buckets` entries.
    ///
    /// A window shorter than requested sums whatever exists; missing buckets
    /// contribute nothing.
    pub fn rain_total(&self, buckets: usize) -> Decimal {
        self.buckets
            .iter()
            .take(buckets)
            .map(|b| b.rain_3h_mm)
            .sum()
    }

    /// Whether any of the first `buckets` entries carries measurable rain
    pub fn rain_expected(&self, buckets: usize) -> bool {
        self.buckets
            .iter()
            .take(buckets)
            .any(|b| b.rain_3h_mm > Decimal::ZERO)
    }
}

/// Normalized current conditions for the dashboard response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_celsius: Decimal,
    pub feels_like_celsius: Decimal,
    pub humidity_percent: i32,
    pub pressure_hpa: i32,
    pub wind_speed_kmh: Decimal,
    pub wind_direction_deg: i32,
    pub description: String,
    pub icon: String,
    pub visibility_km: Decimal,
    pub cloud_coverage_percent: i32,
    pub rainfall_1h_mm: Decimal,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}
