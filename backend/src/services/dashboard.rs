//! Dashboard service: per-city weather plus irrigation and spray advisories
//!
//! Fetches current conditions and the forecast in parallel (each with a
//! bounded timeout, no retry), then maps both through the pure advisory
//! engine. Recommendations are only meaningful for "now", so a failed fetch
//! fails the whole request.

use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::advisory;
use shared::models::advisory::{IrrigationAdvisory, SprayAdvisory};
use shared::models::weather::{CurrentConditions, WeatherReading};

use crate::error::{AppError, AppResult};
use crate::external::weather::{CurrentObservation, WeatherClient};

/// A supported city with its coordinates
#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Major cities in Madhya Pradesh
pub const CITIES: &[City] = &[
    City { name: "Bhopal", latitude: 23.2599, longitude: 77.4126 },
    City { name: "Indore", latitude: 22.7196, longitude: 75.8577 },
    City { name: "Jabalpur", latitude: 23.1815, longitude: 79.9864 },
    City { name: "Gwalior", latitude: 26.2183, longitude: 78.1828 },
    City { name: "Ujjain", latitude: 23.1765, longitude: 75.7885 },
    City { name: "Sagar", latitude: 23.8388, longitude: 78.7378 },
    City { name: "Dewas", latitude: 22.9676, longitude: 76.0534 },
    City { name: "Satna", latitude: 24.6005, longitude: 80.8322 },
    City { name: "Ratlam", latitude: 23.3315, longitude: 75.0367 },
    City { name: "Rewa", latitude: 24.5364, longitude: 81.2961 },
];

/// Look up a supported city by exact name
pub fn find_city(name: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.name == name)
}

/// Names of all supported cities
pub fn city_names() -> Vec<&'static str> {
    CITIES.iter().map(|c| c.name).collect()
}

/// Complete dashboard payload for a city
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub weather: CurrentConditions,
    pub irrigation_advisory: IrrigationAdvisory,
    pub spray_advisory: SprayAdvisory,
}

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    weather: WeatherClient,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(weather: WeatherClient) -> Self {
        Self { weather }
    }

    /// Fetch weather for a city and derive both advisories
    pub async fn dashboard_for_city(&self, city_name: &str) -> AppResult<DashboardData> {
        let city = find_city(city_name).ok_or_else(|| AppError::NotFound("City".to_string()))?;

        let (observation, forecast) = tokio::try_join!(
            self.weather.get_current(city.latitude, city.longitude),
            self.weather.get_forecast(city.latitude, city.longitude),
        )?;

        let reading = WeatherReading {
            temperature_celsius: observation.temperature_celsius,
            humidity_percent: observation.humidity_percent,
            wind_speed_mps: observation.wind_speed_mps,
            rainfall_1h_mm: observation.rainfall_1h_mm,
        };

        let irrigation_advisory = advisory::irrigation_advisory(&reading, &forecast);
        // Spray timing uses the server's local clock; all supported cities
        // share one time zone.
        let spray_advisory = advisory::spray_advisory(&reading, &forecast, Local::now());

        Ok(DashboardData {
            weather: to_current_conditions(city.name, observation),
            irrigation_advisory,
            spray_advisory,
        })
    }
}

/// Normalize a raw observation for presentation
fn to_current_conditions(city: &str, obs: CurrentObservation) -> CurrentConditions {
    CurrentConditions {
        city: city.to_string(),
        temperature_celsius: obs.temperature_celsius.round_dp(1),
        feels_like_celsius: obs.feels_like_celsius.round_dp(1),
        humidity_percent: obs.humidity_percent,
        pressure_hpa: obs.pressure_hpa,
        wind_speed_kmh: (obs.wind_speed_mps * Decimal::new(36, 1)).round_dp(1),
        wind_direction_deg: obs.wind_direction_deg,
        description: title_case(&obs.description),
        icon: obs.icon,
        visibility_km: (Decimal::from(obs.visibility_meters) / Decimal::from(1000)).round_dp(1),
        cloud_coverage_percent: obs.cloud_coverage_percent,
        rainfall_1h_mm: obs.rainfall_1h_mm,
        sunrise: obs.sunrise,
        sunset: obs.sunset,
    }
}

/// Capitalize each whitespace-separated word ("light rain" -> "Light Rain")
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
