//! Weather API client for fetching current conditions and forecasts
//!
//! Integrates with OpenWeatherMap. Optional provider fields (rainfall,
//! visibility, wind direction) are defaulted here at the parsing boundary so
//! the advisory engine only ever sees fully populated readings; missing
//! required fields are a payload error.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::weather::{ForecastBucket, ForecastWindow};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Parsed current conditions, units as delivered by the provider
#[derive(Debug, Clone)]
pub struct CurrentObservation {
    pub temperature_celsius: Decimal,
    pub feels_like_celsius: Decimal,
    pub humidity_percent: i32,
    pub pressure_hpa: i32,
    pub wind_speed_mps: Decimal,
    pub wind_direction_deg: i32,
    pub cloud_coverage_percent: i32,
    pub visibility_meters: i32,
    pub description: String,
    pub icon: String,
    pub rainfall_1h_mm: Decimal,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// OpenWeatherMap current conditions document
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmDescriptor>,
    main: OwmMain,
    wind: OwmWind,
    clouds: OwmClouds,
    visibility: Option<i32>,
    rain: Option<OwmRain>,
    sys: OwmSys,
}

#[derive(Debug, Deserialize)]
struct OwmDescriptor {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    pressure: i32,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    deg: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: i32,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    sunrise: i64,
    sunset: i64,
}

/// OpenWeatherMap forecast document (3-hour entries)
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastEntry {
    dt: i64,
    rain: Option<OwmForecastRain>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastRain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current(&self, latitude: f64, longitude: f64) -> AppResult<CurrentObservation> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let data: OwmCurrentResponse = self.fetch(&url).await?;
        parse_current(data)
    }

    /// Fetch the 3-hour forecast series by GPS coordinates
    pub async fn get_forecast(&self, latitude: f64, longitude: f64) -> AppResult<ForecastWindow> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let data: OwmForecastResponse = self.fetch(&url).await?;
        Ok(parse_forecast(data))
    }

    async fn fetch<T: serde::de::DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!("{} - {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WeatherPayload(e.to_string()))
    }
}

fn parse_current(data: OwmCurrentResponse) -> AppResult<CurrentObservation> {
    let descriptor = data
        .weather
        .first()
        .ok_or_else(|| AppError::WeatherPayload("empty weather descriptor list".to_string()))?;

    Ok(CurrentObservation {
        temperature_celsius: Decimal::from_f64_retain(data.main.temp).unwrap_or_default(),
        feels_like_celsius: Decimal::from_f64_retain(data.main.feels_like).unwrap_or_default(),
        humidity_percent: data.main.humidity,
        pressure_hpa: data.main.pressure,
        wind_speed_mps: Decimal::from_f64_retain(data.wind.speed).unwrap_or_default(),
        wind_direction_deg: data.wind.deg.unwrap_or(0),
        cloud_coverage_percent: data.clouds.all,
        visibility_meters: data.visibility.unwrap_or(0),
        description: descriptor.description.clone(),
        icon: descriptor.icon.clone(),
        rainfall_1h_mm: data
            .rain
            .and_then(|r| r.one_hour)
            .map(|v| Decimal::from_f64_retain(v).unwrap_or_default())
            .unwrap_or(Decimal::ZERO),
        sunrise: DateTime::from_timestamp(data.sys.sunrise, 0).unwrap_or_else(Utc::now),
        sunset: DateTime::from_timestamp(data.sys.sunset, 0).unwrap_or_else(Utc::now),
    })
}

fn parse_forecast(data: OwmForecastResponse) -> ForecastWindow {
    ForecastWindow::new(
        data.list
            .into_iter()
            .map(|entry| ForecastBucket {
                timestamp: DateTime::from_timestamp(entry.dt, 0).unwrap_or_else(Utc::now),
                rain_3h_mm: entry
                    .rain
                    .and_then(|r| r.three_hour)
                    .map(|v| Decimal::from_f64_retain(v).unwrap_or_default())
                    .unwrap_or(Decimal::ZERO),
            })
            .collect(),
    )
}
