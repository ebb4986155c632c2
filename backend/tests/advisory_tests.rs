use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::advisory::{self, OPTIMAL_SPRAY_WINDOW};
use shared::models::advisory::{IrrigationStatus, SprayStatus};
use shared::models::weather::{ForecastBucket, ForecastWindow, WeatherReading};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn reading(temp: Decimal, humidity: i32, wind_mps: Decimal, rain_mm: Decimal) -> WeatherReading {
    WeatherReading {
        temperature_celsius: temp,
        humidity_percent: humidity,
        wind_speed_mps: wind_mps,
        rainfall_1h_mm: rain_mm,
    }
}

fn window(rain_per_bucket: &[Decimal]) -> ForecastWindow {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    ForecastWindow {
        buckets: rain_per_bucket
            .iter()
            .enumerate()
            .map(|(i, r)| ForecastBucket {
                timestamp: start + Duration::hours(3 * i as i64),
                rain_3h_mm: *r,
            })
            .collect(),
    }
}

fn noon() -> chrono::DateTime<chrono::Local> {
    chrono::Local.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap()
}

// Strategy for a plausible temperature in tenths of a degree
fn temperature() -> impl Strategy<Value = Decimal> {
    (100i64..=450).prop_map(|n| Decimal::new(n, 1))
}

fn wind_mps() -> impl Strategy<Value = Decimal> {
    (0i64..=300).prop_map(|n| Decimal::new(n, 1))
}

fn rain_mm() -> impl Strategy<Value = Decimal> {
    (0i64..=200).prop_map(|n| Decimal::new(n, 1))
}

fn bucket_rain() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((0i64..=100).prop_map(|n| Decimal::new(n, 1)), 0..=10)
}

proptest! {
    #[test]
    fn heavy_rain_always_suspends_irrigation(
        temp in temperature(),
        humidity in 0i32..=100,
        wind in wind_mps(),
        rain in (50i64..=200).prop_map(|n| Decimal::new(n, 1)),
        buckets in bucket_rain(),
    ) {
        let current = reading(temp, humidity, wind, rain);
        let advisory = advisory::irrigation_advisory(&current, &window(&buckets));
        prop_assert_eq!(advisory.status, IrrigationStatus::NotRequired);
    }

    #[test]
    fn high_humidity_reduces_when_rain_is_light(
        temp in temperature(),
        humidity in 75i32..=100,
        wind in wind_mps(),
        rain in (0i64..=49).prop_map(|n| Decimal::new(n, 1)),
    ) {
        // Forecast dry as well, so neither rain rule can fire first
        let current = reading(temp, humidity, wind, rain);
        let advisory = advisory::irrigation_advisory(&current, &window(&[]));
        prop_assert_eq!(advisory.status, IrrigationStatus::Reduce);
    }

    #[test]
    fn hot_and_dry_increases_irrigation(
        temp in (351i64..=450).prop_map(|n| Decimal::new(n, 1)),
        humidity in 0i32..=59,
        wind in wind_mps(),
    ) {
        let current = reading(temp, humidity, wind, Decimal::ZERO);
        let advisory = advisory::irrigation_advisory(&current, &window(&[]));
        prop_assert_eq!(advisory.status, IrrigationStatus::Increase);
    }

    #[test]
    fn rain_rule_outranks_humidity_rule(
        temp in temperature(),
        humidity in 75i32..=100,
        wind in wind_mps(),
        rain in (50i64..=200).prop_map(|n| Decimal::new(n, 1)),
    ) {
        let current = reading(temp, humidity, wind, rain);
        let advisory = advisory::irrigation_advisory(&current, &window(&[]));
        prop_assert_eq!(advisory.status, IrrigationStatus::NotRequired);
    }

    #[test]
    fn strong_wind_always_blocks_spraying(
        temp in temperature(),
        humidity in 0i32..=100,
        wind in (42i64..=300).prop_map(|n| Decimal::new(n, 1)),
        rain in rain_mm(),
        buckets in bucket_rain(),
    ) {
        // 4.2 m/s is 15.12 km/h, past the drift threshold
        let current = reading(temp, humidity, wind, rain);
        let advisory = advisory::spray_advisory(&current, &window(&buckets), noon());
        prop_assert_eq!(advisory.status, SprayStatus::NotRecommendedWind);
    }

    #[test]
    fn wind_status_matches_threshold(
        temp in temperature(),
        humidity in 0i32..=100,
        wind in wind_mps(),
        rain in rain_mm(),
        buckets in bucket_rain(),
    ) {
        let current = reading(temp, humidity, wind, rain);
        let advisory = advisory::spray_advisory(&current, &window(&buckets), noon());
        let kmh = wind * dec("3.6");
        if advisory.status == SprayStatus::NotRecommendedWind {
            prop_assert!(kmh >= Decimal::from(15));
        } else {
            prop_assert!(kmh < Decimal::from(15));
        }
    }

    #[test]
    fn humid_calm_dry_conditions_delay_spraying(
        temp in temperature(),
        humidity in 85i32..=100,
        wind in (0i64..=20).prop_map(|n| Decimal::new(n, 1)),
    ) {
        let current = reading(temp, humidity, wind, Decimal::ZERO);
        let advisory = advisory::spray_advisory(&current, &window(&[]), noon());
        prop_assert_eq!(advisory.status, SprayStatus::Delay);
    }

    #[test]
    fn advisories_are_deterministic(
        temp in temperature(),
        humidity in 0i32..=100,
        wind in wind_mps(),
        rain in rain_mm(),
        buckets in bucket_rain(),
    ) {
        let current = reading(temp, humidity, wind, rain);
        let forecast = window(&buckets);
        let a = advisory::irrigation_advisory(&current, &forecast);
        let b = advisory::irrigation_advisory(&current, &forecast);
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());

        let c = advisory::spray_advisory(&current, &forecast, noon());
        let d = advisory::spray_advisory(&current, &forecast, noon());
        prop_assert_eq!(serde_json::to_string(&c).unwrap(), serde_json::to_string(&d).unwrap());
    }

    #[test]
    fn spray_advisory_always_names_the_window(
        temp in temperature(),
        humidity in 0i32..=100,
        wind in wind_mps(),
        rain in rain_mm(),
        buckets in bucket_rain(),
    ) {
        let current = reading(temp, humidity, wind, rain);
        let advisory = advisory::spray_advisory(&current, &window(&buckets), noon());
        prop_assert_eq!(advisory.optimal_time.as_str(), OPTIMAL_SPRAY_WINDOW);
        prop_assert!(!advisory.recommendation.is_empty());
        prop_assert!(!advisory.reasons.is_empty());
    }
}

#[test]
fn normal_conditions_keep_regular_schedule() {
    let current = reading(dec("28.0"), 55, dec("2.0"), Decimal::ZERO);
    let advisory = advisory::irrigation_advisory(&current, &window(&[]));
    assert_eq!(advisory.status, IrrigationStatus::Normal);
    assert_eq!(advisory.recommendation, "Regular irrigation recommended");
}

#[test]
fn forecast_rain_beyond_24h_is_ignored() {
    // Eight dry buckets, heavy rain only in the ninth
    let mut buckets = vec![Decimal::ZERO; 8];
    buckets.push(dec("40.0"));
    let current = reading(dec("28.0"), 55, dec("2.0"), Decimal::ZERO);
    let advisory = advisory::irrigation_advisory(&current, &window(&buckets));
    assert_eq!(advisory.status, IrrigationStatus::Normal);
    assert_eq!(advisory.data.rain_forecast_24h_mm, Decimal::ZERO.round_dp(1));
}
