//! Rule-based irrigation and spray advisors
//!
//! Both advisors are pure functions over already-parsed weather data: no
//! I/O, no shared state, identical inputs give identical output. Rules are
//! evaluated in priority order and the first match decides the status;
//! later rules are never consulted.
//!
//! Missing optional provider fields are defaulted to zero before the data
//! reaches this module, so neither function has a failure path.

use chrono::{DateTime, Local, Timelike};
use rust_decimal::Decimal;

use crate::models::advisory::{
    IrrigationAdvisory, IrrigationData, IrrigationStatus, SprayAdvisory, SprayData, SprayStatus,
};
use crate::models::weather::{ForecastWindow, WeatherReading};

/// Rain at or above this amount (current or forecast) makes irrigation redundant, mm
const RAIN_SUFFICIENT_MM: i64 = 5;
/// Humidity at or above this keeps soil moist enough to cut irrigation back, %
const HUMIDITY_REDUCE_PCT: i32 = 75;
/// Temperature at or above this drives extra water loss, degrees C
const TEMP_INCREASE_C: i64 = 35;
/// Humidity below this accelerates evaporation, %
const HUMIDITY_DRY_PCT: i32 = 60;

/// Wind at or above this causes spray drift, km/h
const WIND_UNSAFE_KMH: i64 = 15;
/// Wind below this is safe for spraying, km/h
const WIND_SAFE_KMH: i64 = 10;
/// Humidity at or above this delays chemical absorption, %
const HUMIDITY_DELAY_PCT: i32 = 85;
/// Optimal humidity band for spraying, %
const HUMIDITY_SAFE_MIN_PCT: i32 = 50;
const HUMIDITY_SAFE_MAX_PCT: i32 = 80;

/// 3-hour buckets covering the next 24 hours
const BUCKETS_24H: usize = 8;
/// 3-hour buckets covering the next 12 hours
const BUCKETS_12H: usize = 4;

/// Daily windows with low wind and slow evaporation
pub const OPTIMAL_SPRAY_WINDOW: &str = "Early morning (6-10 AM) or Evening (4-7 PM)";

/// Decide whether irrigation is needed today.
///
/// Rule order: sufficient rain, high humidity, heat with dry air, normal.
pub fn irrigation_advisory(
    current: &WeatherReading,
    forecast: &ForecastWindow,
) -> IrrigationAdvisory {
    let rain_today = current.rainfall_1h_mm;
    let rain_forecast_24h = forecast.rain_total(BUCKETS_24H);

    let data = IrrigationData {
        rain_today_mm: rain_today.round_dp(1),
        rain_forecast_24h_mm: rain_forecast_24h.round_dp(1),
        humidity_percent: current.humidity_percent,
        temperature_celsius: current.temperature_celsius.round_dp(1),
    };

    let sufficient = Decimal::from(RAIN_SUFFICIENT_MM);
    if rain_today >= sufficient || rain_forecast_24h >= sufficient {
        let mut reasons = Vec::new();
        if rain_today >= sufficient {
            reasons.push(format!(
                "Current rainfall: {:.1} mm (sufficient moisture)",
                rain_today
            ));
        }
        if rain_forecast_24h >= sufficient {
            reasons.push(format!(
                "Expected rainfall: {:.1} mm in next 24 hours",
                rain_forecast_24h
            ));
        }
        return IrrigationAdvisory {
            status: IrrigationStatus::NotRequired,
            recommendation: "Do not irrigate today".to_string(),
            reasons,
            data,
        };
    }

    if current.humidity_percent >= HUMIDITY_REDUCE_PCT {
        return IrrigationAdvisory {
            status: IrrigationStatus::Reduce,
            recommendation: "Minimal irrigation recommended".to_string(),
            reasons: vec![
                format!(
                    "High humidity ({}%) reduces evaporation",
                    current.humidity_percent
                ),
                "Soil retains moisture longer in humid conditions".to_string(),
            ],
            data,
        };
    }

    if current.temperature_celsius >= Decimal::from(TEMP_INCREASE_C)
        && current.humidity_percent < HUMIDITY_DRY_PCT
    {
        return IrrigationAdvisory {
            status: IrrigationStatus::Increase,
            recommendation: "Extra irrigation required".to_string(),
            reasons: vec![
                format!(
                    "High temperature ({:.1}°C) increases water loss",
                    current.temperature_celsius
                ),
                format!(
                    "Low humidity ({}%) accelerates evaporation",
                    current.humidity_percent
                ),
            ],
            data,
        };
    }

    IrrigationAdvisory {
        status: IrrigationStatus::Normal,
        recommendation: "Regular irrigation recommended".to_string(),
        reasons: vec![
            "Normal weather conditions".to_string(),
            "Maintain regular irrigation schedule".to_string(),
        ],
        data,
    }
}

/// Decide whether conditions allow pesticide spraying right now.
///
/// Rule order: unsafe wind, incoming rain, very high humidity, safe band,
/// caution fallback. The time-of-day window is a secondary signal only.
pub fn spray_advisory(
    current: &WeatherReading,
    forecast: &ForecastWindow,
    now: DateTime<Local>,
) -> SprayAdvisory {
    let wind_kmh = current.wind_speed_mps * Decimal::new(36, 1);
    let rain_expected_12h = forecast.rain_expected(BUCKETS_12H);
    let hour = now.hour();
    let time_optimal = (6..=10).contains(&hour) || (16..=19).contains(&hour);

    let data = SprayData {
        wind_speed_kmh: wind_kmh.round_dp(1),
        humidity_percent: current.humidity_percent,
        rain_expected_12h,
        current_time_optimal: time_optimal,
    };

    if wind_kmh >= Decimal::from(WIND_UNSAFE_KMH) {
        return SprayAdvisory {
            status: SprayStatus::NotRecommendedWind,
            recommendation: "Do not spray - High wind conditions".to_string(),
            reasons: vec![
                format!("Wind speed: {:.1} km/h (causes spray drift)", wind_kmh),
                "Chemical drift can damage crops and waste pesticides".to_string(),
            ],
            optimal_time: OPTIMAL_SPRAY_WINDOW.to_string(),
            data,
        };
    }

    if rain_expected_12h {
        return SprayAdvisory {
            status: SprayStatus::NotRecommendedRain,
            recommendation: "Do not spray - Rain expected".to_string(),
            reasons: vec![
                "Rain expected within 12 hours".to_string(),
                "Rain will wash away chemicals, wasting money and resources".to_string(),
            ],
            optimal_time: OPTIMAL_SPRAY_WINDOW.to_string(),
            data,
        };
    }

    if current.humidity_percent >= HUMIDITY_DELAY_PCT {
        return SprayAdvisory {
            status: SprayStatus::Delay,
            recommendation: "Avoid spraying or wait for better conditions".to_string(),
            reasons: vec![
                format!("Very high humidity ({}%)", current.humidity_percent),
                "Reduces chemical absorption and increases fungal risk".to_string(),
            ],
            optimal_time: OPTIMAL_SPRAY_WINDOW.to_string(),
            data,
        };
    }

    if wind_kmh < Decimal::from(WIND_SAFE_KMH)
        && !rain_expected_12h
        && (HUMIDITY_SAFE_MIN_PCT..=HUMIDITY_SAFE_MAX_PCT).contains(&current.humidity_percent)
    {
        let mut reasons = vec![
            format!("Wind speed: {:.1} km/h (safe range)", wind_kmh),
            format!("Humidity: {}% (optimal range)", current.humidity_percent),
            "No rain forecast in next 12 hours".to_string(),
        ];
        reasons.push(if time_optimal {
            "Current time is optimal for spraying".to_string()
        } else {
            "Consider spraying during morning or evening for best results".to_string()
        });
        return SprayAdvisory {
            status: SprayStatus::Safe,
            recommendation: "Good conditions for spraying".to_string(),
            reasons,
            optimal_time: OPTIMAL_SPRAY_WINDOW.to_string(),
            data,
        };
    }

    let mut reasons = vec!["Conditions are acceptable but not optimal".to_string()];
    if wind_kmh >= Decimal::from(WIND_SAFE_KMH) {
        reasons.push(format!("Wind speed is moderate ({:.1} km/h)", wind_kmh));
    }
    if current.humidity_percent < HUMIDITY_SAFE_MIN_PCT {
        reasons.push(format!("Humidity is low ({}%)", current.humidity_percent));
    }

    SprayAdvisory {
        status: SprayStatus::Caution,
        recommendation: "Spraying possible but not ideal".to_string(),
        reasons,
        optimal_time: OPTIMAL_SPRAY_WINDOW.to_string(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::weather::ForecastBucket;
    use chrono::{TimeZone, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reading(temp: &str, humidity: i32, wind_mps: &str, rain_1h: &str) -> WeatherReading {
        WeatherReading {
            temperature_celsius: dec(temp),
            humidity_percent: humidity,
            wind_speed_mps: dec(wind_mps),
            rainfall_1h_mm: dec(rain_1h),
        }
    }

    fn forecast(rain_per_bucket: &[&str]) -> ForecastWindow {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        ForecastWindow::new(
            rain_per_bucket
                .iter()
                .enumerate()
                .map(|(i, r)| ForecastBucket {
                    timestamp: base + chrono::Duration::hours(3 * i as i64),
                    rain_3h_mm: dec(r),
                })
                .collect(),
        )
    }

    fn dry_forecast() -> ForecastWindow {
        forecast(&["0", "0", "0", "0", "0", "0", "0", "0"])
    }

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn humid_day_reduces_irrigation() {
        let advisory = irrigation_advisory(&reading("30", 80, "2", "0"), &dry_forecast());

        assert_eq!(advisory.status, IrrigationStatus::Reduce);
        assert_eq!(advisory.recommendation, "Minimal irrigation recommended");
        assert_eq!(advisory.reasons.len(), 2);
        assert_eq!(advisory.reasons[0], "High humidity (80%) reduces evaporation");
    }

    #[test]
    fn heavy_rain_today_skips_irrigation() {
        let advisory = irrigation_advisory(&reading("25", 40, "2", "6"), &dry_forecast());

        assert_eq!(advisory.status, IrrigationStatus::NotRequired);
        assert_eq!(advisory.recommendation, "Do not irrigate today");
        assert_eq!(
            advisory.reasons,
            vec!["Current rainfall: 6.0 mm (sufficient moisture)".to_string()]
        );
    }

    #[test]
    fn forecast_rain_alone_skips_irrigation() {
        let advisory = irrigation_advisory(
            &reading("25", 40, "2", "0"),
            &forecast(&["1", "2", "3", "0", "0", "0", "0", "0"]),
        );

        assert_eq!(advisory.status, IrrigationStatus::NotRequired);
        assert_eq!(
            advisory.reasons,
            vec!["Expected rainfall: 6.0 mm in next 24 hours".to_string()]
        );
    }

    #[test]
    fn rain_beyond_24h_window_is_ignored() {
        // 9th bucket carries the rain; only the first 8 count
        let advisory = irrigation_advisory(
            &reading("25", 40, "2", "0"),
            &forecast(&["0", "0", "0", "0", "0", "0", "0", "0", "20"]),
        );

        assert_eq!(advisory.status, IrrigationStatus::Normal);
    }

    #[test]
    fn short_forecast_sums_what_exists() {
        let advisory = irrigation_advisory(&reading("25", 40, "2", "0"), &forecast(&["3", "3"]));

        assert_eq!(advisory.status, IrrigationStatus::NotRequired);
        assert_eq!(advisory.data.rain_forecast_24h_mm, dec("6.0"));
    }

    #[test]
    fn rain_rule_wins_over_humidity_rule() {
        let advisory = irrigation_advisory(&reading("30", 90, "2", "8"), &dry_forecast());

        assert_eq!(advisory.status, IrrigationStatus::NotRequired);
    }

    #[test]
    fn hot_and_dry_increases_irrigation() {
        let advisory = irrigation_advisory(&reading("38.2", 40, "2", "0"), &dry_forecast());

        assert_eq!(advisory.status, IrrigationStatus::Increase);
        assert_eq!(advisory.recommendation, "Extra irrigation required");
        assert_eq!(
            advisory.reasons[0],
            "High temperature (38.2°C) increases water loss"
        );
        assert_eq!(advisory.reasons[1], "Low humidity (40%) accelerates evaporation");
    }

    #[test]
    fn hot_but_humid_stays_normal() {
        // Temperature rule needs both heat and dry air
        let advisory = irrigation_advisory(&reading("38", 65, "2", "0"), &dry_forecast());

        assert_eq!(advisory.status, IrrigationStatus::Normal);
        assert_eq!(advisory.recommendation, "Regular irrigation recommended");
    }

    #[test]
    fn high_wind_blocks_spraying() {
        // 5 m/s is 18 km/h
        let advisory = spray_advisory(&reading("30", 60, "5", "0"), &dry_forecast(), at_hour(8));

        assert_eq!(advisory.status, SprayStatus::NotRecommendedWind);
        assert_eq!(advisory.recommendation, "Do not spray - High wind conditions");
        assert_eq!(advisory.data.wind_speed_kmh, dec("18.0"));
        assert_eq!(
            advisory.reasons[0],
            "Wind speed: 18.0 km/h (causes spray drift)"
        );
    }

    #[test]
    fn incoming_rain_blocks_spraying() {
        let advisory = spray_advisory(
            &reading("30", 60, "1", "0"),
            &forecast(&["0", "0", "0.5", "0", "0", "0", "0", "0"]),
            at_hour(8),
        );

        assert_eq!(advisory.status, SprayStatus::NotRecommendedRain);
        assert!(advisory.data.rain_expected_12h);
    }

    #[test]
    fn rain_beyond_12h_window_does_not_block() {
        // Rain only in bucket 5, outside the 12-hour scan
        let advisory = spray_advisory(
            &reading("30", 60, "1", "0"),
            &forecast(&["0", "0", "0", "0", "4", "0", "0", "0"]),
            at_hour(8),
        );

        assert_ne!(advisory.status, SprayStatus::NotRecommendedRain);
    }

    #[test]
    fn very_high_humidity_delays_spraying() {
        let advisory = spray_advisory(&reading("30", 90, "2", "0"), &dry_forecast(), at_hour(8));

        assert_eq!(advisory.status, SprayStatus::Delay);
        assert_eq!(advisory.reasons[0], "Very high humidity (90%)");
    }

    #[test]
    fn calm_morning_is_safe_and_time_optimal() {
        // 2 m/s is 7.2 km/h
        let advisory = spray_advisory(&reading("30", 65, "2", "0"), &dry_forecast(), at_hour(8));

        assert_eq!(advisory.status, SprayStatus::Safe);
        assert_eq!(advisory.recommendation, "Good conditions for spraying");
        assert!(advisory.data.current_time_optimal);
        assert_eq!(advisory.data.wind_speed_kmh, dec("7.2"));
        assert_eq!(
            advisory.reasons.last().unwrap(),
            "Current time is optimal for spraying"
        );
    }

    #[test]
    fn safe_conditions_at_midday_suggest_better_timing() {
        let advisory = spray_advisory(&reading("30", 65, "2", "0"), &dry_forecast(), at_hour(13));

        assert_eq!(advisory.status, SprayStatus::Safe);
        assert!(!advisory.data.current_time_optimal);
        assert_eq!(
            advisory.reasons.last().unwrap(),
            "Consider spraying during morning or evening for best results"
        );
    }

    #[test]
    fn humidity_delay_wins_over_safe_band() {
        let safe = spray_advisory(&reading("30", 65, "2", "0"), &dry_forecast(), at_hour(8));
        let humid = spray_advisory(&reading("30", 90, "2", "0"), &dry_forecast(), at_hour(8));

        assert_eq!(safe.status, SprayStatus::Safe);
        assert_eq!(humid.status, SprayStatus::Delay);
    }

    #[test]
    fn moderate_wind_and_dry_air_fall_back_to_caution() {
        // 3.5 m/s is 12.6 km/h: below the unsafe cutoff, above the safe one
        let advisory = spray_advisory(&reading("30", 40, "3.5", "0"), &dry_forecast(), at_hour(8));

        assert_eq!(advisory.status, SprayStatus::Caution);
        assert_eq!(advisory.recommendation, "Spraying possible but not ideal");
        assert_eq!(
            advisory.reasons,
            vec![
                "Conditions are acceptable but not optimal".to_string(),
                "Wind speed is moderate (12.6 km/h)".to_string(),
                "Humidity is low (40%)".to_string(),
            ]
        );
    }

    #[test]
    fn advisories_are_idempotent() {
        let current = reading("31.4", 72, "2.8", "1.2");
        let window = forecast(&["0.3", "0", "1.1", "0", "0", "0.2", "0", "0"]);
        let now = at_hour(17);

        let irrigation_a = serde_json::to_string(&irrigation_advisory(&current, &window)).unwrap();
        let irrigation_b = serde_json::to_string(&irrigation_advisory(&current, &window)).unwrap();
        let spray_a = serde_json::to_string(&spray_advisory(&current, &window, now)).unwrap();
        let spray_b = serde_json::to_string(&spray_advisory(&current, &window, now)).unwrap();

        assert_eq!(irrigation_a, irrigation_b);
        assert_eq!(spray_a, spray_b);
    }

    #[test]
    fn spray_window_boundaries() {
        let current = reading("30", 65, "2", "0");
        let window = dry_forecast();

        for hour in [6, 10, 16, 19] {
            let advisory = spray_advisory(&current, &window, at_hour(hour));
            assert!(advisory.data.current_time_optimal, "hour {hour}");
        }
        for hour in [5, 11, 15, 20, 0] {
            let advisory = spray_advisory(&current, &window, at_hour(hour));
            assert!(!advisory.data.current_time_optimal, "hour {hour}");
        }
    }
}
