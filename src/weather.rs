//! Weather classification
//!
//! Maps a WMO weather interpretation code plus wind speed to a display
//! category, then to a dial tick. Classification runs in two passes: a base
//! code-set match, then an ordered list of override rules evaluated
//! top-to-bottom. Later rules win, so the severe override (last) beats the
//! wind override when both fire.

use crate::curve::clamp_score;
use crate::types::{WeatherCategory, WeatherReading};

const THUNDER_CODES: &[u16] = &[95, 96, 99];
const SNOW_CODES: &[u16] = &[71, 73, 75, 77, 85, 86];
const RAIN_CODES: &[u16] = &[51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 80, 81, 82];
const CLOUD_CODES: &[u16] = &[1, 2, 3, 45, 48];

/// The two most-severe thunderstorm codes (thunderstorm with hail).
const SEVERE_CODES: &[u16] = &[96, 99];

/// Wind speed at or above which the wind override fires.
const WIND_OVERRIDE_MPH: f64 = 20.0;

/// One post-classification override rule. Each rule sees the category
/// produced so far and may replace it.
struct OverrideRule {
    name: &'static str,
    apply: fn(code: u16, wind_mph: f64, current: WeatherCategory) -> Option<WeatherCategory>,
}

fn wind_override(_code: u16, wind_mph: f64, current: WeatherCategory) -> Option<WeatherCategory> {
    if wind_mph >= WIND_OVERRIDE_MPH && current != WeatherCategory::Thunder {
        Some(WeatherCategory::Wind)
    } else {
        None
    }
}

fn severe_override(code: u16, _wind_mph: f64, _current: WeatherCategory) -> Option<WeatherCategory> {
    if SEVERE_CODES.contains(&code) {
        Some(WeatherCategory::Severe)
    } else {
        None
    }
}

/// Override order is load-bearing: severe is evaluated after wind so it
/// always wins when both conditions hold.
const OVERRIDES: &[OverrideRule] = &[
    OverrideRule {
        name: "wind",
        apply: wind_override,
    },
    OverrideRule {
        name: "severe",
        apply: severe_override,
    },
];

/// Classify a weather code and wind speed into a display category.
pub fn classify(code: u16, wind_mph: f64) -> WeatherCategory {
    let mut category = base_category(code);
    for rule in OVERRIDES {
        if let Some(next) = (rule.apply)(code, wind_mph, category) {
            log::debug!("weather override '{}': {} -> {}", rule.name, category.as_str(), next.as_str());
            category = next;
        }
    }
    category
}

/// Base classification by code set, first match wins. Unrecognized codes
/// fall back to cloudy.
fn base_category(code: u16) -> WeatherCategory {
    if THUNDER_CODES.contains(&code) {
        WeatherCategory::Thunder
    } else if SNOW_CODES.contains(&code) {
        WeatherCategory::Snow
    } else if RAIN_CODES.contains(&code) {
        WeatherCategory::Rain
    } else if code == 0 {
        WeatherCategory::Sunny
    } else if CLOUD_CODES.contains(&code) {
        WeatherCategory::Cloudy
    } else {
        log::debug!("unrecognized weather code {code}, treating as cloudy");
        WeatherCategory::Cloudy
    }
}

/// Dial tick for a category.
pub fn category_score(category: WeatherCategory) -> u8 {
    let tick = match category {
        WeatherCategory::Sunny => 95.0,
        WeatherCategory::Cloudy => 75.0,
        WeatherCategory::Rain => 57.0,
        WeatherCategory::Thunder => 45.0,
        WeatherCategory::Snow => 30.0,
        WeatherCategory::Wind => 20.0,
        WeatherCategory::Severe => 10.0,
    };
    clamp_score(tick)
}

/// Score a full cached reading: classify, then look up the tick.
pub fn weather_score(reading: &WeatherReading) -> u8 {
    category_score(classify(reading.weather_code, reading.wind_mph))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_sky_is_sunny() {
        assert_eq!(classify(0, 5.0), WeatherCategory::Sunny);
        assert_eq!(category_score(WeatherCategory::Sunny), 95);
    }

    #[test]
    fn test_code_sets() {
        assert_eq!(classify(95, 0.0), WeatherCategory::Thunder);
        assert_eq!(classify(73, 0.0), WeatherCategory::Snow);
        assert_eq!(classify(61, 0.0), WeatherCategory::Rain);
        assert_eq!(classify(45, 0.0), WeatherCategory::Cloudy);
    }

    #[test]
    fn test_unrecognized_code_defaults_to_cloudy() {
        assert_eq!(classify(42, 0.0), WeatherCategory::Cloudy);
        assert_eq!(category_score(WeatherCategory::Cloudy), 75);
    }

    #[test]
    fn test_wind_override_fires_on_cloudy() {
        assert_eq!(classify(3, 25.0), WeatherCategory::Wind);
        assert_eq!(category_score(WeatherCategory::Wind), 20);
    }

    #[test]
    fn test_wind_override_spares_thunder() {
        assert_eq!(classify(95, 25.0), WeatherCategory::Thunder);
    }

    #[test]
    fn test_severe_beats_thunder_classification() {
        assert_eq!(classify(96, 5.0), WeatherCategory::Severe);
        assert_eq!(category_score(WeatherCategory::Severe), 10);
    }

    #[test]
    fn test_severe_beats_wind_when_both_hold() {
        // 99 is thunder, so the wind override skips it; severe still lands
        assert_eq!(classify(99, 30.0), WeatherCategory::Severe);
    }

    #[test]
    fn test_reading_score_end_to_end() {
        let reading = WeatherReading {
            temperature_f: 72.0,
            weather_code: 1,
            wind_mph: 5.0,
        };
        assert_eq!(weather_score(&reading), 75);
    }
}
