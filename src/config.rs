//! Environment configuration
//!
//! All settings come from the environment, optionally seeded from a .env
//! file: serial device path, home/destination coordinates, routing
//! credential, and the event target. Only the serial port is required (and
//! only when a real device is in play); everything else has a workable
//! default.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use std::env;
use std::path::Path;

use crate::error::GaugeError;
use crate::gauges::DEFAULT_EVENT_ANCHOR_10H;

const EVENT_TARGET_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Hour of the default event target ("today at 22:00 local").
const DEFAULT_EVENT_HOUR: u32 = 22;

/// Runtime configuration loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Serial device path (`SERIAL_PORT`)
    pub serial_port: Option<String>,
    /// Home coordinate as (lat, lon) (`HOME_LAT`/`HOME_LON`)
    pub home: (f64, f64),
    /// Destination coordinate as (lat, lon) (`DEST_LAT`/`DEST_LON`)
    pub destination: (f64, f64),
    /// Routing credential (`ORS_API_KEY`); commute polling is skipped without it
    pub ors_api_key: Option<String>,
    /// Raw event target string (`EVENT_TARGET`), resolved at startup
    pub event_target: Option<String>,
    /// Event curve 10-hour anchor (`EVENT_ANCHOR_10H`)
    pub event_anchor_10h: f64,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, GaugeError> {
        Ok(Self {
            serial_port: non_empty(env::var("SERIAL_PORT").ok()),
            home: (float_var("HOME_LAT", 0.0)?, float_var("HOME_LON", 0.0)?),
            destination: (float_var("DEST_LAT", 0.0)?, float_var("DEST_LON", 0.0)?),
            ors_api_key: non_empty(env::var("ORS_API_KEY").ok()),
            event_target: non_empty(env::var("EVENT_TARGET").ok()),
            event_anchor_10h: float_var("EVENT_ANCHOR_10H", DEFAULT_EVENT_ANCHOR_10H)?,
        })
    }
}

/// Load a .env file if one exists; an explicit path wins over the default
/// lookup. Missing files are not an error.
pub fn load_dotenv(path: Option<&Path>) {
    match path {
        Some(path) => {
            dotenvy::from_path(path).ok();
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
}

/// Resolve the event target: an explicit `"YYYY-MM-DD HH:MM"` in local
/// time, or today at 22:00 local when unset.
pub fn event_target_time(
    raw: Option<&str>,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, GaugeError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(target) => {
            let naive = NaiveDateTime::parse_from_str(target, EVENT_TARGET_FORMAT).map_err(|_| {
                GaugeError::EventTarget {
                    value: target.to_string(),
                }
            })?;
            Local
                .from_local_datetime(&naive)
                .earliest()
                .ok_or_else(|| GaugeError::EventTarget {
                    value: target.to_string(),
                })
        }
        None => now
            .with_hour(DEFAULT_EVENT_HOUR)
            .and_then(|t| t.with_minute(0))
            .and_then(|t| t.with_second(0))
            .and_then(|t| t.with_nanosecond(0))
            .ok_or_else(|| GaugeError::Config("could not resolve default event target".to_string())),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn float_var(key: &str, default: f64) -> Result<f64, GaugeError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse().map_err(|_| {
            GaugeError::Config(format!("{key} is not a number: {raw:?}"))
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn morning() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 11, 8, 30, 15).unwrap()
    }

    #[test]
    fn test_explicit_event_target_parses_local() {
        let target = event_target_time(Some("2024-03-11 18:45"), morning()).unwrap();
        assert_eq!(
            target,
            Local.with_ymd_and_hms(2024, 3, 11, 18, 45, 0).unwrap()
        );
    }

    #[test]
    fn test_unset_event_target_defaults_to_ten_pm_today() {
        for raw in [None, Some(""), Some("   ")] {
            let target = event_target_time(raw, morning()).unwrap();
            assert_eq!(
                target,
                Local.with_ymd_and_hms(2024, 3, 11, 22, 0, 0).unwrap()
            );
        }
    }

    #[test]
    fn test_malformed_event_target_is_rejected() {
        let result = event_target_time(Some("tonight at 10"), morning());
        assert!(matches!(result, Err(GaugeError::EventTarget { .. })));
    }

    #[test]
    fn test_non_empty_trims_and_filters() {
        assert_eq!(non_empty(Some("  /dev/ttyACM0 ".to_string())), Some("/dev/ttyACM0".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }
}
