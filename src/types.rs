//! Core types for the dialdeck loop
//!
//! This module defines the data that flows through one tick: the cached
//! external readings, the accumulated runtime state, and the frame of six
//! dial positions pushed to the hardware.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Neutral commute estimate held until the first successful route poll.
pub const NEUTRAL_COMMUTE_MINUTES: f64 = 18.0;

/// One current-conditions reading from the weather source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Air temperature (Fahrenheit)
    pub temperature_f: f64,
    /// WMO weather interpretation code
    pub weather_code: u16,
    /// Sustained wind speed (mph)
    pub wind_mph: f64,
}

impl Default for WeatherReading {
    /// Neutral placeholder until the first poll: mild overcast, calm air.
    fn default() -> Self {
        Self {
            temperature_f: 50.0,
            weather_code: 3,
            wind_mph: 0.0,
        }
    }
}

/// Display category for the weather dial, derived fresh each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCategory {
    Sunny,
    Cloudy,
    Rain,
    Thunder,
    Snow,
    Wind,
    Severe,
}

impl WeatherCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rain => "rain",
            WeatherCategory::Thunder => "thunder",
            WeatherCategory::Snow => "snow",
            WeatherCategory::Wind => "wind",
            WeatherCategory::Severe => "severe",
        }
    }
}

/// One complete frame of dial positions, each in 0-100
///
/// Frames are recomputed whole every tick from the current runtime state,
/// never patched field by field, and discarded once written to the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeFrame {
    pub weather: u8,
    pub temperature: u8,
    pub hydration: u8,
    pub posture: u8,
    pub event: u8,
    pub commute: u8,
}

impl GaugeFrame {
    /// The six values in wire order.
    pub fn values(&self) -> [u8; 6] {
        [
            self.weather,
            self.temperature,
            self.hydration,
            self.posture,
            self.event,
            self.commute,
        ]
    }
}

/// Mutable state owned by the sampling loop
///
/// Created once at startup with neutral defaults; nothing persists across
/// runs. Invariant: `0 <= standing_ms <= total_ms`.
#[derive(Debug, Clone)]
pub struct RuntimeState {
    /// Last time a hydration event was observed from the device
    pub last_hydration_at: DateTime<Local>,
    /// Last reported posture state
    pub standing: bool,
    /// Milliseconds spent standing since startup
    pub standing_ms: i64,
    /// Milliseconds elapsed since startup
    pub total_ms: i64,
    /// Timestamp of the previous accumulation step
    pub last_tick_at: DateTime<Local>,
    /// Cached weather reading (placeholder until the first poll succeeds)
    pub weather: WeatherReading,
    /// Cached commute estimate in minutes
    pub commute_minutes: f64,
    /// When the weather source was last polled (None = due now)
    pub last_weather_poll: Option<DateTime<Local>>,
    /// When the route source was last polled (None = due now)
    pub last_commute_poll: Option<DateTime<Local>>,
    /// When the status line was last logged (None = due now)
    pub last_report: Option<DateTime<Local>>,
    /// Fixed target the event dial counts down toward
    pub event_target: DateTime<Local>,
}

impl RuntimeState {
    /// Fresh state at `now` with all accumulators at their neutral defaults.
    pub fn new(now: DateTime<Local>, event_target: DateTime<Local>) -> Self {
        Self {
            last_hydration_at: now,
            standing: false,
            standing_ms: 0,
            total_ms: 0,
            last_tick_at: now,
            weather: WeatherReading::default(),
            commute_minutes: NEUTRAL_COMMUTE_MINUTES,
            last_weather_poll: None,
            last_commute_poll: None,
            last_report: None,
            event_target,
        }
    }

    /// Hours elapsed since the last hydration event.
    pub fn hydration_hours(&self, now: DateTime<Local>) -> f64 {
        (now - self.last_hydration_at).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Seconds remaining until the event target (negative once past).
    pub fn event_seconds_left(&self, now: DateTime<Local>) -> f64 {
        (self.event_target - now).num_milliseconds() as f64 / 1000.0
    }

    /// Standing share of elapsed time, in percent (0 until time accumulates).
    pub fn standing_pct(&self) -> f64 {
        if self.total_ms <= 0 {
            0.0
        } else {
            self.standing_ms as f64 / self.total_ms as f64 * 100.0
        }
    }
}
