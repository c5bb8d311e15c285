//! Gauge transfer functions
//!
//! One free function per dial (the weather dial lives in [`crate::weather`]),
//! each mapping a raw input to a 0-100 urgency score, plus whole-frame
//! assembly. Higher always means "needs more attention"; all six dials share
//! that polarity.

use chrono::{DateTime, Local};

use crate::curve::{clamp_score, piecewise_linear};
use crate::types::{GaugeFrame, RuntimeState};
use crate::weather;

/// Default value of the event curve's 10-hour anchor. The source value was
/// an undocumented guess, so it stays configurable (`EVENT_ANCHOR_10H`).
pub const DEFAULT_EVENT_ANCHOR_10H: f64 = 85.0;

const HYDRATION_ANCHORS: [(f64, f64); 5] =
    [(0.0, 95.0), (1.0, 70.0), (2.0, 52.0), (3.0, 25.0), (4.0, 5.0)];

const POSTURE_ANCHORS: [(f64, f64); 3] = [(0.0, 100.0), (25.0, 50.0), (40.0, 10.0)];

const COMMUTE_ANCHORS: [(f64, f64); 3] = [(12.0, 100.0), (18.0, 65.0), (45.0, 30.0)];

/// Event curve anchors over hours remaining, with the configurable 10-hour
/// point spliced in.
fn event_anchors(anchor_10h: f64) -> [(f64, f64); 5] {
    [(0.0, 30.0), (6.0, 70.0), (8.0, 80.0), (10.0, anchor_10h), (12.0, 90.0)]
}

/// Temperature discomfort: `100 - degrees_f`.
///
/// 100F and above pegs the dial at 0; 0F and below pegs it at 100.
pub fn temperature_score(temperature_f: f64) -> u8 {
    clamp_score(100.0 - temperature_f)
}

/// Hydration urgency from hours since the last drink.
///
/// The curve is front-loaded (fastest drop in the first hour) and bottoms
/// out at a hard floor of 5 from four hours on.
pub fn hydration_score(hours_since_drink: f64) -> u8 {
    if hours_since_drink >= 4.0 {
        return 5;
    }
    clamp_score(piecewise_linear(hours_since_drink, &HYDRATION_ANCHORS))
}

/// Posture urgency from accumulated standing vs. total time.
///
/// Before any time has accumulated the dial reads 100. The standing share
/// is clamped to 40% before interpolation; anything above that counts as
/// equally good. Low standing share means high urgency ("stand more").
pub fn posture_score(standing_ms: i64, total_ms: i64) -> u8 {
    if total_ms <= 0 {
        return 100;
    }
    let pct = (standing_ms as f64 / total_ms as f64 * 100.0).clamp(0.0, 40.0);
    clamp_score(piecewise_linear(pct, &POSTURE_ANCHORS))
}

/// Event urgency from seconds remaining until the target.
///
/// A past target settles at 30 rather than zero so the dial does not read
/// urgent about something already over; 12+ hours out caps at 90.
pub fn event_score(seconds_left: f64, anchor_10h: f64) -> u8 {
    let hours = seconds_left / 3600.0;
    if hours <= 0.0 {
        return 30;
    }
    if hours >= 12.0 {
        return 90;
    }
    clamp_score(piecewise_linear(hours, &event_anchors(anchor_10h)))
}

/// Commute urgency from the estimated drive time in minutes.
///
/// Estimates are clamped to the realistic 12-45 minute window for the route
/// before interpolation; 12 minutes is the no-traffic baseline.
pub fn commute_score(minutes: f64) -> u8 {
    let minutes = minutes.clamp(12.0, 45.0);
    clamp_score(piecewise_linear(minutes, &COMMUTE_ANCHORS))
}

/// Recompute all six dials from the current runtime state.
pub fn compute_frame(state: &RuntimeState, now: DateTime<Local>, event_anchor_10h: f64) -> GaugeFrame {
    GaugeFrame {
        weather: weather::weather_score(&state.weather),
        temperature: temperature_score(state.weather.temperature_f),
        hydration: hydration_score(state.hydration_hours(now)),
        posture: posture_score(state.standing_ms, state.total_ms),
        event: event_score(state.event_seconds_left(now), event_anchor_10h),
        commute: commute_score(state.commute_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeatherReading;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_temperature_extremes_clamp() {
        assert_eq!(temperature_score(72.0), 28);
        assert_eq!(temperature_score(150.0), 0);
        assert_eq!(temperature_score(-20.0), 100);
    }

    #[test]
    fn test_hydration_curve_points() {
        assert_eq!(hydration_score(0.0), 95);
        assert_eq!(hydration_score(1.0), 70);
        assert_eq!(hydration_score(2.0), 52);
        assert_eq!(hydration_score(4.0), 5);
    }

    #[test]
    fn test_hydration_floor_holds_past_four_hours() {
        assert_eq!(hydration_score(10.0), 5);
        assert_eq!(hydration_score(100.0), 5);
    }

    #[test]
    fn test_posture_no_elapsed_time_is_neutral() {
        assert_eq!(posture_score(0, 0), 100);
        assert_eq!(posture_score(0, -5), 100);
    }

    #[test]
    fn test_posture_share_extremes() {
        // 100% standing clamps to the 40% anchor
        assert_eq!(posture_score(1_000_000, 1_000_000), 10);
        assert_eq!(posture_score(0, 1_000_000), 100);
        assert_eq!(posture_score(250_000, 1_000_000), 50);
    }

    #[test]
    fn test_event_past_target_settles() {
        assert_eq!(event_score(-100.0, DEFAULT_EVENT_ANCHOR_10H), 30);
        assert_eq!(event_score(0.0, DEFAULT_EVENT_ANCHOR_10H), 30);
    }

    #[test]
    fn test_event_curve_points_and_cap() {
        assert_eq!(event_score(6.0 * 3600.0, DEFAULT_EVENT_ANCHOR_10H), 70);
        assert_eq!(event_score(20.0 * 3600.0, DEFAULT_EVENT_ANCHOR_10H), 90);
        // between the 6h and 8h anchors
        assert_eq!(event_score(7.0 * 3600.0, DEFAULT_EVENT_ANCHOR_10H), 75);
    }

    #[test]
    fn test_event_anchor_is_configurable() {
        assert_eq!(event_score(10.0 * 3600.0, 85.0), 85);
        assert_eq!(event_score(10.0 * 3600.0, 60.0), 60);
    }

    #[test]
    fn test_commute_domain_clamp() {
        assert_eq!(commute_score(5.0), 100);
        assert_eq!(commute_score(18.0), 65);
        assert_eq!(commute_score(100.0), 30);
    }

    #[test]
    fn test_full_frame_from_state() {
        let now = Local.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap();
        let mut state = RuntimeState::new(now, now + chrono::Duration::hours(7));
        state.weather = WeatherReading {
            temperature_f: 72.0,
            weather_code: 1,
            wind_mph: 5.0,
        };
        state.last_hydration_at = now - chrono::Duration::hours(1);
        state.standing_ms = 500_000;
        state.total_ms = 1_000_000;
        state.commute_minutes = 20.0;

        let frame = compute_frame(&state, now, DEFAULT_EVENT_ANCHOR_10H);

        assert_eq!(
            frame,
            GaugeFrame {
                weather: 75,
                temperature: 28,
                hydration: 70,
                // 50% standing share clamps to the 40% anchor
                posture: 10,
                // 7h out, interpolated between the 6h and 8h anchors
                event: 75,
                // 20 minutes on the 18->45 segment
                commute: 62,
            }
        );
    }
}
