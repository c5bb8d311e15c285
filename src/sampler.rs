//! Sampling and state-accumulation loop
//!
//! One tick = accumulate elapsed time, drain device events, refresh any
//! poll whose cadence has elapsed, recompute all six dials, push the frame
//! to the device, and (once a second) log a status line. `run` drives ticks
//! off the injected clock until the process is killed.
//!
//! The loop is single-threaded: polls are blocking calls with bounded
//! timeouts, so a poll tick can stall for a few seconds. Gauge state moves
//! slowly relative to that, so the stall is accepted rather than managed.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::time::Duration;

use crate::clock::Clock;
use crate::error::GaugeError;
use crate::gauges;
use crate::sources::{RouteSource, WeatherSource};
use crate::transport::{DeviceEvent, DeviceLink};
use crate::types::{GaugeFrame, RuntimeState};
use crate::weather;

/// Fixed tick cadence.
pub const TICK_INTERVAL: Duration = Duration::from_millis(200);

/// Device boot settle time before the first write.
pub const BOOT_GRACE: Duration = Duration::from_secs(2);

/// Weather poll cadence (ms). Failed polls also wait this long to retry.
pub const WEATHER_POLL_MS: i64 = 300_000;

/// Commute poll cadence (ms).
pub const COMMUTE_POLL_MS: i64 = 120_000;

/// Status line cadence (ms).
pub const REPORT_MS: i64 = 1_000;

/// The sampling loop. Owns all mutable runtime state; nothing else
/// touches it.
pub struct Sampler {
    state: RuntimeState,
    event_anchor_10h: f64,
}

impl Sampler {
    pub fn new(
        now: DateTime<Local>,
        event_target: DateTime<Local>,
        event_anchor_10h: f64,
    ) -> Self {
        Self {
            state: RuntimeState::new(now, event_target),
            event_anchor_10h,
        }
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    /// One pass of the loop at time `now`. Step order is fixed: accumulate,
    /// drain, poll weather, poll commute, score, transmit, report. Later
    /// steps always see the values earlier steps produced this tick.
    pub fn tick(
        &mut self,
        now: DateTime<Local>,
        link: &mut dyn DeviceLink,
        weather_source: &dyn WeatherSource,
        route_source: Option<&dyn RouteSource>,
    ) -> Result<GaugeFrame, GaugeError> {
        self.accumulate(now);
        self.drain(now, link);
        self.poll_weather(now, weather_source);
        self.poll_commute(now, route_source);

        let frame = gauges::compute_frame(&self.state, now, self.event_anchor_10h);
        link.send_frame(&frame)?;

        self.report(now, &frame);
        Ok(frame)
    }

    /// Drive the loop off the given clock until the process is killed.
    /// Waits out the device boot grace period before the first tick.
    pub fn run(
        &mut self,
        clock: &dyn Clock,
        link: &mut dyn DeviceLink,
        weather_source: &dyn WeatherSource,
        route_source: Option<&dyn RouteSource>,
    ) -> Result<(), GaugeError> {
        std::thread::sleep(BOOT_GRACE);
        self.state.last_tick_at = clock.now();

        loop {
            let now = clock.now();
            self.tick(now, link, weather_source, route_source)?;
            std::thread::sleep(TICK_INTERVAL);
        }
    }

    /// Add elapsed wall-clock time to the posture accumulators. A backward
    /// clock jump counts as zero elapsed time, never negative.
    fn accumulate(&mut self, now: DateTime<Local>) {
        let delta_ms = (now - self.state.last_tick_at).num_milliseconds().max(0);
        if delta_ms > 0 {
            self.state.total_ms += delta_ms;
            if self.state.standing {
                self.state.standing_ms += delta_ms;
            }
        }
        self.state.last_tick_at = now;
    }

    /// Apply whatever events the device has already sent.
    fn drain(&mut self, now: DateTime<Local>, link: &mut dyn DeviceLink) {
        for event in link.drain_events() {
            match event {
                DeviceEvent::Hydration => {
                    self.state.last_hydration_at = now;
                    info!("water reset");
                }
                DeviceEvent::Posture { standing } => {
                    self.state.standing = standing;
                    info!("stand state = {}", if standing { "STAND" } else { "SIT" });
                }
            }
        }
    }

    fn poll_weather(&mut self, now: DateTime<Local>, source: &dyn WeatherSource) {
        if !due(self.state.last_weather_poll, now, WEATHER_POLL_MS) {
            return;
        }
        match source.fetch() {
            Ok(reading) => {
                debug!(
                    "weather poll: {:.0}F code {} wind {:.0}mph",
                    reading.temperature_f, reading.weather_code, reading.wind_mph
                );
                self.state.weather = reading;
            }
            // keep the cached reading; the next attempt waits a full interval
            Err(err) => warn!("weather poll failed: {err}"),
        }
        self.state.last_weather_poll = Some(now);
    }

    fn poll_commute(&mut self, now: DateTime<Local>, source: Option<&dyn RouteSource>) {
        let Some(source) = source else {
            return;
        };
        if !due(self.state.last_commute_poll, now, COMMUTE_POLL_MS) {
            return;
        }
        match source.fetch_minutes() {
            Ok(minutes) => {
                debug!("route poll: {minutes:.1} minutes");
                self.state.commute_minutes = minutes;
            }
            Err(err) => warn!("route poll failed: {err}"),
        }
        self.state.last_commute_poll = Some(now);
    }

    /// Log the once-a-second human-readable status line.
    fn report(&mut self, now: DateTime<Local>, frame: &GaugeFrame) {
        if !due(self.state.last_report, now, REPORT_MS) {
            return;
        }
        let category = weather::classify(self.state.weather.weather_code, self.state.weather.wind_mph);
        let water_hours = self.state.hydration_hours(now).min(4.0);
        let seconds_left = self.state.event_seconds_left(now);

        info!(
            "WX {} -> {} | TEMP {:.0}F -> {} | WATER {:.2}h -> {} | STAND {:.1}% -> {} | EVENT {} -> {} | COMMUTE {:.0}m -> {}",
            category.as_str(),
            frame.weather,
            self.state.weather.temperature_f,
            frame.temperature,
            water_hours,
            frame.hydration,
            self.state.standing_pct(),
            frame.posture,
            event_short(seconds_left),
            frame.event,
            self.state.commute_minutes,
            frame.commute,
        );
        self.state.last_report = Some(now);
    }
}

fn due(last: Option<DateTime<Local>>, now: DateTime<Local>, interval_ms: i64) -> bool {
    match last {
        None => true,
        Some(at) => (now - at).num_milliseconds() >= interval_ms,
    }
}

/// Compact countdown rendering for the status line: `NOW` once past,
/// whole minutes under an hour, one-decimal hours beyond.
fn event_short(seconds_left: f64) -> String {
    if seconds_left <= 0.0 {
        return "NOW".to_string();
    }
    let minutes = seconds_left / 60.0;
    if minutes < 60.0 {
        format!("{}m", minutes.round() as i64)
    } else {
        format!("{:.1}h", minutes / 60.0)
    }
}
