//! dialdeck - host-side driver for a six-dial daily-pressure display
//!
//! The crate samples external signals (weather, commute time) and device
//! events (hydration button, posture sensor), reduces each to a bounded
//! 0-100 urgency score through deterministic transfer curves, and streams
//! the six-value frame to the display hardware over a serial link.
//!
//! ## Modules
//!
//! - **curve**: clamped piecewise-linear mapping primitives
//! - **weather** / **gauges**: the six transfer functions
//! - **sampler**: the fixed-cadence loop that owns all runtime state
//! - **sources** / **transport**: HTTP polling and the device line protocol

pub mod clock;
pub mod config;
pub mod curve;
pub mod error;
pub mod gauges;
pub mod sampler;
pub mod sources;
pub mod transport;
pub mod types;
pub mod weather;

pub use error::GaugeError;
pub use sampler::Sampler;
pub use types::{GaugeFrame, RuntimeState, WeatherCategory, WeatherReading};
