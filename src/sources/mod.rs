//! External data sources
//!
//! Weather and commute readings come from HTTP APIs polled on their own
//! cadences. Each source sits behind a trait so the sampling loop can be
//! tested against fakes. Fetches are synchronous with bounded timeouts; a
//! failed fetch is recoverable and leaves the cached reading in place.

mod meteo;
mod routing;

pub use meteo::OpenMeteoSource;
pub use routing::OrsRouteSource;

use crate::error::GaugeError;
use crate::types::WeatherReading;

/// Current conditions for a fixed coordinate
pub trait WeatherSource {
    fn fetch(&self) -> Result<WeatherReading, GaugeError>;
}

/// Estimated drive time for a fixed origin/destination pair, in minutes
pub trait RouteSource {
    fn fetch_minutes(&self) -> Result<f64, GaugeError>;
}
