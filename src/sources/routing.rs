//! OpenRouteService commute source
//!
//! Posts a two-point driving-car directions request and reads the summary
//! duration back as minutes. The credential passes through verbatim in the
//! Authorization header.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::RouteSource;
use crate::error::GaugeError;

const ENDPOINT: &str = "https://api.openrouteservice.org/v2/directions/driving-car";
const TIMEOUT: Duration = Duration::from_secs(8);

pub struct OrsRouteSource {
    client: Client,
    api_key: String,
    /// (latitude, longitude)
    origin: (f64, f64),
    destination: (f64, f64),
}

impl OrsRouteSource {
    pub fn new(
        api_key: String,
        origin: (f64, f64),
        destination: (f64, f64),
    ) -> Result<Self, GaugeError> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            origin,
            destination,
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Summary,
}

#[derive(Debug, Deserialize)]
struct Summary {
    /// Drive duration in seconds
    duration: f64,
}

impl RouteSource for OrsRouteSource {
    fn fetch_minutes(&self) -> Result<f64, GaugeError> {
        // ORS wants lon-first coordinate pairs
        let body = serde_json::json!({
            "coordinates": [
                [self.origin.1, self.origin.0],
                [self.destination.1, self.destination.0],
            ]
        });

        let response = self
            .client
            .post(ENDPOINT)
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json")
            .json(&body)
            .send()?
            .error_for_status()?;

        let parsed: DirectionsResponse = response.json()?;
        let seconds = parsed
            .features
            .first()
            .map(|feature| feature.properties.summary.duration)
            .ok_or_else(|| GaugeError::Fetch("route response had no features".to_string()))?;

        Ok(seconds / 60.0)
    }
}
