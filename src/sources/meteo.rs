//! Open-Meteo weather source
//!
//! Fetches current temperature, WMO weather code, and wind speed for one
//! coordinate, already converted to Fahrenheit and mph by the API.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::WeatherSource;
use crate::error::GaugeError;
use crate::types::WeatherReading;

const ENDPOINT: &str = "https://api.open-meteo.com/v1/forecast";
const TIMEOUT: Duration = Duration::from_secs(6);

pub struct OpenMeteoSource {
    client: Client,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoSource {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GaugeError> {
        let client = Client::builder().timeout(TIMEOUT).build()?;
        Ok(Self {
            client,
            latitude,
            longitude,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: u16,
    wind_speed_10m: f64,
}

impl WeatherSource for OpenMeteoSource {
    fn fetch(&self) -> Result<WeatherReading, GaugeError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("latitude", self.latitude.to_string()),
                ("longitude", self.longitude.to_string()),
                (
                    "current",
                    "temperature_2m,weather_code,wind_speed_10m".to_string(),
                ),
                ("temperature_unit", "fahrenheit".to_string()),
                ("wind_speed_unit", "mph".to_string()),
            ])
            .send()?
            .error_for_status()?;

        let body: ForecastResponse = response.json()?;
        Ok(WeatherReading {
            temperature_f: body.current.temperature_2m,
            weather_code: body.current.weather_code,
            wind_mph: body.current.wind_speed_10m,
        })
    }
}
