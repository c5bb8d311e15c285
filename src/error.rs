//! Error types for dialdeck

use thiserror::Error;

/// Errors that can occur while driving the display
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event target {value:?} (expected \"YYYY-MM-DD HH:MM\")")]
    EventTarget { value: String },

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("Device I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unusable payload from data source: {0}")]
    Fetch(String),
}
