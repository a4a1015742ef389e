//! Error types for pressure-map components.

use geohash_codec::GeohashError;
use thiserror::Error;

/// Result type alias using MapError.
pub type MapResult<T> = Result<T, MapError>;

/// Primary error type for binning, rendering and data loading.
#[derive(Debug, Error)]
pub enum MapError {
    // === Geohash Errors ===
    #[error("Invalid geohash precision: {0}")]
    InvalidPrecision(usize),

    #[error("Invalid geohash: {0}")]
    InvalidHash(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    // === Statistics Errors ===
    #[error("Cannot compute {0} of an empty sequence")]
    EmptyInput(&'static str),

    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    // === Data Source Errors ===
    #[error("Failed to fetch readings: {0}")]
    Transport(String),

    #[error("Failed to decode readings: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl MapError {
    /// Whether the error came from loading data rather than from computing on it.
    ///
    /// Load failures leave the previous render in place.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            MapError::Transport(_) | MapError::Decode(_) | MapError::Io(_)
        )
    }
}

impl From<GeohashError> for MapError {
    fn from(err: GeohashError) -> Self {
        match err {
            GeohashError::InvalidPrecision(p) => MapError::InvalidPrecision(p),
            GeohashError::InvalidHash { .. } => MapError::InvalidHash(err.to_string()),
            GeohashError::InvalidCoordinate { .. } => MapError::InvalidCoordinate(err.to_string()),
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        MapError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Decode(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for MapError {
    fn from(err: serde_yaml::Error) -> Self {
        MapError::InvalidConfig(format!("YAML error: {}", err))
    }
}
