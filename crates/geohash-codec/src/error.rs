//! Error types for geohash operations.

use thiserror::Error;

/// Result type alias using GeohashError.
pub type GeohashResult<T> = Result<T, GeohashError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeohashError {
    #[error("Invalid geohash precision: {0} (expected 1-12)")]
    InvalidPrecision(usize),

    #[error("Invalid geohash '{hash}': {reason}")]
    InvalidHash { hash: String, reason: String },

    #[error("Invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },
}
