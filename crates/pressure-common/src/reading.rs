//! Sensor readings as delivered by the readings service.

use serde::{Deserialize, Serialize};

/// A single geotagged pressure reading.
///
/// Unknown fields in the service payload are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub latitude: f64,
    pub longitude: f64,
    /// Pressure in hPa.
    pub reading: f64,
    /// Epoch milliseconds.
    #[serde(alias = "daterecorded")]
    pub timestamp: i64,
}

impl Reading {
    pub fn new(latitude: f64, longitude: f64, reading: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            reading,
            timestamp,
        }
    }

    /// Whether the coordinate lies on the globe and the value is finite.
    pub fn is_well_formed(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.reading.is_finite()
    }
}
