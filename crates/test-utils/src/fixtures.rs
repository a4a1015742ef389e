//! Common test fixtures for pressure-map tests.
//!
//! Pre-defined viewports and reading sets for common scenarios.

use pressure_common::{BoundingBox, Reading, Viewport};

/// Common bounding box definitions for testing.
pub mod bbox {
    use pressure_common::BoundingBox;

    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: BoundingBox = BoundingBox {
        min_lon: -180.0,
        min_lat: -90.0,
        max_lon: 180.0,
        max_lat: 90.0,
    };

    /// Continental United States
    pub const CONUS: BoundingBox = BoundingBox {
        min_lon: -130.0,
        min_lat: 20.0,
        max_lon: -60.0,
        max_lat: 55.0,
    };

    /// New York metro area
    pub const NEW_YORK: BoundingBox = BoundingBox {
        min_lon: -75.0,
        min_lat: 39.5,
        max_lon: -73.0,
        max_lat: 41.5,
    };

    /// Open ocean with no sensors in any fixture
    pub const SOUTH_ATLANTIC: BoundingBox = BoundingBox {
        min_lon: -30.0,
        min_lat: -40.0,
        max_lon: -10.0,
        max_lat: -20.0,
    };
}

/// Viewport over `bounds` at `zoom`.
pub fn viewport(bounds: BoundingBox, zoom: i32) -> Viewport {
    Viewport::new(bounds, zoom)
}

/// Fixed timestamp used by fixtures (2024-01-15T12:00:00Z).
pub const FIXTURE_TIMESTAMP_MS: i64 = 1_705_320_000_000;

/// A handful of readings around New York City, all within [`bbox::NEW_YORK`].
pub fn new_york_readings() -> Vec<Reading> {
    [
        (40.0, -74.0, 1010.0),
        (40.01, -74.01, 1012.0),
        (40.71, -74.01, 1013.5),
        (40.73, -73.99, 1013.0),
        (40.65, -73.95, 1011.2),
        (40.85, -73.87, 1009.8),
        (41.03, -73.76, 1008.4),
        (40.22, -74.76, 1014.1),
    ]
    .iter()
    .enumerate()
    .map(|(i, &(lat, lon, value))| {
        Reading::new(lat, lon, value, FIXTURE_TIMESTAMP_MS + i as i64 * 60_000)
    })
    .collect()
}

/// Readings that every default filter should discard.
pub fn outlier_readings() -> Vec<Reading> {
    vec![
        Reading::new(40.5, -74.0, -5.0, FIXTURE_TIMESTAMP_MS),
        Reading::new(40.5, -74.0, 1600.0, FIXTURE_TIMESTAMP_MS),
        Reading::new(40.5, -74.0, f64::NAN, FIXTURE_TIMESTAMP_MS),
    ]
}
