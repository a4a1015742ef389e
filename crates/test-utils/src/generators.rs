//! Synthetic reading generators.
//!
//! Generators are seeded so the same arguments always produce the same
//! readings, which keeps binning output stable across test runs.

use pressure_common::{BoundingBox, Reading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fixtures::FIXTURE_TIMESTAMP_MS;

/// Uniformly scattered readings inside `bounds`.
///
/// Values follow a smooth north-south pressure gradient (higher to the south)
/// plus up to ±2 hPa of noise, centered on 1013 hPa.
pub fn scattered_readings(bounds: &BoundingBox, count: usize, seed: u64) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mid_lat = (bounds.min_lat + bounds.max_lat) / 2.0;

    (0..count)
        .map(|i| {
            let lat = rng.gen_range(bounds.min_lat..=bounds.max_lat);
            let lon = rng.gen_range(bounds.min_lon..=bounds.max_lon);
            let noise: f64 = rng.gen_range(-2.0..=2.0);
            let value = 1013.0 - (lat - mid_lat) * 1.5 + noise;
            Reading::new(lat, lon, value, FIXTURE_TIMESTAMP_MS + i as i64 * 1000)
        })
        .collect()
}

/// Readings clustered tightly around a single point.
///
/// Useful for checking that one cluster does not spread across empty space.
pub fn clustered_readings(lat: f64, lon: f64, count: usize, value: f64, seed: u64) -> Vec<Reading> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let dlat: f64 = rng.gen_range(-0.001..=0.001);
            let dlon: f64 = rng.gen_range(-0.001..=0.001);
            Reading::new(lat + dlat, lon + dlon, value, FIXTURE_TIMESTAMP_MS + i as i64)
        })
        .collect()
}

/// Readings on a regular lattice with every value equal to `value`.
pub fn uniform_lattice(bounds: &BoundingBox, rows: usize, cols: usize, value: f64) -> Vec<Reading> {
    let mut readings = Vec::with_capacity(rows * cols);
    let lat_step = bounds.height() / rows.max(1) as f64;
    let lon_step = bounds.width() / cols.max(1) as f64;

    for row in 0..rows {
        for col in 0..cols {
            let lat = bounds.min_lat + (row as f64 + 0.5) * lat_step;
            let lon = bounds.min_lon + (col as f64 + 0.5) * lon_step;
            readings.push(Reading::new(lat, lon, value, FIXTURE_TIMESTAMP_MS));
        }
    }
    readings
}
