//! Reading filters applied before binning.

use pressure_common::{BoundingBox, MapConfig, Reading};
use tracing::debug;

/// Keep readings whose value lies in `[min, max]`.
pub fn filter_outliers(readings: &[Reading], min: f64, max: f64) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| r.reading >= min && r.reading <= max)
        .copied()
        .collect()
}

/// Keep readings inside `bounds`.
pub fn filter_visible(readings: &[Reading], bounds: &BoundingBox) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| bounds.contains(r.longitude, r.latitude))
        .copied()
        .collect()
}

/// Readings that are well formed, within the valid pressure range and visible.
pub fn visible_readings(readings: &[Reading], bounds: &BoundingBox, config: &MapConfig) -> Vec<Reading> {
    let well_formed: Vec<Reading> = readings.iter().filter(|r| r.is_well_formed()).copied().collect();
    let in_range = filter_outliers(&well_formed, config.min_pressure, config.max_pressure);
    let visible = filter_visible(&in_range, bounds);

    debug!(
        total = readings.len(),
        malformed = readings.len() - well_formed.len(),
        outliers = well_formed.len() - in_range.len(),
        visible = visible.len(),
        "Filtered readings"
    );

    visible
}
