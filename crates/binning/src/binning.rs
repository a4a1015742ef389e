//! Grouping readings into geohash cells.

use std::collections::BTreeMap;

use geohash_codec::encode;
use pressure_common::{MapResult, Reading};
use tracing::debug;

use crate::types::{Cell, CellMap};

/// Group readings by geohash prefix of `key_length` characters.
///
/// Geohash prefixes nest, so encoding directly at `key_length` gives the same
/// key as truncating a longer hash. Each cell's average is the median of its
/// readings, which keeps a single bad sensor from dragging the cell.
pub fn bin_readings(readings: &[Reading], key_length: usize) -> MapResult<CellMap> {
    let mut groups: BTreeMap<String, Vec<Reading>> = BTreeMap::new();

    for reading in readings {
        let key = encode(reading.latitude, reading.longitude, key_length)?;
        groups.entry(key).or_default().push(*reading);
    }

    let mut cells = CellMap::new();
    for (key, members) in groups {
        cells.insert(Cell::observed(key, members)?);
    }

    debug!(
        readings = readings.len(),
        cells = cells.len(),
        key_length,
        "Binned readings"
    );

    Ok(cells)
}
