//! Gap filling by neighbour averaging.
//!
//! Each pass visits every existing cell in key order. For each empty cardinal
//! neighbour it looks at that empty cell's own four neighbours; if at least
//! [`MIN_CORROBORATING_NEIGHBOURS`] of them have an average, a new cell is
//! created with their mean. Cells created earlier in the same pass are visible
//! to later lookups but are not themselves visited until the next pass.
//!
//! The pass count is fixed, so coverage stops that many cells beyond real data.

use geohash_codec::{adjacent, Direction};
use pressure_common::MapResult;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::stats;
use crate::types::{Cell, CellMap};

/// Neighbour averages required before an empty cell is filled.
pub const MIN_CORROBORATING_NEIGHBOURS: usize = 2;

/// Outcome of an interpolation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpolationReport {
    /// Cells created by each pass, indexed by pass.
    pub created_per_pass: Vec<usize>,
}

impl InterpolationReport {
    pub fn total_created(&self) -> usize {
        self.created_per_pass.iter().sum()
    }
}

/// Run `passes` rounds of neighbour averaging over `cells`.
pub fn interpolate(cells: &mut CellMap, passes: usize) -> MapResult<InterpolationReport> {
    let mut report = InterpolationReport::default();

    for pass in 0..passes {
        let keys: Vec<String> = cells.keys().map(str::to_owned).collect();
        let mut created = 0;

        for key in &keys {
            for direction in Direction::ALL {
                let candidate = adjacent(key, direction)?;
                if cells.contains(&candidate) {
                    continue;
                }

                let averages = neighbour_averages(cells, &candidate)?;
                if averages.len() >= MIN_CORROBORATING_NEIGHBOURS {
                    let average = stats::mean(&averages)?;
                    cells.insert(Cell::interpolated(candidate, average, pass)?);
                    created += 1;
                }
            }
        }

        debug!(pass, created, total = cells.len(), "Interpolation pass complete");
        report.created_per_pass.push(created);

        if created == 0 {
            // Nothing new can be reached; later passes would see the same map.
            report.created_per_pass.resize(passes, 0);
            break;
        }
    }

    Ok(report)
}

/// Averages of the existing cells around `key`, in [`Direction::ALL`] order.
fn neighbour_averages(cells: &CellMap, key: &str) -> MapResult<Vec<f64>> {
    let mut averages = Vec::with_capacity(4);
    for direction in Direction::ALL {
        let neighbour = adjacent(key, direction)?;
        if let Some(avg) = cells.average_of(&neighbour) {
            averages.push(avg);
        }
    }
    Ok(averages)
}
