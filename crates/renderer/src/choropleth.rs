//! Projection of binned cells into a colored draw list.
//!
//! Cell averages are normalized against the median and standard deviation of
//! the raw visible readings (not the cell averages), squashed through a
//! sigmoid into 0-100, and mapped through the color gradient.

use binning::stats::{self, SummaryStats};
use binning::CellMap;
use geohash_codec::CellBounds;
use pressure_common::{Color, MapResult, Reading};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gradient::ColorGradient;

/// Normalized value used when the visible readings have no spread.
pub const NEUTRAL_NORMALIZED: u8 = 50;

/// Rectangle corners in the order map widgets expect them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl From<CellBounds> for DrawBounds {
    fn from(b: CellBounds) -> Self {
        Self {
            south: b.min_lat,
            west: b.min_lon,
            north: b.max_lat,
            east: b.max_lon,
        }
    }
}

/// One filled rectangle for the map host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCell {
    pub key: String,
    pub bounds: DrawBounds,
    pub color: Color,
    pub opacity: f64,
    /// Position on the gradient, 0-100.
    pub normalized: u8,
    pub average: f64,
    pub interpolated: bool,
}

/// Everything the map host needs for one recompute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOutput {
    /// Cells in key order.
    pub cells: Vec<DrawCell>,

    /// Stats over the raw visible readings; `None` when nothing is visible.
    pub summary: Option<SummaryStats>,
}

impl RenderOutput {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Normalize a cell average into 0-100.
///
/// `round(sigmoid((average - median) / stdev) * 100)`, or the neutral
/// midpoint when `stdev` is zero.
pub fn normalize(average: f64, median: f64, stdev: f64) -> u8 {
    if stdev == 0.0 || !stdev.is_finite() {
        return NEUTRAL_NORMALIZED;
    }
    let squashed = stats::sigmoid((average - median) / stdev);
    (squashed * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Color every cell and collect the summary stats of `visible`.
///
/// An empty `visible` set renders nothing.
pub fn project(
    cells: &CellMap,
    visible: &[Reading],
    gradient: &ColorGradient,
    opacity: f64,
) -> MapResult<RenderOutput> {
    if visible.is_empty() {
        return Ok(RenderOutput::default());
    }

    let values: Vec<f64> = visible.iter().map(|r| r.reading).collect();
    let summary = SummaryStats::from_values(&values)?;

    if summary.stdev == 0.0 {
        debug!(count = summary.count, "Visible readings have zero spread, using neutral color");
    }

    let draw_cells: Vec<DrawCell> = cells
        .iter()
        .map(|cell| {
            let normalized = normalize(cell.average, summary.median, summary.stdev);
            DrawCell {
                key: cell.key.clone(),
                bounds: cell.bounds.into(),
                color: gradient.color_at(normalized as f64),
                opacity,
                normalized,
                average: cell.average,
                interpolated: cell.interpolated,
            }
        })
        .collect();

    Ok(RenderOutput {
        cells: draw_cells,
        summary: Some(summary),
    })
}
