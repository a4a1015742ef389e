//! Spatial binning of point readings into geohash cells.
//!
//! Turns an unordered set of geotagged pressure readings into a sparse grid
//! of cells and fills the gaps between them:
//!
//! ```text
//! readings
//!    │
//!    ├─► filter::visible_readings   (outliers, viewport)
//!    │
//!    ├─► scale::precision_for_zoom  (key length from camera zoom)
//!    │
//!    ├─► binning::bin_readings      (group by geohash prefix, median per cell)
//!    │
//!    └─► interpolation::interpolate (neighbour averaging, fixed pass count)
//!             │
//!             ▼
//!          CellMap
//! ```

pub mod binning;
pub mod filter;
pub mod interpolation;
pub mod scale;
pub mod stats;
pub mod types;

pub use binning::bin_readings;
pub use filter::{filter_outliers, filter_visible, visible_readings};
pub use interpolation::{interpolate, InterpolationReport};
pub use scale::precision_for_zoom;
pub use types::{Cell, CellMap};
