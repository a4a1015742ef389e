//! Color rendering for binned pressure data.
//!
//! - Gradient: piecewise-linear color ramp over the normalized range 0-100
//! - Choropleth: normalizes cell averages and emits the draw list for the map host

pub mod choropleth;
pub mod gradient;

pub use choropleth::{normalize, project, DrawBounds, DrawCell, RenderOutput};
pub use gradient::ColorGradient;
