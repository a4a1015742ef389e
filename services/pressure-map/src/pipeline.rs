//! One full recompute: filter, bin, interpolate, project.

use binning::{bin_readings, interpolate, precision_for_zoom, visible_readings};
use pressure_common::{MapConfig, MapResult, Reading, Viewport};
use renderer::{project, ColorGradient, RenderOutput};
use tracing::{debug, info};

/// Result of a recompute plus what it took to get there.
#[derive(Debug, Clone, Default)]
pub struct RenderCycle {
    pub output: RenderOutput,
    pub key_length: usize,
    pub visible: usize,
    pub interpolated: usize,
}

/// Turn the loaded readings into a draw list for `viewport`.
///
/// Nothing visible renders nothing; statistics are never computed on an
/// empty set.
pub fn render_viewport(
    readings: &[Reading],
    viewport: &Viewport,
    config: &MapConfig,
    gradient: &ColorGradient,
) -> MapResult<RenderCycle> {
    let key_length = precision_for_zoom(viewport.zoom, config);
    let visible = visible_readings(readings, &viewport.bounds(), config);

    if visible.is_empty() {
        debug!(zoom = viewport.zoom, "No readings in viewport");
        return Ok(RenderCycle {
            key_length,
            ..Default::default()
        });
    }

    let mut cells = bin_readings(&visible, key_length)?;
    let observed = cells.len();
    let report = interpolate(&mut cells, config.interpolation_passes)?;
    let output = project(&cells, &visible, gradient, config.fill_opacity)?;

    info!(
        zoom = viewport.zoom,
        key_length,
        visible = visible.len(),
        observed_cells = observed,
        interpolated_cells = report.total_created(),
        "Rendered viewport"
    );

    Ok(RenderCycle {
        output,
        key_length,
        visible: visible.len(),
        interpolated: report.total_created(),
    })
}
