//! Per-map state: loaded readings, viewport, last render and load status.
//!
//! Loads are tagged with a [`RequestId`] when they start. A response older
//! than the newest applied one is dropped, so a slow fetch can never
//! overwrite fresher data.

use std::sync::Arc;
use std::time::Instant;

use pressure_common::{MapConfig, MapResult, Reading, Viewport};
use renderer::{ColorGradient, RenderOutput};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::metrics::{MetricsCollector, MetricsSnapshot};
use crate::pipeline::render_viewport;
use crate::source::{ReadingsQuery, ReadingsSource};

/// Monotonically increasing tag of a readings load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What the map host shows about data loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded { readings: usize },
    /// The last load failed; the previous render is still shown.
    Failed(String),
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied { readings: usize, cells: usize },
    /// A newer response had already been applied.
    Stale,
    Failed(String),
}

pub struct MapSession {
    config: MapConfig,
    gradient: ColorGradient,
    readings: Vec<Reading>,
    viewport: Option<Viewport>,
    render: RenderOutput,
    key_length: Option<usize>,
    load_state: LoadState,
    next_request: u64,
    applied: Option<RequestId>,
    metrics: Arc<MetricsCollector>,
}

impl MapSession {
    pub fn new(config: MapConfig) -> MapResult<Self> {
        Self::with_metrics(config, Arc::new(MetricsCollector::new()))
    }

    pub fn with_metrics(config: MapConfig, metrics: Arc<MetricsCollector>) -> MapResult<Self> {
        config.validate()?;
        let gradient = ColorGradient::from_config(&config)?;

        Ok(Self {
            config,
            gradient,
            readings: Vec::new(),
            viewport: None,
            render: RenderOutput::default(),
            key_length: None,
            load_state: LoadState::Idle,
            next_request: 0,
            applied: None,
            metrics,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    pub fn render(&self) -> &RenderOutput {
        &self.render
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn metrics(&self) -> &Arc<MetricsCollector> {
        &self.metrics
    }

    /// Mark a load as started and hand out its tag.
    pub fn begin_load(&mut self) -> RequestId {
        self.next_request += 1;
        self.load_state = LoadState::Loading;
        RequestId(self.next_request)
    }

    /// Apply the result of the load tagged `id`.
    ///
    /// A successful load replaces the readings and recomputes once. A failed
    /// load only changes the load state. Errors are returned only when the
    /// recompute itself fails.
    pub fn complete_load(
        &mut self,
        id: RequestId,
        result: MapResult<Vec<Reading>>,
    ) -> MapResult<LoadOutcome> {
        if self.applied.is_some_and(|applied| id <= applied) {
            debug!(request = id.0, "Discarding stale readings response");
            self.metrics.record_stale_response();
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(readings) => {
                let count = readings.len();
                self.readings = readings;
                self.applied = Some(id);
                self.load_state = LoadState::Loaded { readings: count };
                self.metrics.record_fetch(count);
                info!(request = id.0, readings = count, "Applied readings");

                let cells = self.recompute()?.cells.len();
                Ok(LoadOutcome::Applied {
                    readings: count,
                    cells,
                })
            }
            Err(e) if e.is_load_failure() => {
                warn!(request = id.0, error = %e, "Failed to load readings");
                self.metrics.record_fetch_failure();
                let message = e.to_string();
                self.load_state = LoadState::Failed(message.clone());
                Ok(LoadOutcome::Failed(message))
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch from `source` and apply the result.
    pub async fn load(
        &mut self,
        source: &dyn ReadingsSource,
        query: &ReadingsQuery,
    ) -> MapResult<LoadOutcome> {
        let id = self.begin_load();
        let result = source.fetch(query).await;
        self.complete_load(id, result)
    }

    /// Move the viewport and redraw from the readings already loaded.
    pub fn set_viewport(&mut self, viewport: Viewport) -> MapResult<&RenderOutput> {
        self.viewport = Some(viewport);
        self.recompute()
    }

    /// Rebuild the draw list for the current viewport.
    ///
    /// Without a viewport there is nothing to draw and the render is left as is.
    pub fn recompute(&mut self) -> MapResult<&RenderOutput> {
        let Some(viewport) = self.viewport else {
            debug!("No viewport yet, skipping recompute");
            return Ok(&self.render);
        };

        let start = Instant::now();
        let cycle = render_viewport(&self.readings, &viewport, &self.config, &self.gradient)?;
        self.metrics.record_render(
            start.elapsed().as_micros() as u64,
            cycle.output.cells.len(),
            cycle.interpolated,
        );

        self.key_length = Some(cycle.key_length);
        self.render = cycle.output;
        Ok(&self.render)
    }

    /// Serializable view of the session for the map host.
    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            viewport: self.viewport.as_ref(),
            key_length: self.key_length,
            load_state: &self.load_state,
            readings_loaded: self.readings.len(),
            render: &self.render,
            metrics: self.metrics.snapshot(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'a> {
    pub viewport: Option<&'a Viewport>,
    pub key_length: Option<usize>,
    pub load_state: &'a LoadState,
    pub readings_loaded: usize,
    pub render: &'a RenderOutput,
    pub metrics: MetricsSnapshot,
}
