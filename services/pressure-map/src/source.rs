//! Readings sources.
//!
//! The readings service is a black box returning a JSON array of readings for
//! a time window and region. A file-backed source serves the same payload from
//! disk for offline runs and tests.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pressure_common::{BoundingBox, MapError, MapResult, Reading};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Parameters of one readings fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingsQuery {
    /// Window start, epoch milliseconds.
    pub start_time: i64,
    /// Window end, epoch milliseconds.
    pub end_time: i64,
    /// Region to request; `None` asks for everything.
    pub bounds: Option<BoundingBox>,
    pub limit: usize,
}

impl ReadingsQuery {
    /// The window of length `window` ending now.
    pub fn last_window(bounds: Option<BoundingBox>, window: chrono::Duration, limit: usize) -> Self {
        Self::ending_at(Utc::now(), bounds, window, limit)
    }

    pub fn ending_at(
        end: DateTime<Utc>,
        bounds: Option<BoundingBox>,
        window: chrono::Duration,
        limit: usize,
    ) -> Self {
        Self {
            start_time: (end - window).timestamp_millis(),
            end_time: end.timestamp_millis(),
            bounds,
            limit,
        }
    }

    /// Query string parameters understood by the readings service.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("format", "json".to_string()),
            ("start_time", self.start_time.to_string()),
            ("end_time", self.end_time.to_string()),
        ];

        if let Some(b) = &self.bounds {
            params.push(("min_latitude", b.min_lat.to_string()));
            params.push(("max_latitude", b.max_lat.to_string()));
            params.push(("min_longitude", b.min_lon.to_string()));
            params.push(("max_longitude", b.max_lon.to_string()));
        }

        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// Anything that can produce a batch of readings.
#[async_trait]
pub trait ReadingsSource: Send + Sync {
    /// Fetch the readings matching `query`.
    async fn fetch(&self, query: &ReadingsQuery) -> MapResult<Vec<Reading>>;

    /// Short human readable name for logs.
    fn describe(&self) -> String;
}

/// Readings service reached over HTTP.
pub struct HttpReadingsSource {
    client: Client,
    url: String,
}

impl HttpReadingsSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> MapResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MapError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ReadingsSource for HttpReadingsSource {
    #[instrument(skip(self, query), fields(url = %self.url, limit = query.limit))]
    async fn fetch(&self, query: &ReadingsQuery) -> MapResult<Vec<Reading>> {
        debug!(start = query.start_time, end = query.end_time, "Requesting readings");

        let response = self
            .client
            .get(&self.url)
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| MapError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MapError::Transport(format!(
                "readings service returned {}",
                response.status()
            )));
        }

        let readings: Vec<Reading> = response
            .json()
            .await
            .map_err(|e| MapError::Decode(e.to_string()))?;

        info!(count = readings.len(), "Fetched readings");
        Ok(readings)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A JSON array of readings on disk.
///
/// The file is a fixed snapshot, so the query's time window is not applied;
/// bounds and limit are.
pub struct FileReadingsSource {
    path: PathBuf,
}

impl FileReadingsSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ReadingsSource for FileReadingsSource {
    #[instrument(skip(self, query), fields(path = %self.path.display()))]
    async fn fetch(&self, query: &ReadingsQuery) -> MapResult<Vec<Reading>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let readings: Vec<Reading> = serde_json::from_str(&content)?;
        let total = readings.len();

        let readings: Vec<Reading> = readings
            .into_iter()
            .filter(|r| {
                query
                    .bounds
                    .map_or(true, |b| b.contains(r.longitude, r.latitude))
            })
            .take(query.limit)
            .collect();

        debug!(total, kept = readings.len(), "Loaded readings from file");
        Ok(readings)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
