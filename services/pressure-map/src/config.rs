//! Service configuration.

use std::env;
use std::time::Duration;

use pressure_common::MapConfig;
use serde::{Deserialize, Serialize};

use crate::source::ReadingsQuery;

/// Configuration for fetching readings and driving the map session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Readings endpoint returning a JSON array of readings.
    pub readings_url: Option<String>,

    /// Maximum number of readings requested per fetch.
    pub limit: usize,

    /// How far back from now the fetch window reaches (seconds).
    pub window_secs: u64,

    /// Poll interval for `watch` (seconds).
    pub refresh_secs: u64,

    /// HTTP request timeout (seconds).
    pub request_timeout_secs: u64,

    /// Binning and rendering settings.
    pub map: MapConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            readings_url: None,
            limit: 100_000,
            window_secs: 3600,
            refresh_secs: 60,
            request_timeout_secs: 30,
            map: MapConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            readings_url: env::var("READINGS_URL").ok().filter(|s| !s.is_empty()),
            limit: env::var("READINGS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.limit),
            window_secs: env::var("READINGS_WINDOW_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.window_secs),
            refresh_secs: env::var("REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_secs),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            map: MapConfig::from_env(),
        }
    }

    /// Query for the configured window ending now.
    ///
    /// Fetches are not limited to the viewport: panning and zooming
    /// re-filter the loaded readings without another fetch.
    pub fn fetch_query(&self) -> ReadingsQuery {
        ReadingsQuery::last_window(None, self.window(), self.limit)
    }

    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.window_secs.min(i64::MAX as u64) as i64)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
