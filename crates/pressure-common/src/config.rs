//! Configuration for binning and rendering.

use std::cmp::Ordering;
use std::path::Path;

use geohash_codec::MAX_PRECISION;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{MapError, MapResult};

/// Settings supplied once at initialization and shared by every recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Readings below this value are treated as outliers (hPa).
    pub min_pressure: f64,

    /// Readings above this value are treated as outliers (hPa).
    pub max_pressure: f64,

    /// Geohash key length at the lowest zoom.
    pub min_hash_length: usize,

    /// Geohash key length at the highest zoom.
    pub max_hash_length: usize,

    pub min_zoom: i32,
    pub max_zoom: i32,

    /// Two or three colors spread evenly over the normalized range.
    pub gradient_stops: Vec<Color>,

    /// Number of neighbour-averaging passes used to fill gaps.
    pub interpolation_passes: usize,

    /// Fill opacity handed to the map host with every cell.
    pub fill_opacity: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_pressure: 0.0,
            max_pressure: 1500.0,
            min_hash_length: 3,
            max_hash_length: 7,
            min_zoom: 3,
            max_zoom: 14,
            gradient_stops: vec![Color::new(0, 255, 0), Color::new(255, 0, 0)],
            interpolation_passes: 10,
            fill_opacity: 0.65,
        }
    }
}

impl MapConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_parse("PRESSURE_MIN") {
            config.min_pressure = v;
        }
        if let Some(v) = env_parse("PRESSURE_MAX") {
            config.max_pressure = v;
        }
        if let Some(v) = env_parse("MIN_HASH_LENGTH") {
            config.min_hash_length = v;
        }
        if let Some(v) = env_parse("MAX_HASH_LENGTH") {
            config.max_hash_length = v;
        }
        if let Some(v) = env_parse("MIN_ZOOM") {
            config.min_zoom = v;
        }
        if let Some(v) = env_parse("MAX_ZOOM") {
            config.max_zoom = v;
        }
        if let Some(v) = env_parse("INTERPOLATION_PASSES") {
            config.interpolation_passes = v;
        }
        if let Some(v) = env_parse("FILL_OPACITY") {
            config.fill_opacity = v;
        }

        if let Ok(val) = std::env::var("GRADIENT_STOPS") {
            match parse_stops(&val) {
                Ok(stops) => config.gradient_stops = stops,
                Err(e) => tracing::warn!(value = %val, error = %e, "Ignoring GRADIENT_STOPS"),
            }
        }

        config
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> MapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string. Missing keys take defaults.
    pub fn from_yaml(yaml: &str) -> MapResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> MapResult<()> {
        let invalid = |msg: String| Err(MapError::InvalidConfig(msg));

        // NaN bounds compare as unordered and are rejected here too
        if self.min_pressure.partial_cmp(&self.max_pressure) != Some(Ordering::Less) {
            return invalid(format!(
                "min_pressure ({}) must be below max_pressure ({})",
                self.min_pressure, self.max_pressure
            ));
        }

        if self.min_hash_length == 0 || self.max_hash_length > MAX_PRECISION {
            return invalid(format!("hash lengths must lie in 1-{}", MAX_PRECISION));
        }

        if self.min_hash_length > self.max_hash_length {
            return invalid("min_hash_length must not exceed max_hash_length".to_string());
        }

        if self.min_zoom >= self.max_zoom || self.max_zoom <= 0 {
            return invalid(format!(
                "zoom range {}..{} is empty",
                self.min_zoom, self.max_zoom
            ));
        }

        if !(2..=3).contains(&self.gradient_stops.len()) {
            return invalid(format!(
                "gradient needs 2 or 3 stops, got {}",
                self.gradient_stops.len()
            ));
        }

        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return invalid("fill_opacity must be 0-1".to_string());
        }

        Ok(())
    }
}

/// Parse a comma separated list of hex colors.
pub fn parse_stops(s: &str) -> MapResult<Vec<Color>> {
    s.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Color::from_hex)
        .collect()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = MapConfig::default();
        config.validate().unwrap();
        assert_eq!(config.interpolation_passes, 10);
        assert_eq!(config.gradient_stops[0].to_hex(), "#00ff00");
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = MapConfig::default();
        config.min_pressure = 2000.0;
        assert!(config.validate().is_err());

        let mut config = MapConfig::default();
        config.max_hash_length = 13;
        assert!(config.validate().is_err());

        let mut config = MapConfig::default();
        config.min_zoom = 14;
        assert!(config.validate().is_err());

        let mut config = MapConfig::default();
        config.gradient_stops.truncate(1);
        assert!(config.validate().is_err());

        let mut config = MapConfig::default();
        config.fill_opacity = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_equal_and_nan_pressure_bounds() {
        let mut config = MapConfig::default();
        config.min_pressure = config.max_pressure;
        assert!(config.validate().is_err());

        let mut config = MapConfig::default();
        config.min_pressure = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = MapConfig::default();
        config.max_pressure = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_stops() {
        let stops = parse_stops("#0000ff, #ffffff ,#ff0000").unwrap();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[1], Color::new(255, 255, 255));
        assert!(parse_stops("#0000ff,blue").is_err());
    }

    #[test]
    fn test_yaml_partial_overrides() {
        let yaml = r##"
max_pressure: 1100
gradient_stops: ["#0000ff", "#ffffff", "#ff0000"]
"##;
        let config = MapConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.max_pressure, 1100.0);
        assert_eq!(config.min_hash_length, 3);
        assert_eq!(config.gradient_stops.len(), 3);
        config.validate().unwrap();
    }

    #[test]
    fn test_yaml_bad_color_fails() {
        let yaml = "gradient_stops: [\"#00ff00\", \"red\"]";
        assert!(matches!(
            MapConfig::from_yaml(yaml),
            Err(MapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_yaml_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "interpolation_passes: 4").unwrap();
        let config = MapConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.interpolation_passes, 4);
    }
}
