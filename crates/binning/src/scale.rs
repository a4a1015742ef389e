//! Grid resolution from camera zoom.

use pressure_common::MapConfig;

/// Geohash key length for a zoom level.
///
/// `round((zoom - min_zoom) / max_zoom * (max_len - min_len)) + min_len`, with
/// the zoom clamped into the configured range first. Keeps the on-screen cell
/// count roughly constant as the camera zooms.
pub fn precision_for_zoom(zoom: i32, config: &MapConfig) -> usize {
    let zoom = zoom.max(config.min_zoom).min(config.max_zoom);
    let ratio = (zoom - config.min_zoom) as f64 / config.max_zoom as f64;
    let span = config.max_hash_length.saturating_sub(config.min_hash_length) as f64;

    let precision = (ratio * span).round() as usize + config.min_hash_length;
    precision.max(config.min_hash_length).min(config.max_hash_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mapping() {
        let config = MapConfig::default();
        assert_eq!(precision_for_zoom(3, &config), 3);
        assert_eq!(precision_for_zoom(8, &config), 4);
        assert_eq!(precision_for_zoom(10, &config), 5);
        assert_eq!(precision_for_zoom(14, &config), 6);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let config = MapConfig::default();
        assert_eq!(precision_for_zoom(-2, &config), 3);
        assert_eq!(precision_for_zoom(21, &config), precision_for_zoom(14, &config));
    }

    #[test]
    fn test_monotonic_in_zoom() {
        let config = MapConfig::default();
        let mut prev = 0;
        for zoom in config.min_zoom..=config.max_zoom {
            let p = precision_for_zoom(zoom, &config);
            assert!(p >= prev);
            prev = p;
        }
    }
}
