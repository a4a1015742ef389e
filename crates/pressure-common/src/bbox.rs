//! Bounding box and viewport types.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in WGS84 degrees.
///
/// A box whose `min_lon` is greater than its `max_lon` spans the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Parse a query string of the form "min_lon,min_lat,max_lon,max_lat".
    pub fn from_query_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| -> Result<f64, BboxParseError> {
            p.parse()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        Ok(Self {
            min_lon: parse(parts[0])?,
            min_lat: parse(parts[1])?,
            max_lon: parse(parts[2])?,
            max_lat: parse(parts[3])?,
        })
    }

    /// Whether the box wraps across the 180th meridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.min_lon > self.max_lon
    }

    /// Width in degrees of longitude.
    pub fn width(&self) -> f64 {
        if self.crosses_antimeridian() {
            360.0 - self.min_lon + self.max_lon
        } else {
            self.max_lon - self.min_lon
        }
    }

    /// Height in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if lat < self.min_lat || lat > self.max_lat {
            return false;
        }
        if self.crosses_antimeridian() {
            lon >= self.min_lon || lon <= self.max_lon
        } else {
            lon >= self.min_lon && lon <= self.max_lon
        }
    }

    /// Get the center point as (lon, lat).
    pub fn center(&self) -> (f64, f64) {
        let mut lon = self.min_lon + self.width() / 2.0;
        if lon > 180.0 {
            lon -= 360.0;
        }
        (lon, (self.min_lat + self.max_lat) / 2.0)
    }

    /// Clamp this bounding box to valid geographic coordinates.
    pub fn clamp_to_valid(&self) -> Self {
        Self {
            min_lon: self.min_lon.clamp(-180.0, 180.0),
            min_lat: self.min_lat.clamp(-90.0, 90.0),
            max_lon: self.max_lon.clamp(-180.0, 180.0),
            max_lat: self.max_lat.clamp(-90.0, 90.0),
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        // Global coverage
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bounding box format: {0}. Expected 'min_lon,min_lat,max_lon,max_lat'")]
    InvalidFormat(String),

    #[error("Invalid number in bounding box: {0}")]
    InvalidNumber(String),
}

/// The visible map region and camera zoom, supplied by the map host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
    pub zoom: i32,
}

impl Viewport {
    pub fn new(bounds: BoundingBox, zoom: i32) -> Self {
        Self {
            min_lat: bounds.min_lat,
            max_lat: bounds.max_lat,
            min_lon: bounds.min_lon,
            max_lon: bounds.max_lon,
            zoom,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.min_lon, self.min_lat, self.max_lon, self.max_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_bbox() {
        let bbox = BoundingBox::from_query_string("-125.0,24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_lon, -125.0);
        assert_eq!(bbox.min_lat, 24.0);
        assert_eq!(bbox.max_lon, -66.0);
        assert_eq!(bbox.max_lat, 50.0);
    }

    #[test]
    fn test_contains_across_antimeridian() {
        let pacific = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
        assert!(pacific.crosses_antimeridian());
        assert!(pacific.contains(175.0, 0.0));
        assert!(pacific.contains(-175.0, 0.0));
        assert!(!pacific.contains(0.0, 0.0));
        assert_eq!(pacific.width(), 20.0);
        assert_eq!(pacific.center(), (180.0, 0.0));
    }

    #[test]
    fn test_viewport_bounds() {
        let vp = Viewport {
            min_lat: 35.0,
            max_lat: 45.0,
            min_lon: -80.0,
            max_lon: -70.0,
            zoom: 6,
        };
        let b = vp.bounds();
        assert!(b.contains(-74.0, 40.0));
        assert_eq!(Viewport::new(b, 6), vp);
    }
}
