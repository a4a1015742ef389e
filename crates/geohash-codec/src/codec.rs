//! Base-32 geohash encoding and decoding.
//!
//! Bits are interleaved starting with longitude: even bit positions narrow the
//! longitude range, odd positions narrow latitude. Each output character packs
//! five bits, most significant first.

use serde::{Deserialize, Serialize};

use crate::error::{GeohashError, GeohashResult};

/// Standard geohash alphabet (`0-9`, `b-z` without `a`, `i`, `l`, `o`).
pub const BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Longest hash accepted by [`encode`].
pub const MAX_PRECISION: usize = 12;

const BITS_PER_CHAR: usize = 5;

/// Rectangle covered by a geohash, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl CellBounds {
    /// The whole globe, i.e. the cell of the empty hash.
    pub fn world() -> Self {
        Self {
            min_lat: -90.0,
            max_lat: 90.0,
            min_lon: -180.0,
            max_lon: 180.0,
        }
    }

    /// Center point as (lat, lon).
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Height of the cell in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Width of the cell in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Inclusive point containment.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Encode a coordinate as a geohash of `precision` characters.
pub fn encode(lat: f64, lon: f64, precision: usize) -> GeohashResult<String> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(GeohashError::InvalidPrecision(precision));
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(GeohashError::InvalidCoordinate { lat, lon });
    }

    let mut hash = String::with_capacity(precision);
    let mut lat_range = (-90.0, 90.0);
    let mut lon_range = (-180.0, 180.0);
    let mut is_lon = true;
    let mut bits = 0usize;
    let mut bit = 0;

    while hash.len() < precision {
        let (range, value) = if is_lon {
            (&mut lon_range, lon)
        } else {
            (&mut lat_range, lat)
        };
        let mid = (range.0 + range.1) / 2.0;

        bits <<= 1;
        if value > mid {
            bits |= 1;
            range.0 = mid;
        } else {
            range.1 = mid;
        }
        is_lon = !is_lon;

        bit += 1;
        if bit == BITS_PER_CHAR {
            hash.push(BASE32[bits] as char);
            bits = 0;
            bit = 0;
        }
    }

    Ok(hash)
}

/// Decode a geohash into the rectangle it covers.
pub fn decode(hash: &str) -> GeohashResult<CellBounds> {
    if hash.is_empty() {
        return Err(GeohashError::InvalidHash {
            hash: String::new(),
            reason: "hash is empty".to_string(),
        });
    }

    let mut bounds = CellBounds::world();
    let mut is_lon = true;

    for c in hash.chars() {
        let idx = char_index(c).ok_or_else(|| GeohashError::InvalidHash {
            hash: hash.to_string(),
            reason: format!("character '{}' is not in the geohash alphabet", c),
        })?;

        for shift in (0..BITS_PER_CHAR).rev() {
            let bit = (idx >> shift) & 1;
            if is_lon {
                let mid = (bounds.min_lon + bounds.max_lon) / 2.0;
                if bit == 1 {
                    bounds.min_lon = mid;
                } else {
                    bounds.max_lon = mid;
                }
            } else {
                let mid = (bounds.min_lat + bounds.max_lat) / 2.0;
                if bit == 1 {
                    bounds.min_lat = mid;
                } else {
                    bounds.max_lat = mid;
                }
            }
            is_lon = !is_lon;
        }
    }

    Ok(bounds)
}

fn char_index(c: char) -> Option<usize> {
    if !c.is_ascii() {
        return None;
    }
    BASE32.iter().position(|&b| b == c as u8)
}
