//! Same-precision neighbours of a geohash cell.
//!
//! The neighbour is found geometrically: decode the cell, step its center one
//! cell span across the requested edge, and re-encode at the original length.
//! This crosses subdivision boundaries where more than the last character
//! changes without any character-table lookups.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{decode, encode};
use crate::error::GeohashResult;

/// Cardinal direction on the map. `Top` is north, `Right` is east.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// Step in (lat, lon) cell units.
    fn step(&self) -> (f64, f64) {
        match self {
            Direction::Top => (1.0, 0.0),
            Direction::Bottom => (-1.0, 0.0),
            Direction::Left => (0.0, -1.0),
            Direction::Right => (0.0, 1.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Top => "top",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "top" | "north" => Ok(Direction::Top),
            "bottom" | "south" => Ok(Direction::Bottom),
            "left" | "west" => Ok(Direction::Left),
            "right" | "east" => Ok(Direction::Right),
            other => Err(format!("Unknown direction: {}", other)),
        }
    }
}

/// Hash of the cell adjacent to `hash` in `direction`, at the same precision.
///
/// At the poles and the antimeridian the stepped point is clamped back into
/// the valid coordinate range, so the edge cell is its own neighbour there.
pub fn adjacent(hash: &str, direction: Direction) -> GeohashResult<String> {
    let bounds = decode(hash)?;
    let (lat, lon) = bounds.center();
    let (dlat, dlon) = direction.step();

    let lat = (lat + dlat * bounds.lat_span()).clamp(-90.0, 90.0);
    let lon = (lon + dlon * bounds.lon_span()).clamp(-180.0, 180.0);

    encode(lat, lon, hash.len())
}

/// All four neighbours, in [`Direction::ALL`] order.
pub fn neighbors(hash: &str) -> GeohashResult<[String; 4]> {
    Ok([
        adjacent(hash, Direction::Top)?,
        adjacent(hash, Direction::Bottom)?,
        adjacent(hash, Direction::Left)?,
        adjacent(hash, Direction::Right)?,
    ])
}
