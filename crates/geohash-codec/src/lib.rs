//! GeoHash cells for spatial binning.
//!
//! Implements the standard base-32 geohash from scratch:
//! - Encoding a (latitude, longitude) pair at a given precision
//! - Decoding a hash back into the rectangle it names
//! - Resolving the same-precision neighbour in a cardinal direction
//!
//! Two hashes sharing a prefix are spatially nested, so truncating a hash
//! coarsens its cell.

pub mod adjacency;
pub mod codec;
pub mod error;

pub use adjacency::{adjacent, neighbors, Direction};
pub use codec::{decode, encode, CellBounds, BASE32, MAX_PRECISION};
pub use error::{GeohashError, GeohashResult};
