//! Property tests for geohash encoding and adjacency.

use geohash_codec::{adjacent, decode, encode, Direction};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn valid_hash() -> impl Strategy<Value = String> {
    (-90.0f64..=90.0, -180.0f64..=180.0, 1usize..=12)
        .prop_map(|(lat, lon, precision)| encode(lat, lon, precision).unwrap())
}

// ============================================================================
// Round trip
// ============================================================================

proptest! {
    #[test]
    fn prop_decode_contains_encoded_point(
        lat in -90.0f64..=90.0,
        lon in -180.0f64..=180.0,
        precision in 1usize..=12
    ) {
        let hash = encode(lat, lon, precision).unwrap();
        prop_assert_eq!(hash.len(), precision);

        let bounds = decode(&hash).unwrap();
        prop_assert!(bounds.contains(lat, lon), "{} -> {:?} misses ({}, {})", hash, bounds, lat, lon);
    }

    #[test]
    fn prop_encode_is_deterministic(
        lat in -90.0f64..=90.0,
        lon in -180.0f64..=180.0,
        precision in 1usize..=12
    ) {
        prop_assert_eq!(encode(lat, lon, precision).unwrap(), encode(lat, lon, precision).unwrap());
    }
}

// ============================================================================
// Adjacency
// ============================================================================

proptest! {
    #[test]
    fn prop_adjacent_keeps_precision(hash in valid_hash()) {
        for dir in Direction::ALL {
            prop_assert_eq!(adjacent(&hash, dir).unwrap().len(), hash.len());
        }
    }

    #[test]
    fn prop_right_neighbour_shares_east_edge(hash in valid_hash()) {
        let original = decode(&hash).unwrap();
        prop_assume!(original.max_lon < 180.0);

        let right = decode(&adjacent(&hash, Direction::Right).unwrap()).unwrap();
        prop_assert!((right.min_lon - original.max_lon).abs() < TOLERANCE);
        prop_assert!((right.min_lat - original.min_lat).abs() < TOLERANCE);
        prop_assert!((right.max_lat - original.max_lat).abs() < TOLERANCE);
    }

    #[test]
    fn prop_top_neighbour_shares_north_edge(hash in valid_hash()) {
        let original = decode(&hash).unwrap();
        prop_assume!(original.max_lat < 90.0);

        let top = decode(&adjacent(&hash, Direction::Top).unwrap()).unwrap();
        prop_assert!((top.min_lat - original.max_lat).abs() < TOLERANCE);
        prop_assert!((top.min_lon - original.min_lon).abs() < TOLERANCE);
    }
}

#[test]
fn test_neighbors_are_distinct_away_from_edges() {
    let hash = encode(40.0, -74.0, 5).unwrap();
    let all = geohash_codec::neighbors(&hash).unwrap();
    for (i, a) in all.iter().enumerate() {
        assert_ne!(a, &hash);
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
