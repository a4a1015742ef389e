//! Integration tests for filtering, binning and interpolation together.

use std::collections::HashSet;

use binning::{bin_readings, interpolate, precision_for_zoom, visible_readings, CellMap};
use geohash_codec::{adjacent, decode, encode, neighbors, Direction};
use pressure_common::{MapConfig, Reading};
use test_utils::fixtures::{self, bbox};
use test_utils::{clustered_readings, scattered_readings};

fn build(readings: &[Reading], key_length: usize, passes: usize) -> CellMap {
    let mut cells = bin_readings(readings, key_length).unwrap();
    interpolate(&mut cells, passes).unwrap();
    cells
}

fn walk(key: &str, direction: Direction, steps: usize) -> String {
    let mut key = key.to_string();
    for _ in 0..steps {
        key = adjacent(&key, direction).unwrap();
    }
    key
}

/// Keys reachable from `seeds` in at most `hops` cardinal steps.
fn within_hops(seeds: &[String], hops: usize) -> HashSet<String> {
    let mut reached: HashSet<String> = seeds.iter().cloned().collect();
    let mut frontier = seeds.to_vec();
    for _ in 0..hops {
        let mut next = Vec::new();
        for key in &frontier {
            for neighbour in neighbors(key).unwrap() {
                if reached.insert(neighbour.clone()) {
                    next.push(neighbour);
                }
            }
        }
        frontier = next;
    }
    reached
}

fn existing_neighbours(cells: &CellMap, key: &str) -> usize {
    Direction::ALL
        .iter()
        .filter(|&&d| cells.contains(&adjacent(key, d).unwrap()))
        .count()
}

// ============================================================================
// Empty and degenerate inputs
// ============================================================================

#[test]
fn test_empty_viewport_yields_no_cells() {
    let config = MapConfig::default();
    let visible = visible_readings(
        &fixtures::new_york_readings(),
        &bbox::SOUTH_ATLANTIC,
        &config,
    );
    assert!(visible.is_empty());

    let mut cells = bin_readings(&visible, 5).unwrap();
    let report = interpolate(&mut cells, 10).unwrap();
    assert!(cells.is_empty());
    assert_eq!(report.total_created(), 0);
}

#[test]
fn test_outliers_never_reach_bins() {
    let config = MapConfig::default();
    let mut readings = fixtures::new_york_readings();
    readings.extend(fixtures::outlier_readings());

    let visible = visible_readings(&readings, &bbox::NEW_YORK, &config);
    assert_eq!(visible.len(), fixtures::new_york_readings().len());

    let cells = bin_readings(&visible, 3).unwrap();
    assert!(cells.iter().all(|c| c.average > 1000.0 && c.average < 1020.0));
}

#[test]
fn test_isolated_cluster_stays_single_cell() {
    let readings = clustered_readings(48.85, 2.35, 25, 1005.0, 3);
    let cells = build(&readings, 5, 10);
    assert_eq!(cells.len(), 1);
    assert_eq!(cells.interpolated_count(), 0);
}

// ============================================================================
// Binning
// ============================================================================

#[test]
fn test_close_pair_shares_bin_with_median_average() {
    let readings = vec![
        Reading::new(40.0, -74.0, 1010.0, 0),
        Reading::new(40.01, -74.01, 1012.0, 0),
    ];
    let cells = bin_readings(&readings, 4).unwrap();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells.iter().next().unwrap().average, 1011.0);
}

#[test]
fn test_close_pair_splits_at_key_length_five() {
    let readings = vec![
        Reading::new(40.0, -74.0, 1010.0, 0),
        Reading::new(40.01, -74.01, 1012.0, 0),
    ];
    let cells = bin_readings(&readings, 5).unwrap();
    let keys: Vec<&str> = cells.keys().collect();
    assert_eq!(keys, vec!["dr57e", "dr57s"]);
    assert_eq!(cells.average_of("dr57s"), Some(1010.0));
    assert_eq!(cells.average_of("dr57e"), Some(1012.0));
}

#[test]
fn test_cell_bounds_match_keys() {
    let readings = scattered_readings(&bbox::CONUS, 200, 11);
    let cells = build(&readings, 3, 3);
    for cell in &cells {
        assert_eq!(cell.bounds, decode(&cell.key).unwrap());
        for r in &cell.readings {
            assert!(cell.bounds.contains(r.latitude, r.longitude));
        }
    }
}

#[test]
fn test_zoom_controls_key_length() {
    let config = MapConfig::default();
    let readings = fixtures::new_york_readings();

    let coarse = bin_readings(&readings, precision_for_zoom(3, &config)).unwrap();
    let fine = bin_readings(&readings, precision_for_zoom(14, &config)).unwrap();

    assert!(coarse.iter().all(|c| c.key.len() == 3));
    assert!(fine.iter().all(|c| c.key.len() == 6));
    assert!(fine.len() >= coarse.len());
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn test_interpolated_cells_are_corroborated() {
    let readings = scattered_readings(&bbox::CONUS, 150, 5);
    let cells = build(&readings, 3, 10);

    assert!(cells.interpolated_count() > 0);
    for cell in cells.iter().filter(|c| c.interpolated) {
        assert!(cell.readings.is_empty());
        assert!(cell.interpolation_pass.is_some());
        assert!(
            existing_neighbours(&cells, &cell.key) >= 2,
            "{} was filled without two neighbours",
            cell.key
        );
    }
}

#[test]
fn test_interpolation_is_deterministic() {
    let readings = scattered_readings(&bbox::CONUS, 150, 9);
    let a = build(&readings, 4, 10);
    let b = build(&readings, 4, 10);
    assert_eq!(a, b);
}

#[test]
fn test_uniform_field_interpolates_to_same_value() {
    // Checkerboard of observed cells: every gap has observed neighbours
    let mut row_start = encode(35.0, -100.0, 3).unwrap();
    let mut readings = Vec::new();
    for row in 0..5 {
        let mut key = row_start.clone();
        for col in 0..5 {
            if (row + col) % 2 == 0 {
                let (lat, lon) = decode(&key).unwrap().center();
                readings.push(Reading::new(lat, lon, 1013.0, 0));
            }
            key = adjacent(&key, Direction::Right).unwrap();
        }
        row_start = adjacent(&row_start, Direction::Top).unwrap();
    }

    let cells = build(&readings, 3, 10);
    assert_eq!(cells.observed_count(), 13);
    assert!(cells.interpolated_count() >= 12);
    for cell in &cells {
        assert!((cell.average - 1013.0).abs() < 1e-9);
    }
}

#[test]
fn test_more_passes_never_shrink_coverage() {
    let readings = scattered_readings(&bbox::CONUS, 80, 21);
    let mut prev = 0;
    for passes in [0, 1, 2, 5, 10] {
        let len = build(&readings, 4, passes).len();
        assert!(len >= prev);
        prev = len;
    }
}

#[test]
fn test_pass_count_limits_reach() {
    // Two arms meeting at a corner; the quadrant between them fills one
    // diagonal at a time, so the fill keeps growing for many passes.
    let origin = encode(40.0, -100.0, 4).unwrap();
    let mut seeds = vec![origin.clone()];
    for step in 1..=12 {
        seeds.push(walk(&origin, Direction::Right, step));
        seeds.push(walk(&origin, Direction::Top, step));
    }
    let readings: Vec<Reading> = seeds
        .iter()
        .map(|key| {
            let (lat, lon) = decode(key).unwrap().center();
            Reading::new(lat, lon, 1012.0, 0)
        })
        .collect();

    let reach: Vec<HashSet<String>> = (0..=4).map(|hops| within_hops(&seeds, hops)).collect();

    for passes in [1usize, 2, 4] {
        let mut cells = bin_readings(&readings, 4).unwrap();
        assert_eq!(cells.observed_count(), seeds.len());
        let report = interpolate(&mut cells, passes).unwrap();

        assert_eq!(report.created_per_pass.len(), passes);
        assert!(report.total_created() > 0);
        for (pass, &created) in report.created_per_pass.iter().enumerate() {
            let tagged = cells
                .iter()
                .filter(|c| c.interpolation_pass == Some(pass))
                .count();
            assert_eq!(created, tagged, "pass {} count mismatch", pass);
        }

        for cell in cells.iter().filter(|c| c.interpolated) {
            let pass = cell.interpolation_pass.unwrap();
            assert!(pass < passes, "{} tagged with pass {}", cell.key, pass);
            assert!(
                reach[pass + 1].contains(&cell.key),
                "{} created in pass {} is more than {} hops out",
                cell.key,
                pass,
                pass + 1
            );
        }
    }

    // Five hops from both arms: out of reach for two passes, filled by ten
    let deep = walk(&walk(&origin, Direction::Right, 5), Direction::Top, 5);
    assert!(!build(&readings, 4, 2).contains(&deep));
    let full = build(&readings, 4, 10);
    assert!(full.get(&deep).unwrap().interpolated);
    assert_eq!(full.average_of(&deep), Some(1012.0));
}
