//! Core types for binned cells.

use std::collections::BTreeMap;

use geohash_codec::{decode, CellBounds};
use pressure_common::{MapResult, Reading};
use serde::{Deserialize, Serialize};

use crate::stats;

/// One grid cell, keyed by its geohash prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub key: String,

    /// Rectangle decoded from `key`.
    pub bounds: CellBounds,

    /// Raw readings in arrival order. Empty for interpolated cells.
    pub readings: Vec<Reading>,

    /// Median of `readings`, or the neighbour mean for interpolated cells.
    pub average: f64,

    pub interpolated: bool,

    /// Zero-based pass that created an interpolated cell.
    pub interpolation_pass: Option<usize>,
}

impl Cell {
    /// Build a cell from the readings that fell into it.
    pub fn observed(key: String, readings: Vec<Reading>) -> MapResult<Self> {
        let values: Vec<f64> = readings.iter().map(|r| r.reading).collect();
        let average = stats::median(&values)?;
        let bounds = decode(&key)?;

        Ok(Self {
            key,
            bounds,
            readings,
            average,
            interpolated: false,
            interpolation_pass: None,
        })
    }

    /// Build a gap-filling cell with no readings of its own.
    pub fn interpolated(key: String, average: f64, pass: usize) -> MapResult<Self> {
        let bounds = decode(&key)?;

        Ok(Self {
            key,
            bounds,
            readings: Vec::new(),
            average,
            interpolated: true,
            interpolation_pass: Some(pass),
        })
    }
}

/// Cells of one recompute, iterated in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellMap {
    cells: BTreeMap<String, Cell>,
}

impl CellMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cells.contains_key(key)
    }

    /// Average of the cell at `key`, if one exists.
    pub fn average_of(&self, key: &str) -> Option<f64> {
        self.cells.get(key).map(|c| c.average)
    }

    /// Insert a cell, replacing any cell with the same key.
    pub fn insert(&mut self, cell: Cell) -> Option<Cell> {
        self.cells.insert(cell.key.clone(), cell)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn interpolated_count(&self) -> usize {
        self.iter().filter(|c| c.interpolated).count()
    }

    pub fn observed_count(&self) -> usize {
        self.len() - self.interpolated_count()
    }
}

impl<'a> IntoIterator for &'a CellMap {
    type Item = &'a Cell;
    type IntoIter = std::collections::btree_map::Values<'a, String, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.values()
    }
}
