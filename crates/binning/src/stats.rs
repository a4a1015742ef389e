//! Descriptive statistics over reading values.

use pressure_common::{MapError, MapResult};
use serde::{Deserialize, Serialize};

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> MapResult<f64> {
    if xs.is_empty() {
        return Err(MapError::EmptyInput("mean"));
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Median of the value-sorted input. Even lengths average the two middle values.
pub fn median(xs: &[f64]) -> MapResult<f64> {
    if xs.is_empty() {
        return Err(MapError::EmptyInput("median"));
    }

    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Population standard deviation.
pub fn stdev(xs: &[f64]) -> MapResult<f64> {
    let avg = mean(xs).map_err(|_| MapError::EmptyInput("stdev"))?;
    let squared: Vec<f64> = xs.iter().map(|x| (x - avg).powi(2)).collect();
    Ok(mean(&squared)?.sqrt())
}

/// Logistic function `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Aggregate figures for the summary panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub stdev: f64,
}

impl SummaryStats {
    pub fn from_values(xs: &[f64]) -> MapResult<Self> {
        if xs.is_empty() {
            return Err(MapError::EmptyInput("summary"));
        }

        let min = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self {
            count: xs.len(),
            min,
            max,
            mean: mean(xs)?,
            median: median(xs)?,
            stdev: stdev(xs)?,
        })
    }
}
