use serde::Serialize;

use crate::booster::{Annotated, Snapshot};
use crate::constants::{
    RESIDUAL_BINS,
    RESIDUAL_BIN_START,
    RESIDUAL_BIN_WIDTH,
};


/// One bin `[start, end)` of a [`ResidualHistogram`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Exclusive upper edge.
    pub end: f64,
    /// Number of residuals in `[start, end)`.
    pub count: usize,
}


/// Distribution of the residuals of one snapshot
/// over 8 bins of width `0.25` covering `[-1, 1)`.
/// A residual of exactly `1` falls outside every bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualHistogram {
    step: usize,
    bins: Vec<HistogramBin>,
}


impl ResidualHistogram {
    /// Bin the given residuals.
    pub fn from_residuals(step: usize, residuals: &[f64]) -> Self {
        let bins = (0..RESIDUAL_BINS).map(|i| {
                let start = RESIDUAL_BIN_START + i as f64 * RESIDUAL_BIN_WIDTH;
                let end = start + RESIDUAL_BIN_WIDTH;
                let count = residuals.iter()
                    .filter(|&&r| r >= start && r < end)
                    .count();
                HistogramBin { start, end, count }
            })
            .collect();
        Self { step, bins }
    }


    /// Bin the residuals `target - score` of a snapshot.
    pub fn from_snapshot<P: Annotated>(snapshot: &Snapshot<P>) -> Self {
        let residuals = residuals(snapshot.points());
        Self::from_residuals(snapshot.step(), &residuals)
    }


    /// The 0-based step index.
    pub fn step(&self) -> usize {
        self.step
    }


    /// Returns a slice of the bins.
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins[..]
    }


    /// Number of binned residuals.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}


fn residuals<P: Annotated>(points: &[P]) -> Vec<f64> {
    points.iter()
        .map(|p| p.point().target - p.score())
        .collect()
}


/// Mean of `|target - score|`, or `0` for no points.
pub fn mean_abs_residual<P: Annotated>(points: &[P]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    residuals(points).into_iter()
        .map(f64::abs)
        .sum::<f64>()
        / points.len() as f64
}


/// The simulated size of the tree added after `snapshot`:
/// `mean(|residual|) * learning_rate`.
pub fn tree_contribution<P: Annotated>(
    snapshot: &Snapshot<P>,
    learning_rate: f64,
) -> f64
{
    mean_abs_residual(snapshot.points()) * learning_rate
}
