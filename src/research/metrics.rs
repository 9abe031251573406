use rayon::prelude::*;
use serde::Serialize;

use std::ops::Add;

use crate::booster::{Annotated, Snapshot};
use crate::common::{LossFunction, LossValue, utils};


/// Counts of a binary confusion matrix at threshold `0.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// Predicted `1`, labeled `1`.
    pub true_positive: usize,
    /// Predicted `1`, labeled `0`.
    pub false_positive: usize,
    /// Predicted `0`, labeled `0`.
    pub true_negative: usize,
    /// Predicted `0`, labeled `1`.
    pub false_negative: usize,
}


impl Add for ConfusionMatrix {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            true_positive: self.true_positive + other.true_positive,
            false_positive: self.false_positive + other.false_positive,
            true_negative: self.true_negative + other.true_negative,
            false_negative: self.false_negative + other.false_negative,
        }
    }
}


impl ConfusionMatrix {
    /// Count the annotated points.
    pub fn from_points<P>(points: &[P]) -> Self
        where P: Annotated + Sync
    {
        points.par_iter()
            .map(|p| {
                let mut m = Self::default();
                match (p.predicted_label(), p.point().label()) {
                    (1, 1) => m.true_positive = 1,
                    (1, _) => m.false_positive = 1,
                    (_, 1) => m.false_negative = 1,
                    _ => m.true_negative = 1,
                }
                m
            })
            .reduce(Self::default, Self::add)
    }


    /// Total number of points.
    pub fn total(&self) -> usize {
        self.true_positive
            + self.false_positive
            + self.true_negative
            + self.false_negative
    }


    /// Number of correctly classified points.
    pub fn correct(&self) -> usize {
        self.true_positive + self.true_negative
    }


    /// Number of misclassified points.
    pub fn misclassified(&self) -> usize {
        self.false_positive + self.false_negative
    }


    /// `tp / (tp + fp)`, or `0` without positive predictions.
    pub fn precision(&self) -> f64 {
        let tp = self.true_positive as f64;
        utils::ratio_or_zero(tp, tp + self.false_positive as f64)
    }


    /// `tp / (tp + fn)`, or `0` without positive labels.
    pub fn recall(&self) -> f64 {
        let tp = self.true_positive as f64;
        utils::ratio_or_zero(tp, tp + self.false_negative as f64)
    }


    /// Harmonic mean of precision and recall, or `0`.
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        utils::ratio_or_zero(2.0 * p * r, p + r)
    }


    /// `100 - misclassified / total * 100`, or `0` for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        100.0 - (self.misclassified() as f64 / total as f64) * 100.0
    }
}


/// Summary of one snapshot.
/// `accuracy`, `precision`, `recall`, and `f1` are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StepMetrics {
    /// The 0-based step index.
    pub step: usize,
    /// Number of points.
    pub n_sample: usize,
    /// Accuracy in percent.
    pub accuracy: f64,
    /// Precision in percent.
    pub precision: f64,
    /// Recall in percent.
    pub recall: f64,
    /// F1 score in percent.
    pub f1: f64,
    /// Algorithm specific loss.
    pub loss: LossValue,
    /// The counts the percentages were derived from.
    pub confusion: ConfusionMatrix,
}


impl StepMetrics {
    /// Aggregate a snapshot.
    /// An empty snapshot yields zeros rather than `NaN`.
    pub fn from_snapshot<P, L>(snapshot: &Snapshot<P>, loss: &L) -> Self
        where P: Annotated + Sync,
              L: LossFunction,
    {
        let points = snapshot.points();
        let confusion = ConfusionMatrix::from_points(points);

        let scores = points.iter()
            .map(|p| p.score())
            .collect::<Vec<_>>();
        let target = points.iter()
            .map(|p| p.point().target)
            .collect::<Vec<_>>();

        Self {
            step: snapshot.step(),
            n_sample: points.len(),
            accuracy: confusion.accuracy(),
            precision: confusion.precision() * 100.0,
            recall: confusion.recall() * 100.0,
            f1: confusion.f1() * 100.0,
            loss: loss.eval(&scores, &target),
            confusion,
        }
    }


    /// Number of misclassified points.
    pub fn n_misclassified(&self) -> usize {
        self.confusion.misclassified()
    }
}


/// Aggregate every snapshot of a sequence.
pub fn evaluate<P, L>(sequence: &[Snapshot<P>], loss: &L) -> Vec<StepMetrics>
    where P: Annotated + Sync,
          L: LossFunction,
{
    sequence.iter()
        .map(|snapshot| StepMetrics::from_snapshot(snapshot, loss))
        .collect()
}
