//! Provides the weight-escalation rule of the simulated [`AdaBoost`].
use fixedbitset::FixedBitSet;
use serde::Serialize;


use crate::{
    Dataset,
    LabeledPoint,
    booster::{Annotated, Snapshot, StepRule},
    constants::{
        ADABOOST_STEPS,
        BASE_WEIGHT,
        HARD_WEIGHT,
        ESCALATED_WEIGHT,
        CORRECTED_WEIGHT,
    },
};


/// A point annotated with a predicted label and a sample weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedPoint {
    /// The underlying point.
    #[serde(flatten)]
    pub point: LabeledPoint,
    /// Predicted label, `0` or `1`.
    pub predicted: u8,
    /// Sample emphasis. Starts at `1`.
    pub weight: f64,
}


impl Annotated for WeightedPoint {
    fn point(&self) -> &LabeledPoint {
        &self.point
    }


    fn score(&self) -> f64 {
        self.predicted as f64
    }


    fn predicted_label(&self) -> u8 {
        self.predicted
    }
}


/// The simulated `AdaBoost`.
///
/// The first weak learner is a vertical boundary at `threshold`
/// (the upper median of `x` by default) that predicts `1` for `x >= threshold`.
/// The points it gets wrong are the **hard points**.
///
/// - Snapshot `0`: hard points have weight `2.4`, the others `1`.
/// - Snapshots `1..5`: the hard points, ordered by their distance to the
///   boundary (stable, closest first), are split into near-equal batches.
///   Step `s` corrects batch `s - 1`: the prediction becomes the true label
///   and the weight becomes `0.9`.
///   Hard points that are still wrong get weight `2.2`.
///
/// No actual weak learner is trained.
///
/// # Example
/// ```no_run
/// use boostsim::prelude::*;
///
/// let dataset = Scenario::Subscription.generate(&mut rand::thread_rng());
/// let mut booster = AdaBoost::init(&dataset);
/// let sequence = booster.run();
///
/// let first = sequence[0].n_misclassified();
/// let last = sequence[sequence.len() - 1].n_misclassified();
/// assert!(last <= first);
/// ```
pub struct AdaBoost<'a> {
    // Dataset to annotate.
    dataset: &'a Dataset,

    // Optional. If this value is `Some(t)`,
    // the boundary is placed at `t` instead of the median.
    threshold: Option<f64>,

    // The boundary used by the last call of `initial`.
    boundary: f64,

    // Hard points by position.
    hard: FixedBitSet,

    // Hard points ordered by distance to the boundary.
    schedule: Vec<usize>,

    // Number of hard points corrected per step.
    batch_size: usize,
}


impl<'a> AdaBoost<'a> {
    /// Initialize the `AdaBoost`.
    pub fn init(dataset: &'a Dataset) -> Self {
        let n_sample = dataset.len();
        Self {
            dataset,
            threshold: None,
            boundary: dataset.median_x().unwrap_or(0.0),
            hard: FixedBitSet::with_capacity(n_sample),
            schedule: Vec::new(),
            batch_size: 1,
        }
    }


    /// Place the boundary at `threshold` instead of the median of `x`.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }


    /// Returns the decision boundary.
    pub fn boundary(&self) -> f64 {
        self.threshold.unwrap_or(self.boundary)
    }


    /// Returns `true` if the `i`-th point is a hard point.
    /// Valid after [`StepRule::initial`] or [`StepRule::run`].
    pub fn is_hard(&self, i: usize) -> bool {
        self.hard.contains(i)
    }


    /// Returns the positions of the hard points in ascending order.
    pub fn hard_points(&self) -> Vec<usize> {
        self.hard.ones().collect()
    }


    /// Returns the hard points in the order they are corrected.
    pub fn schedule(&self) -> &[usize] {
        &self.schedule[..]
    }


    /// Returns the number of hard points corrected per step.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}


impl StepRule for AdaBoost<'_> {
    type Point = WeightedPoint;


    fn name(&self) -> &str {
        "AdaBoost"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of examples", format!("{}", self.dataset.len())),
            ("Boundary", format!("{:.3}", self.boundary())),
            ("# of hard points", format!("{}", self.hard.count_ones(..))),
            ("Batch size", format!("{}", self.batch_size)),
        ]);
        Some(info)
    }


    fn max_steps(&self) -> usize {
        ADABOOST_STEPS
    }


    fn initial(&mut self) -> Vec<WeightedPoint> {
        let dataset = self.dataset;
        let points = dataset.points();
        let n_sample = points.len();
        self.boundary = self.threshold
            .or_else(|| dataset.median_x())
            .unwrap_or(0.0);
        let boundary = self.boundary;

        self.hard = FixedBitSet::with_capacity(n_sample);
        let annotated = points.iter()
            .enumerate()
            .map(|(i, p)| {
                let predicted = u8::from(p.x >= boundary);
                let hard = predicted != p.label();
                if hard {
                    self.hard.insert(i);
                }
                let weight = if hard { HARD_WEIGHT } else { BASE_WEIGHT };
                WeightedPoint { point: *p, predicted, weight }
            })
            .collect::<Vec<_>>();


        // `sort_by` is stable, so ties keep dataset order.
        let mut schedule = self.hard.ones().collect::<Vec<_>>();
        schedule.sort_by(|&i, &j| {
            let di = (points[i].x - boundary).abs();
            let dj = (points[j].x - boundary).abs();
            di.total_cmp(&dj)
        });
        self.schedule = schedule;

        let n_batches = self.max_steps().saturating_sub(1).max(1);
        let n_hard = self.schedule.len();
        self.batch_size = ((n_hard + n_batches - 1) / n_batches).max(1);

        annotated
    }


    fn advance(&mut self, prev: &Snapshot<WeightedPoint>, step: usize)
        -> Vec<WeightedPoint>
    {
        let mut next = prev.points().to_vec();

        let start = (step - 1) * self.batch_size;
        let batch = self.schedule.iter()
            .skip(start)
            .take(self.batch_size);
        for &i in batch {
            next[i].predicted = next[i].point.label();
            next[i].weight = CORRECTED_WEIGHT;
        }

        for (i, p) in next.iter_mut().enumerate() {
            if !self.hard.contains(i) {
                p.weight = BASE_WEIGHT;
            } else if p.is_misclassified() {
                p.weight = ESCALATED_WEIGHT;
            }
        }

        next
    }
}
