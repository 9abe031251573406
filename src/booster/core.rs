//! Provides the `StepRule` trait.

use serde::Serialize;

use crate::sample::LabeledPoint;
use crate::common::Loss;
use crate::constants::DECISION_THRESHOLD;


/// A point annotated by a step rule.
pub trait Annotated {
    /// The underlying labeled point.
    fn point(&self) -> &LabeledPoint;


    /// A score in `[0, 1]`.
    /// Binary predictions use `0` or `1`.
    fn score(&self) -> f64;


    /// The predicted label at threshold `0.5`.
    fn predicted_label(&self) -> u8 {
        u8::from(self.score() >= DECISION_THRESHOLD)
    }


    /// Returns `true` if the predicted label differs from the true label.
    fn is_misclassified(&self) -> bool {
        self.predicted_label() != self.point().label()
    }
}


/// The annotated dataset at one simulated iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<P> {
    step: usize,
    points: Vec<P>,
}


impl<P> Snapshot<P> {
    /// Construct a new snapshot of `step`.
    pub fn new(step: usize, points: Vec<P>) -> Self {
        Self { step, points }
    }


    /// The 0-based step index.
    pub fn step(&self) -> usize {
        self.step
    }


    /// Returns a slice of the annotated points.
    pub fn points(&self) -> &[P] {
        &self.points[..]
    }


    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }


    /// Returns `true` if the snapshot has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}


impl<P: Annotated> Snapshot<P> {
    /// Returns the number of misclassified points.
    pub fn n_misclassified(&self) -> usize {
        self.points.iter()
            .filter(|p| p.is_misclassified())
            .count()
    }
}


/// The trait [`StepRule`] defines how one simulated boosting algorithm
/// moves from one snapshot to the next.
///
/// A sequence is a deterministic fold:
/// snapshot `0` comes from [`StepRule::initial`], and
/// snapshot `s + 1` comes from [`StepRule::advance`] applied to snapshot `s`
/// and the hyperparameters the rule holds.
/// The number of snapshots is fixed by [`StepRule::max_steps`].
///
/// # Required Methods
/// - [`StepRule::name`]
/// - [`StepRule::max_steps`]
/// - [`StepRule::initial`]
/// - [`StepRule::advance`]
/// - [`StepRule::info`] ... optional.
/// - [`StepRule::loss`] ... optional.
///
/// # Provided Methods
/// - [`StepRule::run`]
pub trait StepRule {
    /// The annotated point type of this rule.
    type Point: Annotated + Clone;


    /// Returns the name of the simulated algorithm.
    fn name(&self) -> &str;


    /// Returns the hyperparameters of the rule as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// The loss reported next to the classification metrics.
    fn loss(&self) -> Loss {
        Loss::None
    }


    /// The number of snapshots in a sequence.
    fn max_steps(&self) -> usize;


    /// Annotate the dataset for snapshot `0`.
    fn initial(&mut self) -> Vec<Self::Point>;


    /// Derive snapshot `step` from snapshot `step - 1`.
    fn advance(&mut self, prev: &Snapshot<Self::Point>, step: usize)
        -> Vec<Self::Point>;


    /// A main function that builds the whole sequence.
    /// An empty dataset yields an empty sequence.
    fn run(&mut self) -> Vec<Snapshot<Self::Point>> {
        let first = self.initial();
        if first.is_empty() {
            return Vec::new();
        }

        let n_steps = self.max_steps();
        let mut sequence = Vec::with_capacity(n_steps);
        sequence.push(Snapshot::new(0, first));

        for step in 1..n_steps {
            let next = self.advance(&sequence[step - 1], step);
            sequence.push(Snapshot::new(step, next));
        }

        tracing::debug!(rule = self.name(), n_steps, "sequence built");
        sequence
    }
}
