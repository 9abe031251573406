//! Provides the sigmoid/logit contribution rule of the simulated [`XGBoost`].
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    Dataset,
    LabeledPoint,
    booster::{Annotated, Snapshot, StepRule},
    common::{checker, utils, Loss},
    constants::*,
};


/// A point annotated with its cumulative contribution (the margin),
/// its score, and its residual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginPoint {
    /// The underlying point.
    #[serde(flatten)]
    pub point: LabeledPoint,
    /// Position-derived strength of every contribution.
    pub influence: f64,
    /// Sum of the contributions so far.
    pub margin: f64,
    /// `sigmoid(2 * margin)`.
    pub score: f64,
    /// `target - score`.
    pub residual: f64,
}


impl MarginPoint {
    fn new(point: LabeledPoint, influence: f64, margin: f64) -> Self {
        let score = utils::sigmoid(XGB_SCORE_SCALE * margin);
        let residual = point.target - score;
        Self { point, influence, margin, score, residual }
    }
}


impl Annotated for MarginPoint {
    fn point(&self) -> &LabeledPoint {
        &self.point
    }


    fn score(&self) -> f64 {
        self.score
    }
}


/// The contribution added to a point's margin at `step` (0-based):
///
/// ```txt
/// eta * 0.85^step * influence * (1 - exp(-0.4 * (step + 1))) * (step + 1) * sign
/// ```
///
/// where `sign` is `+1` for positive points and `-1` otherwise.
#[inline(always)]
pub fn contribution(
    learning_rate: f64,
    influence: f64,
    target: f64,
    step: usize,
) -> f64
{
    let sign = if target >= DECISION_THRESHOLD { 1.0 } else { -1.0 };
    let k = (step + 1) as f64;
    let eta = learning_rate * XGB_DECAY.powi(step as i32);
    let saturation = 1.0 - (-XGB_SATURATION * k).exp();
    eta * influence * saturation * k * sign
}


/// The contributions of the first `n_steps` steps.
pub fn contributions(
    learning_rate: f64,
    influence: f64,
    target: f64,
    n_steps: usize,
) -> Vec<f64>
{
    (0..n_steps).map(|s| contribution(learning_rate, influence, target, s))
        .collect()
}


/// The simulated XGBoost.
///
/// Each point gets an **influence** from its normalized position,
/// `(2 x_norm - 1) + (2 y_norm - 1)`.
/// Step `s` adds [`contribution`] to the point's margin
/// and the score is `sigmoid(2 * margin)`,
/// so a score is above `0.5` exactly when the margin is positive.
///
/// # Example
/// ```no_run
/// use boostsim::prelude::*;
///
/// let dataset = Scenario::SensorFailure.generate(&mut rand::thread_rng());
/// let mut booster = XGBoost::init(&dataset)
///     .learning_rate(0.3);
/// let sequence = booster.run();
/// assert_eq!(sequence.len(), 6);
/// ```
pub struct XGBoost<'a> {
    // Dataset to annotate.
    dataset: &'a Dataset,

    // Step size `eta` in `(0, 1]`.
    learning_rate: f64,
}


impl<'a> XGBoost<'a> {
    /// Initialize the `XGBoost`.
    pub fn init(dataset: &'a Dataset) -> Self {
        Self { dataset, learning_rate: DEFAULT_LEARNING_RATE }
    }


    /// Set the learning rate.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        checker::check_learning_rate(learning_rate);
        self.learning_rate = learning_rate;
        self
    }


    /// Returns the influence of every point.
    pub fn influences(&self) -> Vec<f64> {
        let x_range = self.dataset.x_range().unwrap_or((0.0, 0.0));
        let y_range = self.dataset.y_range().unwrap_or((0.0, 0.0));

        self.dataset.points()
            .par_iter()
            .map(|p| {
                let x_norm = utils::normalize(p.x, x_range, NORMALIZE_EPS);
                let y_norm = utils::normalize(p.y, y_range, NORMALIZE_EPS);
                (x_norm * 2.0 - 1.0) + (y_norm * 2.0 - 1.0)
            })
            .collect()
    }
}


impl StepRule for XGBoost<'_> {
    type Point = MarginPoint;


    fn name(&self) -> &str {
        "XGBoost"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of examples", format!("{}", self.dataset.len())),
            ("Learning rate", format!("{}", self.learning_rate)),
        ]);
        Some(info)
    }


    fn loss(&self) -> Loss {
        Loss::Logistic
    }


    fn max_steps(&self) -> usize {
        XGB_STEPS
    }


    fn initial(&mut self) -> Vec<MarginPoint> {
        let learning_rate = self.learning_rate;
        self.dataset.points()
            .par_iter()
            .zip(self.influences())
            .map(|(p, influence)| {
                let margin = contribution(learning_rate, influence, p.target, 0);
                MarginPoint::new(*p, influence, margin)
            })
            .collect()
    }


    fn advance(&mut self, prev: &Snapshot<MarginPoint>, step: usize)
        -> Vec<MarginPoint>
    {
        let learning_rate = self.learning_rate;
        prev.points()
            .par_iter()
            .map(|p| {
                let c = contribution(
                    learning_rate, p.influence, p.point.target, step
                );
                MarginPoint::new(p.point, p.influence, p.margin + c)
            })
            .collect()
    }
}
