//! Provides the residual-correction rule of the simulated [`GradientBoost`].
use rand::prelude::*;
use rand_distr::Uniform;
use serde::Serialize;

use crate::{
    Dataset,
    LabeledPoint,
    booster::{Annotated, Snapshot, StepRule},
    common::{checker, utils, Loss},
    constants::*,
};


/// A point annotated with a continuous prediction and its residual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualPoint {
    /// The underlying point.
    #[serde(flatten)]
    pub point: LabeledPoint,
    /// Current prediction in `[0.01, 0.99]`.
    pub pred: f64,
    /// `target - pred`.
    pub residual: f64,
}


impl Annotated for ResidualPoint {
    fn point(&self) -> &LabeledPoint {
        &self.point
    }


    fn score(&self) -> f64 {
        self.pred
    }
}


/// Returns the prediction after one correction:
///
/// ```txt
/// clip(pred + eta * (target - pred) * 0.8^round + jitter, 0.01, 0.99)
/// ```
///
/// where `round` is the 0-based index of the snapshot being corrected.
#[inline(always)]
pub fn corrected_prediction(
    pred: f64,
    target: f64,
    learning_rate: f64,
    round: usize,
    jitter: f64,
) -> f64
{
    let decay = GBM_DECAY.powi(round as i32);
    let correction = learning_rate * (target - pred) * decay;
    utils::clip(pred + correction + jitter, GBM_PRED_LOWER, GBM_PRED_UPPER)
}


/// Draws from `U(-amplitude / 2, amplitude / 2)`.
#[inline(always)]
fn symmetric_noise<R: Rng>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude <= 0.0 {
        return 0.0;
    }
    let half = amplitude / 2.0;
    Uniform::new(-half, half).sample(rng)
}


/// The simulated Gradient Boosting.
///
/// The base model predicts a noisy linear function of the normalized `x`,
/// clipped to `[0.1, 0.9]`.
/// Every step records the residual `target - pred`
/// and moves each prediction by
/// `eta * residual * 0.8^step` plus a small symmetric jitter.
/// Predictions stay in `[0.01, 0.99]`.
///
/// # Example
/// ```no_run
/// use boostsim::prelude::*;
///
/// let dataset = Scenario::Maintenance.generate(&mut rand::thread_rng());
/// let mut booster = GradientBoost::init(&dataset)
///     .learning_rate(0.3)
///     .seed(1234);
/// let sequence = booster.run();
/// assert_eq!(sequence.len(), 8);
/// ```
pub struct GradientBoost<'a> {
    // Dataset to annotate.
    dataset: &'a Dataset,

    // Step size `eta` in `(0, 1]`.
    learning_rate: f64,

    // Width of the noise on the base predictions.
    base_noise: f64,

    // Width of the jitter added on every correction.
    jitter: f64,

    rng: StdRng,
}


impl<'a> GradientBoost<'a> {
    /// Initialize the `GradientBoost`.
    /// The noise comes from OS entropy unless [`GradientBoost::seed`]
    /// is called.
    pub fn init(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            learning_rate: DEFAULT_LEARNING_RATE,
            base_noise: GBM_BASE_NOISE,
            jitter: GBM_JITTER,
            rng: StdRng::from_entropy(),
        }
    }


    /// Set the learning rate.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        checker::check_learning_rate(learning_rate);
        self.learning_rate = learning_rate;
        self
    }


    /// Set the width of the jitter added on every correction.
    /// `0` disables it.
    pub fn jitter(mut self, amplitude: f64) -> Self {
        checker::check_jitter(amplitude);
        self.jitter = amplitude;
        self
    }


    /// Set the width of the noise on the base predictions.
    /// `0` disables it.
    pub fn base_noise(mut self, amplitude: f64) -> Self {
        checker::check_jitter(amplitude);
        self.base_noise = amplitude;
        self
    }


    /// Seed the random number generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}


impl StepRule for GradientBoost<'_> {
    type Point = ResidualPoint;


    fn name(&self) -> &str {
        "Gradient Boosting"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of examples", format!("{}", self.dataset.len())),
            ("Learning rate", format!("{}", self.learning_rate)),
            ("Jitter", format!("{}", self.jitter)),
        ]);
        Some(info)
    }


    fn loss(&self) -> Loss {
        Loss::Residual
    }


    fn max_steps(&self) -> usize {
        GBM_STEPS
    }


    fn initial(&mut self) -> Vec<ResidualPoint> {
        let points = self.dataset.points();
        let max_x = points.iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);

        let rng = &mut self.rng;
        let base_noise = self.base_noise;
        points.iter()
            .map(|p| {
                let x_norm = if max_x > 0.0 { p.x / max_x } else { 0.0 };
                let noise = symmetric_noise(rng, base_noise);
                let pred = utils::clip(
                    x_norm * GBM_BASE_SLOPE + noise,
                    GBM_BASE_LOWER,
                    GBM_BASE_UPPER,
                );
                ResidualPoint { point: *p, pred, residual: p.target - pred }
            })
            .collect()
    }


    fn advance(&mut self, prev: &Snapshot<ResidualPoint>, step: usize)
        -> Vec<ResidualPoint>
    {
        let round = step - 1;
        let rng = &mut self.rng;
        let (learning_rate, jitter) = (self.learning_rate, self.jitter);

        prev.points()
            .iter()
            .map(|p| {
                let noise = symmetric_noise(rng, jitter);
                let target = p.point.target;
                let pred = corrected_prediction(
                    p.pred, target, learning_rate, round, noise
                );
                ResidualPoint { point: p.point, pred, residual: target - pred }
            })
            .collect()
    }
}
