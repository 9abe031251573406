use serde::{Deserialize, Serialize};

use crate::constants::LOG_LOSS_EPS;


/// This trait defines the loss functions
/// reported next to the classification metrics.
pub trait LossFunction {
    /// The name of the loss function.
    fn name(&self) -> &str;


    /// Loss value over a whole snapshot.
    /// `scores[i]` is the score in `[0, 1]` for the `i`-th point
    /// and `target[i]` is its target.
    /// An empty snapshot has loss `0`.
    fn eval(&self, scores: &[f64], target: &[f64]) -> LossValue;
}


/// The loss reported by each simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// No loss is reported. AdaBoost reports accuracy only.
    None,

    /// Mean absolute error and root mean squared error
    /// of the residuals `target - score`.
    Residual,

    /// Mean binary cross entropy with `1e-9` smoothing.
    Logistic,
}


/// A loss value computed by [`Loss`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LossValue {
    /// No loss.
    None,

    /// `MAE` and `RMSE` of the residuals.
    Residual {
        /// Mean absolute error.
        mae: f64,
        /// Root mean squared error.
        rmse: f64,
    },

    /// Mean log-loss.
    LogLoss {
        /// The loss value.
        value: f64,
    },
}


impl LossValue {
    /// Returns the headline value of this loss:
    /// `MAE` for residual losses, the log-loss for logistic losses.
    pub fn primary(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Residual { mae, .. } => Some(*mae),
            Self::LogLoss { value } => Some(*value),
        }
    }
}


/// Binary cross entropy at a single point.
#[inline(always)]
pub fn log_loss_at(score: f64, target: f64) -> f64 {
    -(
        target * (score + LOG_LOSS_EPS).ln()
        + (1.0 - target) * (1.0 - score + LOG_LOSS_EPS).ln()
    )
}


impl LossFunction for Loss {
    fn name(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Residual => "MAE / RMSE",
            Self::Logistic => "Log loss",
        }
    }


    fn eval(&self, scores: &[f64], target: &[f64]) -> LossValue {
        assert_eq!(scores.len(), target.len());
        let n_items = scores.len() as f64;

        match self {
            Self::None => LossValue::None,
            Self::Residual => {
                if scores.is_empty() {
                    return LossValue::Residual { mae: 0.0, rmse: 0.0 };
                }
                let (abs, sq) = scores.iter()
                    .zip(target)
                    .map(|(s, y)| y - s)
                    .fold((0.0, 0.0), |(a, q), r| (a + r.abs(), q + r * r));
                LossValue::Residual {
                    mae: abs / n_items,
                    rmse: (sq / n_items).sqrt(),
                }
            },
            Self::Logistic => {
                if scores.is_empty() {
                    return LossValue::LogLoss { value: 0.0 };
                }
                let value = scores.iter()
                    .zip(target)
                    .map(|(&s, &y)| log_loss_at(s, y))
                    .sum::<f64>()
                    / n_items;
                LossValue::LogLoss { value }
            },
        }
    }
}
