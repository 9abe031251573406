//! The three simulated algorithms and their page-level defaults.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::common::Loss;
use crate::config::{self, Slider};
use crate::constants::*;
use crate::playback::EndBehavior;
use crate::sample::{LabelRule, Scenario};


/// The simulated algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Weight escalation on misclassified points.
    AdaBoost,
    /// Residual correction.
    GradientBoost,
    /// Sigmoid of cumulative contributions.
    XGBoost,
}


impl Algorithm {
    /// Every algorithm, in page order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::AdaBoost,
        Algorithm::GradientBoost,
        Algorithm::XGBoost,
    ];


    /// The key of the page, e.g., `"gradientboost"`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::AdaBoost => "adaboost",
            Self::GradientBoost => "gradientboost",
            Self::XGBoost => "xgboost",
        }
    }


    /// The display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AdaBoost => "AdaBoost",
            Self::GradientBoost => "Gradient Boosting",
            Self::XGBoost => "XGBoost",
        }
    }


    /// The fixed number of snapshots.
    pub fn max_steps(&self) -> usize {
        match self {
            Self::AdaBoost => ADABOOST_STEPS,
            Self::GradientBoost => GBM_STEPS,
            Self::XGBoost => XGB_STEPS,
        }
    }


    /// The loss reported next to the classification metrics.
    pub fn loss(&self) -> Loss {
        match self {
            Self::AdaBoost => Loss::None,
            Self::GradientBoost => Loss::Residual,
            Self::XGBoost => Loss::Logistic,
        }
    }


    /// How raw labels become binary targets on this page.
    pub fn label_rule(&self) -> LabelRule {
        match self {
            Self::AdaBoost => LabelRule::AboveMedian,
            Self::GradientBoost | Self::XGBoost => LabelRule::Truthy,
        }
    }


    /// The demo dataset of this page.
    pub fn scenario(&self) -> Scenario {
        match self {
            Self::AdaBoost => Scenario::Subscription,
            Self::GradientBoost => Scenario::Maintenance,
            Self::XGBoost => Scenario::SensorFailure,
        }
    }


    /// The learning-rate slider, if the page has one.
    pub fn learning_rate_slider(&self) -> Option<Slider> {
        match self {
            Self::AdaBoost => None,
            Self::GradientBoost => Some(config::GBM_LEARNING_RATE),
            Self::XGBoost => Some(config::XGB_LEARNING_RATE),
        }
    }


    /// The default playback interval.
    pub fn interval(&self) -> Duration {
        let millis = match self {
            Self::AdaBoost => ADABOOST_INTERVAL_MILLIS,
            Self::GradientBoost => GBM_INTERVAL_MILLIS,
            Self::XGBoost => XGB_INTERVAL_MILLIS,
        };
        Duration::from_millis(millis)
    }


    /// The default behavior at the last step.
    pub fn end_behavior(&self) -> EndBehavior {
        match self {
            Self::AdaBoost | Self::GradientBoost => EndBehavior::Stop,
            Self::XGBoost => EndBehavior::Rewind,
        }
    }
}


impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


/// The key does not name an algorithm page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);


impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|a| a.key() == key)
            .ok_or_else(|| UnknownAlgorithm(key.to_string()))
    }
}
