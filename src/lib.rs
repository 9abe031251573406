#![warn(missing_docs)]

//!
//! A crate that simulates how three boosting algorithms learn,
//! one snapshot at a time, for an animated educational display.
//! No model is trained: every prediction, residual, and weight comes from
//! a closed-form rule tuned to look plausible.
//!
//! This crate includes three simulations.
//!
//! - [`AdaBoost`]
//!     Misclassified points gain weight and are corrected in batches,
//!     closest to the decision boundary first.
//!
//! - [`GradientBoost`]
//!     Predictions move a decaying fraction of their residual every step.
//!
//! - [`XGBoost`]
//!     Scores are the sigmoid of cumulative, decaying contributions.
//!
//! Each simulation is a [`StepRule`]; [`StepRule::run`] folds it
//! into a sequence of [`Snapshot`]s, and [`research::evaluate`]
//! turns a sequence into per-step [`StepMetrics`].
//! A [`Session`] bundles one page: dataset, sequence, metrics,
//! and the [`Playback`] state machine driven by a [`Ticker`].

pub mod algorithm;
pub mod booster;
pub mod common;
pub mod config;
#[allow(missing_docs)]
pub mod constants;
pub mod error;
pub mod playback;
pub mod prelude;
pub mod research;
pub mod sample;
pub mod session;


pub use algorithm::Algorithm;

pub use booster::{
    StepRule,
    Snapshot,
    Annotated,
    AdaBoost,
    GradientBoost,
    XGBoost,
    WeightedPoint,
    ResidualPoint,
    MarginPoint,
};

pub use common::{Loss, LossFunction, LossValue};
pub use config::{Settings, Slider};
pub use error::{ConfigError, LoadError};
pub use playback::{Playback, Intent, EndBehavior, Ticker, Advance};
pub use research::{ConfusionMatrix, StepMetrics, Logger};
pub use sample::{
    Dataset,
    LabeledPoint,
    Schema,
    LabelRule,
    Record,
    Scenario,
    Domain,
    DataProvider,
    JsonDirectory,
};
pub use session::{Session, Frame, Trace};
