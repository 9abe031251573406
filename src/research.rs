//! This directory provides what a page shows next to a snapshot.
//! Measure the followings of every simulated step
//! - Accuracy, precision, recall, and F1
//! - MAE / RMSE or log-loss
//! - Residual histogram and tree contribution (Gradient Boosting)

/// Defines the per-step metric aggregator.
pub mod metrics;

/// Defines the Gradient Boosting diagnostics.
pub mod diagnostics;

/// Defines a reporter that runs a step rule with logging.
pub mod logger;

pub use metrics::{
    ConfusionMatrix,
    StepMetrics,
    evaluate,
};

pub use diagnostics::{
    HistogramBin,
    ResidualHistogram,
    mean_abs_residual,
    tree_contribution,
};

pub use logger::{Logger, Report};
