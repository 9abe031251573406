//! Provides the step rules that drive each simulated learning curve.

mod core;

mod adaboost;
mod gradient_boost;
mod xgboost;


/// Step rule trait and the snapshot types.
pub use self::core::{
    StepRule,
    Snapshot,
    Annotated,
};

// ------------------------------------------------
// Weight escalation
pub use self::adaboost::{AdaBoost, WeightedPoint};

// ------------------------------------------------
// Residual correction
pub use self::gradient_boost::{
    GradientBoost,
    ResidualPoint,
    corrected_prediction,
};

// ------------------------------------------------
// Sigmoid of cumulative contributions
pub use self::xgboost::{
    XGBoost,
    MarginPoint,
    contribution,
    contributions,
};
