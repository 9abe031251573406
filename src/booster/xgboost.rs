//! Defines the simulated XGBoost.
//! Scores are the sigmoid of cumulative, decaying contributions.
mod xgb;

pub use xgb::{
    XGBoost,
    MarginPoint,
    contribution,
    contributions,
};
