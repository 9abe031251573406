//! Defines the simulated Gradient Boosting.
//! Each step moves every prediction a decayed fraction of its residual.
mod gbm;

pub use gbm::{
    GradientBoost,
    ResidualPoint,
    corrected_prediction,
};
