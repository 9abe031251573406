//! Defines the simulated `AdaBoost`.
//! Misclassified points gain weight until a later learner
//! "corrects" them, closest-to-boundary first.
mod adaboost_algorithm;

pub use adaboost_algorithm::{AdaBoost, WeightedPoint};
