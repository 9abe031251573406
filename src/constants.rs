//! Numeric constants shared by the simulations.
//!
//! The values are tuned for a visually plausible animation,
//! not for fidelity to the real algorithms.

// ------------------------------------------------
// Step counts
pub const ADABOOST_STEPS: usize = 5;
pub const GBM_STEPS:      usize = 8;
pub const XGB_STEPS:      usize = 6;

// ------------------------------------------------
// AdaBoost sample weights
pub const BASE_WEIGHT:      f64 = 1.0;
pub const HARD_WEIGHT:      f64 = 2.4;
pub const ESCALATED_WEIGHT: f64 = 2.2;
pub const CORRECTED_WEIGHT: f64 = 0.9;

// ------------------------------------------------
// Gradient Boosting
pub const GBM_DECAY:           f64 = 0.8;
pub const GBM_BASE_SLOPE:      f64 = 0.6;
pub const GBM_BASE_NOISE:      f64 = 0.1;
pub const GBM_BASE_LOWER:      f64 = 0.1;
pub const GBM_BASE_UPPER:      f64 = 0.9;
pub const GBM_PRED_LOWER:      f64 = 0.01;
pub const GBM_PRED_UPPER:      f64 = 0.99;
pub const GBM_JITTER:          f64 = 0.005;

// ------------------------------------------------
// XGBoost
pub const XGB_DECAY:       f64 = 0.85;
pub const XGB_SATURATION:  f64 = 0.4;
pub const XGB_SCORE_SCALE: f64 = 2.0;
pub const NORMALIZE_EPS:   f64 = 1e-9;

// ------------------------------------------------
// Metrics
pub const DECISION_THRESHOLD: f64 = 0.5;
pub const LOG_LOSS_EPS:       f64 = 1e-9;
pub const RESIDUAL_BIN_WIDTH: f64 = 0.25;
pub const RESIDUAL_BIN_START: f64 = -1.0;
pub const RESIDUAL_BINS:    usize = 8;

// ------------------------------------------------
// Hyperparameter defaults
pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

// ------------------------------------------------
// Playback intervals (milliseconds)
pub const ADABOOST_INTERVAL_MILLIS: u64 = 1_200;
pub const GBM_INTERVAL_MILLIS:      u64 = 1_200;
pub const XGB_INTERVAL_MILLIS:      u64 = 2_500;

// ------------------------------------------------
// Demo dataset sizes
pub const SUBSCRIPTION_SAMPLES: usize =  80;
pub const MAINTENANCE_SAMPLES:  usize =  50;
pub const SENSOR_SAMPLES:       usize = 100;
