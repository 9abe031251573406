//! Input ranges and page settings.
//!
//! Hyperparameters are clamped here, at the input boundary,
//! so the step rules never see an invalid value.

use serde::{Deserialize, Serialize};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::algorithm::Algorithm;
use crate::constants::DEFAULT_LEARNING_RATE;
use crate::error::ConfigError;
use crate::playback::EndBehavior;
use crate::sample::JsonDirectory;


/// A slider with a fixed minimum, maximum, and step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Distance between two notches.
    pub step: f64,
}


/// Learning rate of the Gradient Boosting page.
pub const GBM_LEARNING_RATE: Slider = Slider::new(0.1, 0.9, 0.1);

/// Learning rate of the XGBoost page.
pub const XGB_LEARNING_RATE: Slider = Slider::new(0.1, 0.5, 0.05);

/// Playback interval in milliseconds.
pub const PLAYBACK_INTERVAL_MILLIS: Slider = Slider::new(400.0, 2_000.0, 100.0);


impl Slider {
    /// Construct a new slider.
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }


    /// Snap `value` to the nearest notch and clamp it into `[min, max]`.
    /// A non-finite value maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let notches = ((value - self.min) / self.step).round();
        // Drop the floating point noise of `min + k * step`.
        let snapped = ((self.min + notches * self.step) * 1e6).round() / 1e6;
        snapped.clamp(self.min, self.max)
    }


    /// Returns `true` if `value` is in `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}


/// Settings of the pages.
/// Every field is optional in the JSON document.
///
/// ```json
/// { "gbm_learning_rate": 0.5, "auto_rotate": true, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial learning rate of the Gradient Boosting page.
    pub gbm_learning_rate: f64,
    /// Initial learning rate of the XGBoost page.
    pub xgb_learning_rate: f64,
    /// Playback interval; `None` keeps each page's default.
    pub interval_millis: Option<u64>,
    /// Loop the Gradient Boosting playback instead of stopping.
    pub auto_rotate: bool,
    /// Directory holding `<domain>.json`; `None` uses the bundled files.
    pub data_dir: Option<PathBuf>,
    /// Seed for the random parts of the simulations.
    pub seed: Option<u64>,
}


impl Default for Settings {
    fn default() -> Self {
        Self {
            gbm_learning_rate: DEFAULT_LEARNING_RATE,
            xgb_learning_rate: DEFAULT_LEARNING_RATE,
            interval_millis: None,
            auto_rotate: false,
            data_dir: None,
            seed: None,
        }
    }
}


impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }


    /// Read settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&text)
    }


    /// The clamped initial learning rate of `algorithm`,
    /// or `None` if the page has no learning rate.
    pub fn learning_rate(&self, algorithm: Algorithm) -> Option<f64> {
        let value = match algorithm {
            Algorithm::AdaBoost => return None,
            Algorithm::GradientBoost => self.gbm_learning_rate,
            Algorithm::XGBoost => self.xgb_learning_rate,
        };
        algorithm.learning_rate_slider()
            .map(|slider| slider.clamp(value))
    }


    /// The clamped playback interval of `algorithm`.
    pub fn interval(&self, algorithm: Algorithm) -> Duration {
        match self.interval_millis {
            Some(millis) => {
                let millis = PLAYBACK_INTERVAL_MILLIS.clamp(millis as f64);
                Duration::from_millis(millis as u64)
            },
            None => algorithm.interval(),
        }
    }


    /// The behavior at the last step of `algorithm`.
    pub fn end_behavior(&self, algorithm: Algorithm) -> EndBehavior {
        match algorithm {
            Algorithm::GradientBoost if self.auto_rotate => EndBehavior::Loop,
            _ => algorithm.end_behavior(),
        }
    }


    /// The data provider these settings point at.
    pub fn provider(&self) -> JsonDirectory {
        self.data_dir.as_ref()
            .map_or_else(JsonDirectory::bundled, JsonDirectory::new)
    }
}
