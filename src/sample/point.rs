use serde::{Deserialize, Serialize};

use crate::constants::DECISION_THRESHOLD;


/// One sample: two feature values and a target.
/// A point never changes once it is generated;
/// the step rules copy it into every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    /// Position of this point in its dataset.
    pub id: usize,
    /// First feature (e.g., age or temperature).
    pub x: f64,
    /// Second feature (e.g., balance or pressure).
    pub y: f64,
    /// Target value. Binary datasets use `0.0` and `1.0`.
    pub target: f64,
}


impl LabeledPoint {
    /// Construct a new point.
    #[inline(always)]
    pub fn new(id: usize, x: f64, y: f64, target: f64) -> Self {
        Self { id, x, y, target }
    }


    /// Returns the binary label of this point.
    /// Targets at or above `0.5` are positive.
    #[inline(always)]
    pub fn label(&self) -> u8 {
        u8::from(self.target >= DECISION_THRESHOLD)
    }


    /// Returns `+1` for positive points and `-1` otherwise.
    #[inline(always)]
    pub fn sign(&self) -> f64 {
        if self.label() == 1 { 1.0 } else { -1.0 }
    }
}
