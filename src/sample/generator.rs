//! Random demo datasets, one per algorithm page.
//! Every generator accepts any [`Rng`],
//! so callers may pass `thread_rng()` or a seeded `StdRng`.
use rand::prelude::*;

use serde::{Deserialize, Serialize};

use super::dataset::{Dataset, Schema};
use super::point::LabeledPoint;
use crate::constants::{
    SUBSCRIPTION_SAMPLES,
    MAINTENANCE_SAMPLES,
    SENSOR_SAMPLES,
};


/// The demo scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Bank customers; `age` mostly decides `subscribed`,
    /// with 15% of the labels flipped.
    Subscription,

    /// Machines; older machines with a low balance fail more often.
    Maintenance,

    /// Sensors; hot and high-pressure readings fail.
    SensorFailure,
}


impl Scenario {
    /// Default number of points of this scenario.
    pub fn n_sample(&self) -> usize {
        match self {
            Self::Subscription => SUBSCRIPTION_SAMPLES,
            Self::Maintenance => MAINTENANCE_SAMPLES,
            Self::SensorFailure => SENSOR_SAMPLES,
        }
    }


    /// Field names of this scenario.
    pub fn schema(&self) -> Schema {
        match self {
            Self::Subscription => Schema::new("age", "balance", "subscribed"),
            Self::Maintenance => Schema::new("age", "balance", "failure"),
            Self::SensorFailure => Schema::new("temperature", "pressure", "failure"),
        }
    }


    /// Generate `self.n_sample()` points.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        self.generate_n(rng, self.n_sample())
    }


    /// Generate `n_sample` points.
    pub fn generate_n<R: Rng + ?Sized>(&self, rng: &mut R, n_sample: usize)
        -> Dataset
    {
        let points = match self {
            Self::Subscription => subscription(rng, n_sample),
            Self::Maintenance => maintenance(rng, n_sample),
            Self::SensorFailure => sensor_failure(rng, n_sample),
        };
        Dataset::new(points, self.schema())
    }
}


fn subscription<R: Rng + ?Sized>(rng: &mut R, n_sample: usize)
    -> Vec<LabeledPoint>
{
    (0..n_sample).map(|i| {
            let age = rng.gen::<f64>() * 100.0;
            let shift = if age > 50.0 { 20.0 } else { -20.0 };
            // A balance cannot be negative.
            let balance = (rng.gen::<f64>() * 100.0 + shift).max(0.0);
            let label = if age > 50.0 { 1.0 } else { 0.0 };
            let flipped = rng.gen::<f64>() > 0.85;
            let target = if flipped { 1.0 - label } else { label };
            LabeledPoint::new(i, age, balance, target)
        })
        .collect()
}


fn maintenance<R: Rng + ?Sized>(rng: &mut R, n_sample: usize)
    -> Vec<LabeledPoint>
{
    (0..n_sample).map(|i| {
            let age = 20.0 + rng.gen::<f64>() * 60.0;
            let balance = rng.gen::<f64>() * 5_000.0;
            let at_risk = age > 40.0 && balance < 2_500.0;
            let cut = if at_risk { 0.3 } else { 0.7 };
            let target = if rng.gen::<f64>() > cut { 1.0 } else { 0.0 };
            LabeledPoint::new(i, age, balance, target)
        })
        .collect()
}


fn sensor_failure<R: Rng + ?Sized>(rng: &mut R, n_sample: usize)
    -> Vec<LabeledPoint>
{
    (0..n_sample).map(|i| {
            let temperature = 20.0 + rng.gen::<f64>() * 60.0;
            let pressure = 100.0 + rng.gen::<f64>() * 150.0;
            let noise = (rng.gen::<f64>() - 0.5) * 20.0;
            let failed = temperature > 50.0 && pressure > 175.0 + noise;
            let target = if failed { 1.0 } else { 0.0 };
            LabeledPoint::new(i, temperature, pressure, target)
        })
        .collect()
}
