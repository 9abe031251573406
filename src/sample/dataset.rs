use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::point::LabeledPoint;
use crate::common::utils;
use crate::error::LoadError;


/// A flat record of a structured dataset file,
/// e.g., `{"age": 31, "balance": 1200.5, "subscribed": true}`.
pub type Record = serde_json::Map<String, Value>;


/// Names of the fields that make up a [`LabeledPoint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Field used for `LabeledPoint::x`.
    pub x: String,
    /// Field used for `LabeledPoint::y`.
    pub y: String,
    /// Field used for `LabeledPoint::target`.
    pub label: String,
}


impl Schema {
    /// Construct a new schema.
    pub fn new<S: ToString>(x: S, y: S, label: S) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            label: label.to_string(),
        }
    }
}


impl Default for Schema {
    fn default() -> Self {
        Self::new("x", "y", "label")
    }
}


/// How a raw label value is turned into a binary target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRule {
    /// `true`, non-zero numbers, and non-empty strings are positive.
    Truthy,

    /// If every label is a number,
    /// labels strictly above the upper median are positive.
    /// Otherwise falls back to [`LabelRule::Truthy`].
    AboveMedian,
}


/// Struct `Dataset` holds the labeled points of one page
/// together with the schema they were read with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<LabeledPoint>,
    schema: Schema,
}


impl Dataset {
    /// Construct a dataset from points that are already labeled.
    pub fn new(points: Vec<LabeledPoint>, schema: Schema) -> Self {
        Self { points, schema }
    }


    /// Construct an empty dataset.
    pub fn empty(schema: Schema) -> Self {
        Self::new(Vec::new(), schema)
    }


    /// Convert flat records into a dataset.
    /// Missing or non-numeric features become `0`.
    pub fn from_records(records: &[Record], schema: Schema, rule: LabelRule)
        -> Self
    {
        let labels = records.iter()
            .map(|r| r.get(&schema.label).unwrap_or(&Value::Null))
            .collect::<Vec<_>>();
        let targets = binarize_values(&labels, rule);

        let points = records.par_iter()
            .zip(targets)
            .enumerate()
            .map(|(i, (record, target))| {
                let x = record.get(&schema.x).map_or(0.0, numeric);
                let y = record.get(&schema.y).map_or(0.0, numeric);
                LabeledPoint::new(i, x, y, target)
            })
            .collect::<Vec<_>>();

        Self { points, schema }
    }


    /// Convert `polars::DataFrame` into `Dataset`.
    /// The columns named in `schema` are cast to `f64`;
    /// null entries become `0`.
    pub fn from_dataframe(data: &DataFrame, schema: Schema, rule: LabelRule)
        -> Result<Self, LoadError>
    {
        let xs = column_as_f64(data, &schema.x)?;
        let ys = column_as_f64(data, &schema.y)?;
        let labels = column_as_f64(data, &schema.label)?;

        let targets = match rule {
            LabelRule::Truthy => labels.iter()
                .map(|&v| truthy_number(v))
                .collect::<Vec<_>>(),
            LabelRule::AboveMedian => above_median(&labels),
        };

        let points = xs.into_par_iter()
            .zip(ys)
            .zip(targets)
            .enumerate()
            .map(|(i, ((x, y), t))| LabeledPoint::new(i, x, y, t))
            .collect::<Vec<_>>();

        Ok(Self { points, schema })
    }


    /// Returns a slice of the labeled points.
    pub fn points(&self) -> &[LabeledPoint] {
        &self.points[..]
    }


    /// Returns the schema this dataset was read with.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }


    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }


    /// Returns `true` if the dataset has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }


    /// Returns the first feature of every point.
    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }


    /// Returns the second feature of every point.
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }


    /// Returns the target of every point.
    pub fn targets(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.target).collect()
    }


    /// Returns `(min, max)` of the first feature.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        utils::min_max(self.points.iter().map(|p| p.x))
    }


    /// Returns `(min, max)` of the second feature.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        utils::min_max(self.points.iter().map(|p| p.y))
    }


    /// Returns the upper median of the first feature.
    pub fn median_x(&self) -> Option<f64> {
        utils::upper_median(self.xs())
    }
}


/// Numeric value of a feature field.
fn numeric(value: &Value) -> f64 {
    let v = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if v.is_finite() { v } else { 0.0 }
}


fn truthy(value: &Value) -> f64 {
    let flag = match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    };
    if flag { 1.0 } else { 0.0 }
}


fn truthy_number(v: f64) -> f64 {
    if v != 0.0 && !v.is_nan() { 1.0 } else { 0.0 }
}


fn above_median(labels: &[f64]) -> Vec<f64> {
    let median = utils::upper_median(labels).unwrap_or(0.0);
    labels.iter()
        .map(|&v| if v > median { 1.0 } else { 0.0 })
        .collect()
}


fn binarize_values(labels: &[&Value], rule: LabelRule) -> Vec<f64> {
    let all_numeric = labels.iter().all(|v| v.is_number());
    match rule {
        LabelRule::AboveMedian if all_numeric => {
            let labels = labels.iter()
                .map(|v| v.as_f64().unwrap_or(0.0))
                .collect::<Vec<_>>();
            above_median(&labels)
        },
        _ => labels.iter().map(|v| truthy(v)).collect(),
    }
}


fn column_as_f64(data: &DataFrame, name: &str) -> Result<Vec<f64>, LoadError> {
    let series = data.column(name)?
        .cast(&DataType::Float64)?;
    let values = series.f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect::<Vec<_>>();
    Ok(values)
}
