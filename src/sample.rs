//! Struct `Dataset` represents the fixed set of labeled 2D points
//! every simulation consumes.

// Provides the labeled point struct.
pub(crate) mod point;
// Provides the dataset struct.
pub(crate) mod dataset;
// Provides random demo datasets.
pub mod generator;
// Provides the data-provider abstraction.
pub(crate) mod loader;


pub use point::LabeledPoint;
pub use dataset::{Dataset, Schema, LabelRule, Record};
pub use generator::Scenario;
pub use loader::{
    DataProvider,
    Domain,
    JsonDirectory,
    load_or_empty,
};
