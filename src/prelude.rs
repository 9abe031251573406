//! Exports the simulations, the metrics, and the playback types.
//!
pub use crate::booster::{
    // Step rule trait
    StepRule,
    Snapshot,
    Annotated,


    // Simulations ------------------------------
    AdaBoost,
    GradientBoost,
    XGBoost,


    // Annotated points -------------------------
    WeightedPoint,
    ResidualPoint,
    MarginPoint,
};


pub use crate::sample::{
    Dataset,
    LabeledPoint,
    Schema,
    LabelRule,
    Record,
    Scenario,

    // Loading ----------------------------------
    Domain,
    DataProvider,
    JsonDirectory,
    load_or_empty,
};


pub use crate::common::{
    Loss,
    LossFunction,
    LossValue,
};


pub use crate::research::{
    ConfusionMatrix,
    StepMetrics,
    ResidualHistogram,
    Logger,
    evaluate,
};


pub use crate::playback::{
    Playback,
    Intent,
    EndBehavior,
    Ticker,
    Advance,
};


pub use crate::algorithm::Algorithm;
pub use crate::config::{Settings, Slider};
pub use crate::session::{Session, Frame};
