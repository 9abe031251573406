//! Defines some common functions used in this library.

/// Defines loss function trait and its instances.
pub mod loss_functions;

/// Defines some useful numeric helpers such as the sigmoid.
pub mod utils;

/// Defines some checker functions.
pub(crate) mod checker;

pub use loss_functions::{
    LossFunction,
    Loss,
    LossValue,
};
