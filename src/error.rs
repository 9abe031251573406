//! Error types for the fallible boundaries of this crate:
//! reading datasets and reading settings.
//! The simulations themselves never fail on well-formed input.

use std::path::PathBuf;

use thiserror::Error;


/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The domain key does not name a known dataset.
    #[error("Unknown dataset domain `{0}`")]
    UnknownDomain(String),

    /// Failed to read the dataset file.
    #[error("Failed to read dataset file {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The dataset file is not valid JSON.
    #[error("Failed to parse dataset file {path}: {source}")]
    Parse {
        /// The file that could not be parsed.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// The dataset is valid JSON but not an array of flat records.
    #[error("Dataset `{0}` is not an array of records")]
    NotRecords(String),

    /// A polars operation failed while converting a data frame.
    #[error("Failed to convert data frame: {0}")]
    Frame(#[from] polars::prelude::PolarsError),
}


/// Errors that can occur while reading [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the settings file.
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The settings file is not a valid settings document.
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
