use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dataset::{Dataset, LabelRule, Record, Schema};
use crate::error::LoadError;


/// The bundled datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Customer subscription data (`age`, `balance`, `subscribed`).
    Banking,
    /// Industrial process data (`temperature`, `pressure`, `failure`).
    Automation,
}


impl Domain {
    /// Every known domain.
    pub const ALL: [Domain; 2] = [Domain::Banking, Domain::Automation];


    /// The key that selects this domain, e.g., `"banking"`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Banking => "banking",
            Self::Automation => "automation",
        }
    }


    /// Field names of this domain.
    pub fn schema(&self) -> Schema {
        match self {
            Self::Banking => Schema::new("age", "balance", "subscribed"),
            Self::Automation => Schema::new("temperature", "pressure", "failure"),
        }
    }


    /// Load this domain from `provider` and convert it to a [`Dataset`].
    /// A failed load yields an empty dataset.
    pub fn dataset<D>(&self, provider: &D, rule: LabelRule) -> Dataset
        where D: DataProvider + ?Sized
    {
        let records = load_or_empty(provider, self.key());
        Dataset::from_records(&records, self.schema(), rule)
    }
}


impl FromStr for Domain {
    type Err = LoadError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|d| d.key() == key)
            .ok_or_else(|| LoadError::UnknownDomain(key.to_string()))
    }
}


/// A source of flat records selected by a domain key.
/// Pages receive a provider instead of reaching for global state.
pub trait DataProvider {
    /// Load the records for `key`.
    fn load(&self, key: &str) -> Result<Vec<Record>, LoadError>;
}


impl<F> DataProvider for F
    where F: Fn(&str) -> Result<Vec<Record>, LoadError>
{
    fn load(&self, key: &str) -> Result<Vec<Record>, LoadError> {
        self(key)
    }
}


/// Reads `<root>/<key>.json` for the known [`Domain`] keys.
/// Each file must hold a JSON array of flat objects.
#[derive(Debug, Clone)]
pub struct JsonDirectory {
    root: PathBuf,
}


impl JsonDirectory {
    /// Construct a provider reading from `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }


    /// The `data/` directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }


    /// Returns the directory this provider reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}


impl DataProvider for JsonDirectory {
    fn load(&self, key: &str) -> Result<Vec<Record>, LoadError> {
        let domain = key.parse::<Domain>()?;
        let path = self.root.join(format!("{}.json", domain.key()));

        let text = fs::read_to_string(&path)
            .map_err(|source| LoadError::Io { path: path.clone(), source })?;
        let value = serde_json::from_str::<Value>(&text)
            .map_err(|source| LoadError::Parse { path: path.clone(), source })?;

        into_records(value, key)
    }
}


fn into_records(value: Value, key: &str) -> Result<Vec<Record>, LoadError> {
    let Value::Array(items) = value else {
        return Err(LoadError::NotRecords(key.to_string()));
    };

    items.into_iter()
        .map(|item| match item {
            Value::Object(record) => Ok(record),
            _ => Err(LoadError::NotRecords(key.to_string())),
        })
        .collect()
}


/// Load `key` from `provider`.
/// On failure the error is logged and an empty vector is returned,
/// so the page shows an empty chart instead of failing.
pub fn load_or_empty<D>(provider: &D, key: &str) -> Vec<Record>
    where D: DataProvider + ?Sized
{
    match provider.load(key) {
        Ok(records) => {
            tracing::debug!(key, n_records = records.len(), "dataset loaded");
            records
        },
        Err(error) => {
            tracing::warn!(key, %error, "failed to load dataset, using an empty one");
            Vec::new()
        },
    }
}
