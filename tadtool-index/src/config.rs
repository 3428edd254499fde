use std::fs::read_to_string;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tadtool_core::TadError;

use crate::algorithm::IndexAlgorithm;

///
/// How the contacts inside an insulation block are summarised.
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    #[default]
    Mean,
    Median,
}

impl FromStr for Aggregation {
    type Err = TadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean" => Ok(Aggregation::Mean),
            "median" => Ok(Aggregation::Median),
            _ => Err(TadError::Format(format!("Unknown aggregation: {}", s))),
        }
    }
}

///
/// Parameters shared by every index function.
///
/// Passed explicitly alongside the matrix, regions and window size, so each
/// index function keeps the same signature.
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
#[serde(default)]
pub struct IndexConfig {
    /// Span (bp, on each side) of the local background used by the
    /// normalised insulation index. `None` uses the whole chromosome.
    pub normalisation_window: Option<u64>,
    pub aggregation: Aggregation,
    /// Report the normalised insulation index as a log2 ratio.
    pub log2: bool,
}

///
/// Defaults for a tadtool run, read from a TOML file.
///
/// ```toml
/// algorithm = "insulation"
/// window_sizes = [100000, 200000]
/// cutoff = 0.5
///
/// [index]
/// normalisation_window = 1000000
/// aggregation = "median"
/// ```
///
#[derive(Deserialize, Serialize, Debug, PartialEq, Default)]
#[serde(default)]
pub struct TadToolConfig {
    pub algorithm: Option<IndexAlgorithm>,
    pub window_sizes: Option<Vec<u64>>,
    pub cutoff: Option<f64>,
    pub index: IndexConfig,
}

#[derive(Error, Debug)]
pub enum IndexConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type IndexConfigResult<T> = std::result::Result<T, IndexConfigError>;

impl TryFrom<&Path> for TadToolConfig {
    type Error = IndexConfigError;

    fn try_from(path: &Path) -> IndexConfigResult<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}
