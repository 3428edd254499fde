use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tadtool_core::models::{ContactMatrix, GenomicRegion};
use tadtool_core::{TadError, TadResult};

use crate::config::IndexConfig;
use crate::directionality::directionality_index;
use crate::insulation::{insulation_index, normalised_insulation_index};

///
/// Signature shared by every index function: one curve (one value per
/// region) for a single window size.
///
pub type IndexFn =
    fn(&ContactMatrix, &[GenomicRegion], u64, &IndexConfig) -> TadResult<Vec<f64>>;

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IndexAlgorithm {
    Insulation,
    NormalisedInsulation,
    Directionality,
}

impl IndexAlgorithm {
    pub const ALL: [IndexAlgorithm; 3] = [
        IndexAlgorithm::Insulation,
        IndexAlgorithm::NormalisedInsulation,
        IndexAlgorithm::Directionality,
    ];

    pub fn index_fn(&self) -> IndexFn {
        match self {
            IndexAlgorithm::Insulation => insulation_index,
            IndexAlgorithm::NormalisedInsulation => normalised_insulation_index,
            IndexAlgorithm::Directionality => directionality_index,
        }
    }

    ///
    /// Both insulation flavours call boundaries at minima; directionality
    /// calls them at sign transitions.
    ///
    pub fn is_insulation(&self) -> bool {
        matches!(
            self,
            IndexAlgorithm::Insulation | IndexAlgorithm::NormalisedInsulation
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexAlgorithm::Insulation => "insulation",
            IndexAlgorithm::NormalisedInsulation => "normalised_insulation",
            IndexAlgorithm::Directionality => "directionality",
        }
    }
}

impl Display for IndexAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IndexAlgorithm {
    type Err = TadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "insulation" => Ok(IndexAlgorithm::Insulation),
            "normalised_insulation" | "normalized_insulation" => {
                Ok(IndexAlgorithm::NormalisedInsulation)
            }
            "directionality" => Ok(IndexAlgorithm::Directionality),
            other => Err(TadError::Format(format!("Unknown index algorithm: {}", other))),
        }
    }
}
