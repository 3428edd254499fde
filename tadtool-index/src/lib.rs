//! # Boundary indices and TAD calling
//!
//! Computes per-bin index curves over a [ContactMatrix](tadtool_core::models::ContactMatrix)
//! for a sweep of window sizes, and calls domains from a single curve with a cutoff.
//!
//! ```no_run
//! use tadtool_core::models::{ContactMatrix, RegionSet};
//! use tadtool_index::{IndexAlgorithm, IndexConfig, call_tads_from_insulation, compute_data_array};
//!
//! let regions = RegionSet::try_from("regions.bed").unwrap();
//! let data = tadtool_io::load_matrix("matrix.txt".as_ref(), regions.len(), None, true).unwrap();
//! let matrix = ContactMatrix::masked(data).unwrap();
//!
//! let array = compute_data_array(
//!     &matrix,
//!     &regions.regions,
//!     IndexAlgorithm::Insulation,
//!     &[100_000, 200_000],
//!     &IndexConfig::default(),
//! )
//! .unwrap();
//!
//! let curve = array.require_curve(100_000).unwrap();
//! let tads = call_tads_from_insulation(&curve, 0.5, &regions.regions).unwrap();
//! ```
pub mod algorithm;
pub mod array;
pub mod caller;
pub mod config;
pub mod directionality;
pub mod insulation;
pub mod window;

pub use algorithm::{IndexAlgorithm, IndexFn};
pub use array::{IndexArray, compute_data_array};
pub use caller::{call_tads_from_directionality, call_tads_from_insulation};
pub use config::{Aggregation, IndexConfig, IndexConfigError, TadToolConfig};

use tadtool_core::TadResult;
use tadtool_core::models::GenomicRegion;

///
/// Call domains with the caller that matches `algorithm`.
///
pub fn call_tads(
    algorithm: IndexAlgorithm,
    curve: &[f64],
    cutoff: f64,
    regions: &[GenomicRegion],
) -> TadResult<Vec<GenomicRegion>> {
    match algorithm.is_insulation() {
        true => call_tads_from_insulation(curve, cutoff, regions),
        false => call_tads_from_directionality(curve, cutoff, regions),
    }
}
