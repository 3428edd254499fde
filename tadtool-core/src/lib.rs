//! Core data model for tadtool.
//!
//! - [models::GenomicRegion] / [models::RegionSet]: ordered genomic bins that index the rows of a
//!   contact matrix, plus the name lookup used by sparse matrices.
//! - [models::ContactMatrix]: square matrix of contact weights with a per-bin validity mask.
//! - [subset]: extraction of the rows belonging to a genomic sub-range.
//!
//! # Example
//!
//! ```no_run
//! use tadtool_core::models::{GenomicRegion, RegionSet};
//!
//! let regions = RegionSet::try_from("regions.bed").unwrap();
//! let target: GenomicRegion = "chr1:150000-350000".parse().unwrap();
//!
//! let (subset, start, end) = regions.subset(&target).unwrap();
//! println!("{} rows from {} to {}", subset.len(), start, end);
//! ```
pub mod errors;
pub mod models;
pub mod subset;
pub mod utils;

pub use errors::{TadError, TadResult};
