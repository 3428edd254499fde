pub mod matrix;
pub mod region;
pub mod region_set;

// re-export for cleaner imports
pub use self::matrix::{ContactMatrix, Edge};
pub use self::region::GenomicRegion;
pub use self::region_set::{ChromosomeBounds, IndexConverter, RegionSet};
