//! # Input/Output for tadtool.
//!
//! Loading contact matrices from any of the supported representations
//! (`.npy` arrays, dense text, sparse edge lists), parsing window-size
//! lists, and writing index curves, domains, regions and matrices back to
//! disk.
//!
//! The matrix format is decided by an ordered list of probes over a bounded
//! peek of the file; see [probe].
//!
pub mod matrix;
pub mod probe;
pub mod windows;
pub mod write;

// re-expose core functions
pub use matrix::*;
pub use probe::{MatrixFormat, detect_format};
pub use windows::{WindowSizes, read_window_list};
pub use write::*;
