use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use ndarray::{Array2, ArrayView1, Axis};

use tadtool_io::{get_dynamic_writer, read_npy_matrix, read_window_list, write_npy_array};

use tadtool_core::models::{ContactMatrix, GenomicRegion};
use tadtool_core::{TadError, TadResult};

use crate::algorithm::IndexAlgorithm;
use crate::config::IndexConfig;

///
/// Index curves for a sweep of window sizes.
///
/// Row `k` of `data` is the curve for `window_sizes[k]`; there is one
/// column per region. Window sizes are strictly ascending.
///
#[derive(Debug, Clone, PartialEq)]
pub struct IndexArray {
    data: Array2<f64>,
    window_sizes: Vec<u64>,
}

impl IndexArray {
    ///
    /// Wrap a precomputed array, e.g. one loaded from disk.
    ///
    /// Fails with a dimension error unless `data` has one row per window
    /// size and one column per region, and with a format error unless the
    /// window sizes are strictly ascending.
    ///
    pub fn new(data: Array2<f64>, window_sizes: Vec<u64>, region_count: usize) -> TadResult<Self> {
        let expected = (window_sizes.len(), region_count);
        if data.dim() != expected {
            return Err(TadError::Dimension(format!(
                "Index array has shape {:?}, expected {:?} (window sizes x regions)",
                data.dim(),
                expected
            )));
        }

        if window_sizes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(TadError::Format(
                "Index array window sizes must be strictly ascending".to_string(),
            ));
        }

        Ok(IndexArray { data, window_sizes })
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    pub fn window_sizes(&self) -> &[u64] {
        &self.window_sizes
    }

    pub fn region_count(&self) -> usize {
        self.data.ncols()
    }

    ///
    /// The curve computed for exactly `window_size`, if it is part of the sweep.
    ///
    pub fn curve(&self, window_size: u64) -> Option<ArrayView1<'_, f64>> {
        self.window_sizes
            .binary_search(&window_size)
            .ok()
            .map(|row| self.data.row(row))
    }

    ///
    /// Like [IndexArray::curve] but fails with a range error naming the
    /// available window sizes.
    ///
    pub fn require_curve(&self, window_size: u64) -> TadResult<Vec<f64>> {
        self.curve(window_size)
            .map(|row| row.to_vec())
            .ok_or_else(|| {
                TadError::Range(format!(
                    "Window size {} not in index array (available: {:?})",
                    window_size, self.window_sizes
                ))
            })
    }

    pub fn into_inner(self) -> (Array2<f64>, Vec<u64>) {
        (self.data, self.window_sizes)
    }

    ///
    /// File holding the window sizes next to an `.npy` index array:
    /// `ii.npy` -> `ii.windows`.
    ///
    pub fn windows_path(path: &Path) -> PathBuf {
        path.with_extension("windows")
    }

    ///
    /// Save the array as `.npy` plus a window-size sidecar.
    ///
    pub fn write_npy(&self, path: &Path) -> TadResult<()> {
        write_npy_array(path, &self.data)?;

        let mut writer = get_dynamic_writer(&IndexArray::windows_path(path))?;
        for window_size in &self.window_sizes {
            writeln!(writer, "{}", window_size)?;
        }
        writer.finish()?;

        Ok(())
    }

    ///
    /// Load an array saved by [IndexArray::write_npy] and validate it
    /// against the region count.
    ///
    pub fn read_npy(path: &Path, region_count: usize) -> TadResult<Self> {
        let data = read_npy_matrix(path)?;
        let window_sizes = read_window_list(&IndexArray::windows_path(path))?;
        IndexArray::new(data, window_sizes, region_count)
    }
}

///
/// Compute one index curve per window size.
///
/// Window sizes are sorted and de-duplicated first; each curve is computed
/// independently of the others.
///
pub fn compute_data_array(
    matrix: &ContactMatrix,
    regions: &[GenomicRegion],
    algorithm: IndexAlgorithm,
    window_sizes: &[u64],
    config: &IndexConfig,
) -> TadResult<IndexArray> {
    matrix.check_region_count(regions.len())?;

    let mut window_sizes = window_sizes.to_vec();
    window_sizes.sort_unstable();
    window_sizes.dedup();

    info!(
        "Computing {} index for {} window sizes over {} regions",
        algorithm,
        window_sizes.len(),
        regions.len()
    );

    let index_fn = algorithm.index_fn();
    let mut data = Array2::from_elem((window_sizes.len(), regions.len()), f64::NAN);

    for (mut row, window_size) in data.axis_iter_mut(Axis(0)).zip(&window_sizes) {
        debug!("{} window size {}", algorithm, window_size);
        let curve = index_fn(matrix, regions, *window_size, config)?;
        row.assign(&ArrayView1::from(curve.as_slice()));
    }

    IndexArray::new(data, window_sizes, regions.len())
}
