//! Directionality index (Dixon et al. 2012).
//!
//! For bin `i` with upstream contact sum `A` and downstream contact sum `B`
//! (row `i`, within the window on the same chromosome) and expected value `E = (A + B) / 2`:
//!
//! ```text
//! DI = sign(B - A) * ((A - E)^2 / E + (B - E)^2 / E)
//! ```
//!
//! Positive values mean bin `i` contacts downstream bins more than upstream
//! ones, negative values the opposite.

use tadtool_core::TadResult;
use tadtool_core::models::region_set::chromosome_bounds;
use tadtool_core::models::{ContactMatrix, GenomicRegion};

use crate::config::IndexConfig;
use crate::window::{BinWindow, exceeds_chromosome};

fn chi_square_direction(upstream: f64, downstream: f64) -> f64 {
    let expected = (upstream + downstream) / 2.0;
    if expected == 0.0 || !expected.is_finite() {
        return f64::NAN;
    }

    let chi_square = (upstream - expected).powi(2) / expected
        + (downstream - expected).powi(2) / expected;

    match downstream.partial_cmp(&upstream) {
        Some(std::cmp::Ordering::Less) => -chi_square,
        _ => chi_square,
    }
}

///
/// Directionality index of every bin for one window size.
///
/// A bin is `NaN` when it is masked, when its window would run past either
/// end of its chromosome, or when it has no contacts in either direction.
///
pub fn directionality_index(
    matrix: &ContactMatrix,
    regions: &[GenomicRegion],
    window_size: u64,
    _config: &IndexConfig,
) -> TadResult<Vec<f64>> {
    matrix.check_region_count(regions.len())?;

    let mut values = vec![f64::NAN; regions.len()];

    for block in chromosome_bounds(regions)? {
        for i in block.first..=block.last {
            if !matrix.is_valid(i) || exceeds_chromosome(regions, &block, i, window_size) {
                continue;
            }

            let window = BinWindow::resolve(regions, &block, i, window_size);
            let upstream: f64 = window.upstream().filter_map(|j| matrix.get(i, j)).sum();
            let downstream: f64 = window.downstream().filter_map(|j| matrix.get(i, j)).sum();

            values[i] = chi_square_direction(upstream, downstream);
        }
    }

    Ok(values)
}
