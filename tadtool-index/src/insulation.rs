//! Insulation index (Crane et al. 2015) and its locally normalised variant.
//!
//! The insulation of bin `i` is the aggregated contact weight between the
//! bins upstream and the bins downstream of `i` within the window: the
//! square block of the matrix whose corner touches the diagonal at `(i, i)`.
//! Low values mean few contacts cross `i`, i.e. `i` sits on a boundary.

use tadtool_core::TadResult;
use tadtool_core::models::region_set::chromosome_bounds;
use tadtool_core::models::{ContactMatrix, GenomicRegion};

use crate::config::{Aggregation, IndexConfig};
use crate::window::{BinWindow, exceeds_chromosome};

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    match values.len() % 2 {
        0 => (values[mid - 1] + values[mid]) / 2.0,
        _ => values[mid],
    }
}

///
/// Insulation index of every bin for one window size.
///
/// A bin gets `NaN` when it is masked, when the window would run past
/// either end of its chromosome, or when the block holds no valid cell
/// (which includes windows narrower than one bin).
///
pub fn insulation_index(
    matrix: &ContactMatrix,
    regions: &[GenomicRegion],
    window_size: u64,
    config: &IndexConfig,
) -> TadResult<Vec<f64>> {
    matrix.check_region_count(regions.len())?;

    let mut values = vec![f64::NAN; regions.len()];
    let mut block_values: Vec<f64> = Vec::new();

    for block in chromosome_bounds(regions)? {
        for i in block.first..=block.last {
            if !matrix.is_valid(i) || exceeds_chromosome(regions, &block, i, window_size) {
                continue;
            }

            let window = BinWindow::resolve(regions, &block, i, window_size);

            block_values.clear();
            for row in window.upstream() {
                for col in window.downstream() {
                    if let Some(value) = matrix.get(row, col) {
                        block_values.push(value);
                    }
                }
            }

            values[i] = match config.aggregation {
                Aggregation::Mean => mean(&block_values),
                Aggregation::Median => median(&mut block_values),
            };
        }
    }

    Ok(values)
}

///
/// Insulation index relative to its local background.
///
/// Each value is divided by the mean of the defined insulation values of
/// the same chromosome within `config.normalisation_window` bp on either
/// side (the whole chromosome if unset). A zero or undefined background
/// gives `NaN`. With `config.log2` the ratio is log2-transformed.
///
pub fn normalised_insulation_index(
    matrix: &ContactMatrix,
    regions: &[GenomicRegion],
    window_size: u64,
    config: &IndexConfig,
) -> TadResult<Vec<f64>> {
    let insulation = insulation_index(matrix, regions, window_size, config)?;
    let mut values = vec![f64::NAN; regions.len()];

    for block in chromosome_bounds(regions)? {
        let chromosome_mean = mean(
            &insulation[block.first..=block.last]
                .iter()
                .copied()
                .filter(|v| !v.is_nan())
                .collect::<Vec<f64>>(),
        );

        for i in block.first..=block.last {
            if insulation[i].is_nan() {
                continue;
            }

            let background = match config.normalisation_window {
                Some(normalisation_window) => {
                    let window = BinWindow::resolve(regions, &block, i, normalisation_window);
                    mean(
                        &insulation[window.span()]
                            .iter()
                            .copied()
                            .filter(|v| !v.is_nan())
                            .collect::<Vec<f64>>(),
                    )
                }
                None => chromosome_mean,
            };

            if background.is_nan() || background <= 0.0 {
                continue;
            }

            let ratio = insulation[i] / background;
            values[i] = match config.log2 {
                true if ratio > 0.0 => ratio.log2(),
                true => f64::NAN,
                false => ratio,
            };
        }
    }

    Ok(values)
}
