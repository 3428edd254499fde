//! Turn an index curve and a cutoff into domains.
//!
//! Both callers work one chromosome at a time and return domains that are
//! contiguous, ordered and cover every region exactly once. A boundary bin
//! is the last bin of its domain.

use log::debug;

use tadtool_core::models::region_set::chromosome_bounds;
use tadtool_core::models::{ChromosomeBounds, GenomicRegion};
use tadtool_core::{TadError, TadResult};

fn check_curve_length(curve: &[f64], regions: &[GenomicRegion]) -> TadResult<()> {
    if curve.len() != regions.len() {
        return Err(TadError::Dimension(format!(
            "Index curve has {} values for {} regions",
            curve.len(),
            regions.len()
        )));
    }
    Ok(())
}

///
/// Build domains for one chromosome block from sorted boundary bins.
///
pub fn domains_from_boundaries(
    regions: &[GenomicRegion],
    block: &ChromosomeBounds,
    boundaries: &[usize],
) -> Vec<GenomicRegion> {
    let mut domains = Vec::with_capacity(boundaries.len() + 1);
    let mut first = block.first;

    for &boundary in boundaries.iter().chain(std::iter::once(&block.last)) {
        if boundary < first {
            continue;
        }
        domains.push(GenomicRegion {
            chr: regions[first].chr.clone(),
            start: regions[first].start,
            end: regions[boundary].end,
            name: None,
        });
        first = boundary + 1;
    }

    domains
}

///
/// Bins of one block that are local minima of the curve.
///
/// Undefined values are skipped. A run of equal values counts as one
/// minimum, placed at its first bin, when the nearest defined values on
/// both sides are strictly greater.
///
fn local_minima(curve: &[f64], block: &ChromosomeBounds) -> Vec<usize> {
    let defined: Vec<usize> = (block.first..=block.last)
        .filter(|&i| !curve[i].is_nan())
        .collect();

    // runs of equal values as (first position in `defined`, last position)
    let mut runs: Vec<(usize, usize)> = Vec::new();
    for (k, &i) in defined.iter().enumerate() {
        match runs.last_mut() {
            Some((_, last)) if curve[defined[*last]] == curve[i] => *last = k,
            _ => runs.push((k, k)),
        }
    }

    runs.windows(3)
        .filter(|w| {
            let value = curve[defined[w[1].0]];
            curve[defined[w[0].1]] > value && curve[defined[w[2].0]] > value
        })
        .map(|w| defined[w[1].0])
        .collect()
}

///
/// Call domains from an insulation curve.
///
/// Every local minimum below `cutoff` is a boundary.
///
pub fn call_tads_from_insulation(
    curve: &[f64],
    cutoff: f64,
    regions: &[GenomicRegion],
) -> TadResult<Vec<GenomicRegion>> {
    check_curve_length(curve, regions)?;

    let mut tads = Vec::new();
    for block in chromosome_bounds(regions)? {
        let boundaries: Vec<usize> = local_minima(curve, &block)
            .into_iter()
            .filter(|&i| curve[i] < cutoff)
            .collect();

        debug!("{}: {} insulation boundaries", block.chr, boundaries.len());
        tads.extend(domains_from_boundaries(regions, &block, &boundaries));
    }

    Ok(tads)
}

///
/// Call domains from a directionality curve.
///
/// Bins below `-|cutoff|` are upstream-biased, bins above `|cutoff|`
/// downstream-biased, everything else is ignored. When a downstream-biased
/// bin follows an upstream-biased one, the boundary is the last bin with a
/// negative value before it.
///
pub fn call_tads_from_directionality(
    curve: &[f64],
    cutoff: f64,
    regions: &[GenomicRegion],
) -> TadResult<Vec<GenomicRegion>> {
    check_curve_length(curve, regions)?;

    let threshold = cutoff.abs();
    let mut tads = Vec::new();

    for block in chromosome_bounds(regions)? {
        let mut boundaries = Vec::new();
        let mut last_upstream: Option<usize> = None;

        for i in block.first..=block.last {
            let value = curve[i];
            if value < -threshold {
                last_upstream = Some(i);
            } else if value > threshold {
                if let Some(upstream) = last_upstream.take() {
                    let boundary = (upstream..i)
                        .rev()
                        .find(|&j| curve[j] < 0.0)
                        .unwrap_or(upstream);
                    boundaries.push(boundary);
                }
            }
        }

        debug!("{}: {} directionality boundaries", block.chr, boundaries.len());
        tads.extend(domains_from_boundaries(regions, &block, &boundaries));
    }

    Ok(tads)
}
