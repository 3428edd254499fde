use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use tadtool_core::subset::{extract_sparse_submatrix, extract_submatrix};
use tadtool_core::utils::parse_region_string;
use tadtool_io::{
    BedWrite, MatrixFormat, load_matrix_with_format, read_sparse_edges, write_dense_matrix,
    write_sparse_edges,
};

use super::cli::{DEFAULT_MATRIX_OUT, DEFAULT_REGIONS_OUT};
use crate::inputs::{load_regions, matrix_format};

pub fn run_subset(matches: &ArgMatches) -> Result<()> {
    let matrix = matches
        .get_one::<String>("matrix")
        .expect("A path to a contact matrix is required.");

    let region = matches
        .get_one::<String>("region")
        .expect("A sub-range to extract is required.");

    let default_regions_out = DEFAULT_REGIONS_OUT.to_string();
    let regions_out = matches
        .get_one::<String>("output-regions")
        .unwrap_or(&default_regions_out);

    let default_matrix_out = DEFAULT_MATRIX_OUT.to_string();
    let matrix_out = matches
        .get_one::<String>("output-matrix")
        .unwrap_or(&default_matrix_out);

    let target = parse_region_string(region)?;
    let region_set = load_regions(matches)?;
    let (subset, start, end) = region_set
        .subset(&target)
        .with_context(|| format!("Cannot subset regions to {}", target))?;
    info!("{} overlaps rows {} to {}", target, start, end);

    let matrix = Path::new(matrix);
    match matrix_format(matches, matrix)? {
        MatrixFormat::Sparse => {
            let edges = read_sparse_edges(
                matrix,
                region_set.len(),
                region_set.index_converter.as_ref(),
            )?;
            let edges = extract_sparse_submatrix(&edges, start, end);
            info!("Keeping {} of the sparse matrix entries", edges.len());
            write_sparse_edges(Path::new(matrix_out), &edges)?;
        }
        format => {
            let data = load_matrix_with_format(
                matrix,
                format,
                region_set.len(),
                region_set.index_converter.as_ref(),
                true,
            )?;
            let submatrix = extract_submatrix(&data, start, end)?;
            write_dense_matrix(Path::new(matrix_out), &submatrix)?;
        }
    }

    subset.write_bed(regions_out)?;
    info!("Wrote {} regions to {} and the matrix to {}", subset.len(), regions_out, matrix_out);

    Ok(())
}
