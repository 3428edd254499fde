use std::io::BufRead;
use std::path::Path;

use log::{debug, info};
use ndarray::Array2;
use ndarray_npy::read_npy;
use sprs::{CsMat, TriMat};

use tadtool_core::models::region_set::chromosome_bounds;
use tadtool_core::models::{Edge, GenomicRegion, IndexConverter};
use tadtool_core::subset::{extract_sparse_submatrix, extract_submatrix};
use tadtool_core::utils::{get_dynamic_reader, is_comment_line};
use tadtool_core::{TadError, TadResult};

use crate::probe::{MatrixFormat, detect_format};

///
/// Load a contact matrix, detecting its on-disk format.
///
/// # Arguments
/// - path: matrix file (`.npy`, dense text or sparse edge list)
/// - region_count: number of regions the matrix must describe
/// - index_converter: resolves region names used as ids in sparse files
/// - square: require an N x N matrix with N == region_count
///
pub fn load_matrix(
    path: &Path,
    region_count: usize,
    index_converter: Option<&IndexConverter>,
    square: bool,
) -> TadResult<Array2<f64>> {
    let format = detect_format(path)?;
    info!("Detected {} matrix format for {:?}", format, path);
    load_matrix_with_format(path, format, region_count, index_converter, square)
}

///
/// Load a contact matrix in a known format.
///
pub fn load_matrix_with_format(
    path: &Path,
    format: MatrixFormat,
    region_count: usize,
    index_converter: Option<&IndexConverter>,
    square: bool,
) -> TadResult<Array2<f64>> {
    let matrix = match format {
        MatrixFormat::Npy => read_npy_matrix(path)?,
        MatrixFormat::DenseText => read_dense_matrix(path)?,
        MatrixFormat::Sparse => {
            let edges = read_sparse_edges(path, region_count, index_converter)?;
            edges_to_dense(&edges, region_count)
        }
    };

    if square {
        check_square(&matrix, region_count)?;
    }
    debug!("Loaded {} x {} matrix", matrix.nrows(), matrix.ncols());

    Ok(matrix)
}

///
/// Load the block of a contact matrix that belongs to one chromosome.
///
/// Rows and columns are those of the regions on `chromosome`; the result can
/// be indexed together with that chromosome's slice of `regions`. The format
/// is detected from the file unless `format` is given.
///
pub fn load_chromosome_matrix(
    path: &Path,
    regions: &[GenomicRegion],
    chromosome: &str,
    index_converter: Option<&IndexConverter>,
    format: Option<MatrixFormat>,
) -> TadResult<Array2<f64>> {
    let bounds = chromosome_bounds(regions)?
        .into_iter()
        .find(|b| b.chr == chromosome)
        .ok_or_else(|| {
            TadError::Range(format!("Chromosome {} not found in region list", chromosome))
        })?;

    let format = match format {
        Some(format) => format,
        None => detect_format(path)?,
    };
    info!(
        "Loading {} rows of {} from {} matrix {:?}",
        bounds.len(),
        chromosome,
        format,
        path
    );

    match format {
        MatrixFormat::Sparse => {
            let edges = read_sparse_edges(path, regions.len(), index_converter)?;
            let edges = extract_sparse_submatrix(&edges, bounds.first, bounds.last);
            Ok(edges_to_dense(&edges, bounds.len()))
        }
        _ => {
            let matrix =
                load_matrix_with_format(path, format, regions.len(), index_converter, true)?;
            extract_submatrix(&matrix, bounds.first, bounds.last)
        }
    }
}

fn check_square(matrix: &Array2<f64>, region_count: usize) -> TadResult<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols || rows != region_count {
        return Err(TadError::Dimension(format!(
            "Matrix is {} x {} but there are {} regions",
            rows, cols, region_count
        )));
    }
    Ok(())
}

///
/// Read a 2-D `.npy` array of `f64` (or `f32`, widened) values.
///
pub fn read_npy_matrix(path: &Path) -> TadResult<Array2<f64>> {
    match read_npy::<_, Array2<f64>>(path) {
        Ok(matrix) => Ok(matrix),
        Err(f64_err) => match read_npy::<_, Array2<f32>>(path) {
            Ok(matrix) => Ok(matrix.mapv(f64::from)),
            Err(_) => Err(TadError::Format(format!(
                "Cannot read {:?} as a 2-D float npy array: {}",
                path, f64_err
            ))),
        },
    }
}

///
/// Read a whitespace-delimited dense matrix. `#` lines are skipped.
///
pub fn read_dense_matrix(path: &Path) -> TadResult<Array2<f64>> {
    let reader = get_dynamic_reader(path)?;
    let mut values: Vec<f64> = Vec::new();
    let mut n_cols: Option<usize> = None;
    let mut n_rows = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_comment_line(&line) {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| {
                    TadError::Format(format!("Line {}: invalid matrix value '{}'", i + 1, field))
                })
            })
            .collect::<TadResult<Vec<f64>>>()?;

        match n_cols {
            None => n_cols = Some(row.len()),
            Some(n) if n != row.len() => {
                return Err(TadError::Format(format!(
                    "Line {}: expected {} values, found {}",
                    i + 1,
                    n,
                    row.len()
                )));
            }
            Some(_) => {}
        }

        values.extend(row);
        n_rows += 1;
    }

    let n_cols = n_cols
        .ok_or_else(|| TadError::Format(format!("No matrix rows found in {:?}", path)))?;

    Array2::from_shape_vec((n_rows, n_cols), values)
        .map_err(|e| TadError::Dimension(format!("Cannot shape matrix: {}", e)))
}

fn resolve_id(
    field: &str,
    line_number: usize,
    region_count: usize,
    index_converter: Option<&IndexConverter>,
) -> TadResult<usize> {
    let index = match field.parse::<usize>() {
        Ok(index) => index,
        Err(_) => match index_converter {
            Some(converter) => converter.index_of(field)?,
            None => {
                return Err(TadError::Lookup(format!(
                    "Line {}: region name '{}' used but the region list has no name column",
                    line_number, field
                )));
            }
        },
    };

    if index >= region_count {
        return Err(TadError::Dimension(format!(
            "Line {}: index {} out of range for {} regions",
            line_number, index, region_count
        )));
    }

    Ok(index)
}

///
/// Read a sparse `row col weight` edge list without densifying it.
///
/// Ids are zero-based integers or region names resolved through
/// `index_converter`.
///
pub fn read_sparse_edges(
    path: &Path,
    region_count: usize,
    index_converter: Option<&IndexConverter>,
) -> TadResult<Vec<Edge>> {
    let reader = get_dynamic_reader(path)?;
    let mut edges: Vec<Edge> = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_comment_line(&line) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(TadError::Format(format!(
                "Line {}: sparse matrix lines need 3 fields, found {}",
                i + 1,
                fields.len()
            )));
        }

        let row = resolve_id(fields[0], i + 1, region_count, index_converter)?;
        let col = resolve_id(fields[1], i + 1, region_count, index_converter)?;
        let weight = fields[2].parse::<f64>().map_err(|_| {
            TadError::Format(format!("Line {}: invalid weight '{}'", i + 1, fields[2]))
        })?;

        edges.push(Edge::new(row, col, weight));
    }

    Ok(edges)
}

///
/// Accumulate edges into a symmetric dense `dim x dim` matrix.
///
/// Every edge contributes to `(row, col)` and, off the diagonal, to
/// `(col, row)`; repeated cells add up.
///
pub fn edges_to_dense(edges: &[Edge], dim: usize) -> Array2<f64> {
    let mut triplets: TriMat<f64> = TriMat::with_capacity((dim, dim), edges.len() * 2);

    for edge in edges {
        triplets.add_triplet(edge.row, edge.col, edge.weight);
        if edge.row != edge.col {
            triplets.add_triplet(edge.col, edge.row, edge.weight);
        }
    }

    let csr: CsMat<f64> = triplets.to_csr();
    csr.to_dense()
}
