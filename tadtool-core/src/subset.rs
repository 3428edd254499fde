//! Extract the part of a dataset that belongs to a genomic sub-range.
//!
//! Row bounds come from [crate::models::region_set::select_subrange]; both
//! functions here take the inclusive, zero-based bounds it returns.

use ndarray::{Array2, s};

use crate::errors::{TadError, TadResult};
use crate::models::Edge;

fn check_bounds(start_index: usize, end_index: usize, dim: usize) -> TadResult<()> {
    if start_index > end_index || end_index >= dim {
        return Err(TadError::Dimension(format!(
            "Invalid submatrix bounds [{}, {}] for a matrix of dimension {}",
            start_index, end_index, dim
        )));
    }
    Ok(())
}

///
/// Copy the square block `[start_index..=end_index] x [start_index..=end_index]`.
///
pub fn extract_submatrix(
    matrix: &Array2<f64>,
    start_index: usize,
    end_index: usize,
) -> TadResult<Array2<f64>> {
    check_bounds(start_index, end_index, matrix.nrows().min(matrix.ncols()))?;

    Ok(matrix
        .slice(s![start_index..=end_index, start_index..=end_index])
        .to_owned())
}

///
/// Keep the edges whose row AND column fall inside `[start_index, end_index]`,
/// shifting both ids so the block starts at 0.
///
/// Edges with a single endpoint inside the window are dropped: they would
/// point outside the square submatrix after re-indexing.
///
pub fn extract_sparse_submatrix(edges: &[Edge], start_index: usize, end_index: usize) -> Vec<Edge> {
    let inside = |i: usize| i >= start_index && i <= end_index;

    edges
        .iter()
        .filter(|e| inside(e.row) && inside(e.col))
        .map(|e| Edge::new(e.row - start_index, e.col - start_index, e.weight))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn matrix() -> Array2<f64> {
        Array2::from_shape_fn((5, 5), |(i, j)| (i * 5 + j) as f64)
    }

    #[rstest]
    fn test_extract_submatrix(matrix: Array2<f64>) {
        let sub = extract_submatrix(&matrix, 1, 3).unwrap();
        assert_eq!(
            sub,
            array![[6.0, 7.0, 8.0], [11.0, 12.0, 13.0], [16.0, 17.0, 18.0]]
        );
    }

    #[rstest]
    fn test_extract_submatrix_identity(matrix: Array2<f64>) {
        let sub = extract_submatrix(&matrix, 0, 4).unwrap();
        assert_eq!(sub, matrix);
    }

    #[rstest]
    #[case(3, 1)]
    #[case(0, 5)]
    fn test_extract_submatrix_bad_bounds(matrix: Array2<f64>, #[case] start: usize, #[case] end: usize) {
        let result = extract_submatrix(&matrix, start, end);
        assert!(matches!(result, Err(TadError::Dimension(_))));
    }

    #[rstest]
    fn test_sparse_submatrix_requires_both_endpoints() {
        let edges = vec![
            Edge::new(0, 1, 5.0),
            Edge::new(1, 2, 3.0),
            Edge::new(2, 2, 1.0),
            Edge::new(2, 4, 7.0),
            Edge::new(3, 3, 2.0),
        ];
        let sub = extract_sparse_submatrix(&edges, 1, 3);

        assert_eq!(
            sub,
            vec![Edge::new(0, 1, 3.0), Edge::new(1, 1, 1.0), Edge::new(2, 2, 2.0)]
        );
    }

    #[rstest]
    fn test_sparse_submatrix_single_endpoint_dropped() {
        // (0, 1) has only its column inside [1, 2], (2, 3) only its row
        let edges = vec![Edge::new(0, 1, 1.0), Edge::new(2, 3, 1.0)];
        assert!(extract_sparse_submatrix(&edges, 1, 2).is_empty());
    }

    #[rstest]
    fn test_sparse_submatrix_identity() {
        let edges = vec![Edge::new(0, 1, 5.0), Edge::new(1, 2, 3.0)];
        assert_eq!(extract_sparse_submatrix(&edges, 0, 2), edges);
    }
}
