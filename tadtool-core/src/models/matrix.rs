use ndarray::{Array2, ArrayView2, Axis};

use crate::errors::{TadError, TadResult};

///
/// One weighted cell of a sparse contact matrix.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub row: usize,
    pub col: usize,
    pub weight: f64,
}

impl Edge {
    pub fn new(row: usize, col: usize, weight: f64) -> Self {
        Edge { row, col, weight }
    }
}

///
/// Square contact matrix with a per-bin validity flag.
///
/// Masking never resizes the matrix: invalid bins keep their row and column,
/// they are just reported as "no data" by [ContactMatrix::get].
///
#[derive(Clone, Debug)]
pub struct ContactMatrix {
    data: Array2<f64>,
    valid: Vec<bool>,
}

impl ContactMatrix {
    ///
    /// Wrap a square matrix with every bin marked valid.
    ///
    pub fn new(data: Array2<f64>) -> TadResult<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(TadError::Dimension(format!(
                "Contact matrix must be square, got {} x {}",
                rows, cols
            )));
        }

        Ok(ContactMatrix {
            data,
            valid: vec![true; rows],
        })
    }

    ///
    /// Wrap a square matrix and mask every bin whose row has no observed
    /// contacts (row sum over finite values is zero).
    ///
    pub fn masked(data: Array2<f64>) -> TadResult<Self> {
        let mut matrix = ContactMatrix::new(data)?;
        matrix.valid = matrix
            .data
            .axis_iter(Axis(0))
            .map(|row| row.iter().filter(|v| v.is_finite()).sum::<f64>() != 0.0)
            .collect();
        Ok(matrix)
    }

    ///
    /// Number of bins (rows == columns).
    ///
    pub fn dim(&self) -> usize {
        self.valid.len()
    }

    pub fn is_valid(&self, i: usize) -> bool {
        self.valid[i]
    }

    ///
    /// Number of bins flagged as invalid.
    ///
    pub fn masked_count(&self) -> usize {
        self.valid.iter().filter(|v| !**v).count()
    }

    ///
    /// Weight at `(i, j)`, or `None` if either bin is masked or the cell is NaN.
    ///
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if !self.valid[i] || !self.valid[j] {
            return None;
        }
        let value = self.data[[i, j]];
        match value.is_nan() {
            true => None,
            false => Some(value),
        }
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    ///
    /// Fail with a dimension error unless the matrix has one row per region.
    ///
    pub fn check_region_count(&self, region_count: usize) -> TadResult<()> {
        if self.dim() != region_count {
            return Err(TadError::Dimension(format!(
                "Matrix dimension ({}) does not match number of regions ({})",
                self.dim(),
                region_count
            )));
        }
        Ok(())
    }
}

///
/// Mask bins without observed contacts. See [ContactMatrix::masked].
///
pub fn mask_matrix(data: Array2<f64>) -> TadResult<ContactMatrix> {
    ContactMatrix::masked(data)
}
