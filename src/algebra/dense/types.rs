use crate::algebra::*;
use std::ops::{Index, IndexMut};

/// Dense matrix in column-major format.
///
/// This is the reference implementation of the
/// [`DenseMatrix`](crate::algebra::DenseMatrix) collaborator.  The sparse
/// engine only ever accesses it through that trait.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T> {
    #[inline]
    pub(crate) fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }
}

impl<T> ShapedMatrix for Matrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

impl<T> DenseMatrix<T> for Matrix<T>
where
    T: FloatT,
{
    fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        Self {
            m,
            n,
            data: vec![T::zero(); m * n],
        }
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &T {
        assert!(idx.0 < self.m && idx.1 < self.n);
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut T {
        assert!(idx.0 < self.m && idx.1 < self.n);
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

// rows of nested arrays, i.e. Matrix::from(&[[1., 2.], [3., 4.]])
// has first row [1, 2]
impl<T, const R: usize, const C: usize> From<&[[T; C]; R]> for Matrix<T>
where
    T: FloatT,
{
    fn from(rows: &[[T; C]; R]) -> Self {
        let mut out = Matrix::zeros((R, C));
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                out[(i, j)] = v;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_indexing_matrix() -> Matrix<f64> {
        // [ 1.0  4.0  7.0 ]
        // [ 2.0  5.0  8.0 ]
        // [ 3.0  6.0  9.0 ]
        Matrix::from(&[[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]])
    }

    #[test]
    fn test_matrix_indexing() {
        let matrix = create_indexing_matrix();

        assert_eq!(matrix[(0, 0)], 1.0);
        assert_eq!(matrix[(1, 0)], 2.0);
        assert_eq!(matrix[(2, 0)], 3.0);
        assert_eq!(matrix[(0, 1)], 4.0);
        assert_eq!(matrix[(2, 2)], 9.0);
        assert_eq!(matrix.get(1, 2), 8.0);

        // column major storage
        assert_eq!(matrix.index_linear((0, 1)), 3);
        assert_eq!(matrix.index_linear((2, 2)), 8);
        assert_eq!(matrix.data, vec![1., 2., 3., 4., 5., 6., 7., 8., 9.]);
    }

    #[test]
    #[should_panic]
    fn test_matrix_index_out_of_bounds() {
        let matrix = create_indexing_matrix();
        let _ = matrix[(3, 0)];
    }
}
