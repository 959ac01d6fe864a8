#![allow(non_snake_case)]

use crate::algebra::*;
use crate::settings::SparseSettings;

impl<T> SparseMatrix<T>
where
    T: FloatT,
{
    /// Sparse x dense product `A * x` with default settings.
    ///
    /// # Panics
    /// Panics if `x.nrows() != self.ncols()`.
    pub fn mul_dense<X>(&self, x: &X) -> X
    where
        X: DenseMatrix<T> + Sync,
    {
        self.mul_dense_with(x, &SparseSettings::default())
    }

    /// Sparse x dense product `A * x`.
    ///
    /// Zero results are never written into the output.  With the
    /// "parallel" feature, non-transposed matrices compute one output row
    /// per task, while transposed matrices parallelise over stored rows
    /// for each output column and serialise the scatter into the result.
    ///
    /// # Panics
    /// Panics if `x.nrows() != self.ncols()`.
    pub fn mul_dense_with<X>(&self, x: &X, settings: &SparseSettings) -> X
    where
        X: DenseMatrix<T> + Sync,
    {
        assert_eq!(self.n, x.nrows());
        let mut out = X::zeros((self.m, x.ncols()));

        cfg_if::cfg_if! {
            if #[cfg(feature = "parallel")] {
                if settings.use_threads(self.data.len()) {
                    use super::parallel::*;
                    match self.shape {
                        MatrixShape::N => {
                            let rows = with_thread_pool(settings, || par_rows_dense(self, x));
                            for (r, vals) in rows {
                                for (k, v) in vals.into_iter().enumerate() {
                                    if v != T::zero() {
                                        out[(r, k)] = v;
                                    }
                                }
                            }
                        }
                        MatrixShape::T => {
                            let cols = with_thread_pool(settings, || par_scatter_dense(self, x));
                            for (k, col) in cols.into_iter().enumerate() {
                                for (c, v) in col.into_iter().enumerate() {
                                    if v != T::zero() {
                                        out[(c, k)] = v;
                                    }
                                }
                            }
                        }
                    }
                    return out;
                }
            } else {
                let _ = settings;
            }
        }

        match self.shape {
            MatrixShape::N => _mul_dense_N(self, x, &mut out),
            MatrixShape::T => _mul_dense_T(self, x, &mut out),
        }
        out
    }

    /// Sparse matrix-vector product `A * x` with default settings.
    ///
    /// # Panics
    /// Panics if `x.len() != self.ncols()`.
    pub fn mul_vec(&self, x: &[T]) -> Vec<T> {
        self.mul_vec_with(x, &SparseSettings::default())
    }

    /// Sparse matrix-vector product `A * x`, threaded as
    /// [`mul_dense_with`](SparseMatrix::mul_dense_with).
    ///
    /// # Panics
    /// Panics if `x.len() != self.ncols()`.
    pub fn mul_vec_with(&self, x: &[T], settings: &SparseSettings) -> Vec<T> {
        assert_eq!(self.n, x.len());

        cfg_if::cfg_if! {
            if #[cfg(feature = "parallel")] {
                if settings.use_threads(self.data.len()) {
                    use super::parallel::*;
                    return match self.shape {
                        MatrixShape::N => {
                            let mut y = vec![T::zero(); self.m];
                            for (r, v) in with_thread_pool(settings, || par_rows_vec(self, x)) {
                                y[r] = v;
                            }
                            y
                        }
                        MatrixShape::T => with_thread_pool(settings, || par_scatter_vec(self, x)),
                    };
                }
            } else {
                let _ = settings;
            }
        }

        let mut y = vec![T::zero(); self.m];
        match self.shape {
            MatrixShape::N => {
                for (&r, row) in self.data.iter() {
                    y[r] = row.iter().fold(T::zero(), |acc, (&c, &v)| acc + v * x[c]);
                }
            }
            MatrixShape::T => {
                for (&r, row) in self.data.iter() {
                    let xr = x[r];
                    for (&c, &v) in row.iter() {
                        y[c] += v * xr;
                    }
                }
            }
        }
        y
    }
}

// storage rows are output rows
fn _mul_dense_N<T, X>(A: &SparseMatrix<T>, x: &X, out: &mut X)
where
    T: FloatT,
    X: DenseMatrix<T>,
{
    for (&r, row) in A.data.iter() {
        for k in 0..x.ncols() {
            let s = row
                .iter()
                .fold(T::zero(), |acc, (&c, &v)| acc + v * x.get(c, k));
            if s != T::zero() {
                out[(r, k)] = s;
            }
        }
    }
}

// storage rows are logical columns, scattered into the output
fn _mul_dense_T<T, X>(A: &SparseMatrix<T>, x: &X, out: &mut X)
where
    T: FloatT,
    X: DenseMatrix<T>,
{
    for k in 0..x.ncols() {
        for (&r, row) in A.data.iter() {
            let xr = x.get(r, k);
            for (&c, &v) in row.iter() {
                let val = v * xr;
                if val != T::zero() {
                    out[(c, k)] += val;
                }
            }
        }
    }
}
