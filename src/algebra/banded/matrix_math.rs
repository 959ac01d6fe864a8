#![allow(non_snake_case)]

use crate::algebra::*;
use std::ops::{Add, Mul, Sub};

impl<T: FloatT> MatrixMath<T> for BandedMatrix<T> {
    fn scale(&mut self, c: T) {
        if c == T::zero() {
            self.data.clear();
            return;
        }
        for band in self.data.values_mut() {
            band.values_mut().for_each(|v| *v *= c);
        }
        self.dropzeros();
    }

    fn negate(&mut self) {
        for band in self.data.values_mut() {
            band.values_mut().for_each(|v| *v = -*v);
        }
    }

    fn norm2(&self) -> T {
        self.data
            .values()
            .flat_map(|band| band.values())
            .fold(T::zero(), |acc, &v| acc + v * v)
            .sqrt()
    }
}

// Entries of rhs are added through their logical indices, so each one
// lands on the band key matching the destination's own orientation.
// Results of the operators below always admit any band.
fn _accumulate_into<T: FloatT>(out: &mut BandedMatrix<T>, rhs: &BandedMatrix<T>, sign: T) {
    for (i, j, v) in rhs.iter() {
        out.accumulate(i, j, sign * v);
    }
}

impl<T: FloatT> Add<&BandedMatrix<T>> for &BandedMatrix<T> {
    type Output = BandedMatrix<T>;

    /// # Panics
    /// Panics if the dimensions differ.
    fn add(self, rhs: &BandedMatrix<T>) -> BandedMatrix<T> {
        assert_eq!(self.size(), rhs.size());
        let mut out = self.clone().into_general();
        _accumulate_into(&mut out, rhs, T::one());
        out
    }
}

impl<T: FloatT> Sub<&BandedMatrix<T>> for &BandedMatrix<T> {
    type Output = BandedMatrix<T>;

    /// # Panics
    /// Panics if the dimensions differ.
    fn sub(self, rhs: &BandedMatrix<T>) -> BandedMatrix<T> {
        assert_eq!(self.size(), rhs.size());
        let mut out = self.clone().into_general();
        _accumulate_into(&mut out, rhs, -T::one());
        out
    }
}

impl<T: FloatT> Mul<T> for &BandedMatrix<T> {
    type Output = BandedMatrix<T>;

    fn mul(self, c: T) -> BandedMatrix<T> {
        let mut out = self.clone().into_general();
        out.scale(c);
        out
    }
}

impl<T> BandedMatrix<T>
where
    T: FloatT,
{
    /// Banded x dense product `A * x`.
    ///
    /// Every stored entry is visited once per column of `x`, for
    /// O(nnz * x.ncols()) work.
    ///
    /// # Panics
    /// Panics if `x.nrows() != self.ncols()`.
    pub fn mul_dense<X>(&self, x: &X) -> X
    where
        X: DenseMatrix<T>,
    {
        assert_eq!(self.n, x.nrows());
        let mut out = X::zeros((self.m, x.ncols()));

        for k in 0..x.ncols() {
            for (i, j, v) in self.iter() {
                let val = v * x.get(j, k);
                if val != T::zero() {
                    out[(i, k)] += val;
                }
            }
        }
        out
    }

    /// Banded x banded product `A * B`.
    ///
    /// Each stored entry `a_ij` of `A` meets row `j` of `B` only on the
    /// bands `B` actually stores, so the work is O(nnz(A) * bands(B)).
    /// Zero contributions never create entries in the result.
    ///
    /// # Panics
    /// Panics if `B.nrows() != self.ncols()`.
    pub fn mul_banded(&self, B: &BandedMatrix<T>) -> BandedMatrix<T> {
        assert_eq!(self.n, B.m);
        let mut out = BandedMatrix::new(self.m, B.n);

        // logical band numbers of B
        let bands: Vec<isize> = B
            .data
            .keys()
            .map(|&b| match B.shape {
                MatrixShape::N => b,
                MatrixShape::T => -b,
            })
            .collect();

        for (i, j, a) in self.iter() {
            for &b in bands.iter() {
                let k = j as isize + b;
                if k < 0 || k >= B.n as isize {
                    continue;
                }
                let val = a * B.get(j, k as usize);
                if val != T::zero() {
                    out.accumulate(i, k as usize, val);
                }
            }
        }
        out
    }
}
