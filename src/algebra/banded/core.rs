#![allow(non_snake_case)]

use crate::algebra::{BandStructure, FloatT, MatrixShape, ShapedMatrix, SolveError, SparseFormatError};
use crate::io::MatrixMarketWrite;
use std::collections::BTreeMap;
use std::io::Write;

/// Band storage of a [`BandedMatrix`]: position in band -> value
pub type BandData<T> = BTreeMap<usize, T>;

/// Sparse matrix stored by band rather than by row.
///
/// Entry `(i,j)` lives on band `j - i` at position `min(i,j)`, so each band
/// is a diagonal of the matrix, with band 0 the main diagonal, positive
/// bands above it and negative bands below.  Only nonzero values are
/// stored and empty bands are removed.
///
/// Transposition is lazy as for [`SparseMatrix`](crate::algebra::SparseMatrix):
/// the stored band keys are reinterpreted with a negated sign rather than
/// rewritten.  All indices and band numbers passed to or returned from the
/// public interface are in the logical (possibly transposed) frame.
///
/// A [`BandStructure`] tag restricts which bands may hold entries.  It is
/// always [`General`](BandStructure::General) for matrices created with
/// [`new`](BandedMatrix::new); the diagonal and triangular wrappers set it.
///
/// ```
/// use bandsparse::algebra::*;
///
/// let mut A = BandedMatrix::<f64>::new(3, 3);
/// A.set(0, 1, 2.);
/// A.set(1, 2, 3.);
/// A.add_diagonal(1.);
///
/// assert_eq!(A.num_bands(), 2);
/// assert_eq!(A.bands(1, 1)[&1].len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "BandedParts<T>",
        bound(deserialize = "T: FloatT + serde::Deserialize<'de>")
    )
)]
pub struct BandedMatrix<T = f64> {
    /// number of (logical) rows
    pub(crate) m: usize,
    /// number of (logical) columns
    pub(crate) n: usize,
    /// storage orientation
    pub(crate) shape: MatrixShape,
    /// admissible bands
    pub(crate) structure: BandStructure,
    /// storage band -> (position -> value)
    pub(crate) data: BTreeMap<isize, BandData<T>>,
}

// unchecked serialized form, validated on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BandedParts<T> {
    m: usize,
    n: usize,
    shape: MatrixShape,
    structure: BandStructure,
    data: BTreeMap<isize, BandData<T>>,
}

#[cfg(feature = "serde")]
impl<T: FloatT> TryFrom<BandedParts<T>> for BandedMatrix<T> {
    type Error = SparseFormatError;

    fn try_from(parts: BandedParts<T>) -> Result<Self, Self::Error> {
        let A = BandedMatrix {
            m: parts.m,
            n: parts.n,
            shape: parts.shape,
            structure: parts.structure,
            data: parts.data,
        };
        A.check_format()?;
        Ok(A)
    }
}

impl<T> BandedMatrix<T>
where
    T: FloatT,
{
    /// An empty `m x n` matrix admitting any band
    pub fn new(m: usize, n: usize) -> Self {
        Self::with_structure(m, n, BandStructure::General)
    }

    pub(crate) fn with_structure(m: usize, n: usize, structure: BandStructure) -> Self {
        Self {
            m,
            n,
            shape: MatrixShape::N,
            structure,
            data: BTreeMap::new(),
        }
    }

    /// band pattern admitted by this matrix
    pub fn structure(&self) -> BandStructure {
        self.structure
    }

    /// True if the matrix is flagged as transposed relative to its storage
    pub fn is_transposed(&self) -> bool {
        self.shape == MatrixShape::T
    }

    /// Band of entry `(i,j)`, i.e. `j - i`
    #[inline]
    pub fn band(i: usize, j: usize) -> isize {
        j as isize - i as isize
    }

    /// Position of entry `(i,j)` within its band, i.e. `min(i,j)`
    #[inline]
    pub fn band_index(i: usize, j: usize) -> usize {
        i.min(j)
    }

    /// Row of the entry at position `d` of band `b`
    #[inline]
    pub fn row_of(b: isize, d: usize) -> usize {
        if b <= 0 {
            (d as isize - b) as usize
        } else {
            d
        }
    }

    /// Column of the entry at position `d` of band `b`
    #[inline]
    pub fn col_of(b: isize, d: usize) -> usize {
        if b <= 0 {
            d
        } else {
            (d as isize + b) as usize
        }
    }

    // logical (i,j) -> storage (band, position)
    #[inline]
    pub(crate) fn storage_key(&self, i: usize, j: usize) -> (isize, usize) {
        let (r, c) = match self.shape {
            MatrixShape::N => (i, j),
            MatrixShape::T => (j, i),
        };
        (Self::band(r, c), Self::band_index(r, c))
    }

    // storage (band, position) -> logical (i,j)
    #[inline]
    pub(crate) fn logical_index(&self, b: isize, d: usize) -> (usize, usize) {
        let (r, c) = (Self::row_of(b, d), Self::col_of(b, d));
        match self.shape {
            MatrixShape::N => (r, c),
            MatrixShape::T => (c, r),
        }
    }

    #[inline]
    fn check_bounds(&self, i: usize, j: usize) {
        assert!(
            i < self.m && j < self.n,
            "index ({}, {}) out of bounds for {} x {} matrix",
            i,
            j,
            self.m,
            self.n
        );
    }

    #[inline]
    fn check_structure(&self, i: usize, j: usize) {
        assert!(
            self.structure.admits(Self::band(i, j)),
            "entry ({}, {}) lies outside the {:?} band pattern",
            i,
            j,
            self.structure
        );
    }

    /// Returns the value at `(i,j)`, or zero if nothing is stored there or
    /// the entry lies outside the band pattern.  Never creates an entry.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.check_bounds(i, j);
        if !self.structure.admits(Self::band(i, j)) {
            return T::zero();
        }
        let (b, d) = self.storage_key(i, j);
        self.data
            .get(&b)
            .and_then(|band| band.get(&d))
            .copied()
            .unwrap_or_else(T::zero)
    }

    /// Sets the value at `(i,j)`.  A zero value deletes the entry, and
    /// the band if it becomes empty.
    ///
    /// # Panics
    /// Panics if the index is out of bounds or outside the band pattern.
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        self.check_bounds(i, j);
        self.check_structure(i, j);

        if v == T::zero() {
            self.remove(i, j);
        } else {
            let (b, d) = self.storage_key(i, j);
            self.data.entry(b).or_default().insert(d, v);
        }
    }

    /// Mutable access to the value at `(i,j)`, creating a zero entry
    /// if nothing is stored there (fill-in).
    ///
    /// # Panics
    /// Panics if the index is out of bounds or outside the band pattern.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut T {
        self.check_bounds(i, j);
        self.check_structure(i, j);
        let (b, d) = self.storage_key(i, j);
        self.data
            .entry(b)
            .or_default()
            .entry(d)
            .or_insert_with(T::zero)
    }

    /// Deletes the entry at `(i,j)`, if any.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn delete(&mut self, i: usize, j: usize) {
        self.check_bounds(i, j);
        self.remove(i, j);
    }

    fn remove(&mut self, i: usize, j: usize) {
        let (b, d) = self.storage_key(i, j);
        if let Some(band) = self.data.get_mut(&b) {
            band.remove(&d);
            if band.is_empty() {
                self.data.remove(&b);
            }
        }
    }

    /// Deletes every entry of row `i`, one column at a time
    pub fn delete_row(&mut self, i: usize) {
        assert!(i < self.m);
        for j in 0..self.n {
            self.remove(i, j);
        }
    }

    /// Deletes every entry of column `j`, one row at a time
    pub fn delete_col(&mut self, j: usize) {
        assert!(j < self.n);
        for i in 0..self.m {
            self.remove(i, j);
        }
    }

    // adds v at (i,j), removing the entry if the sum cancels to zero
    pub(crate) fn accumulate(&mut self, i: usize, j: usize, v: T) {
        if v == T::zero() {
            return;
        }
        let (b, d) = self.storage_key(i, j);
        let band = self.data.entry(b).or_default();
        let entry = band.entry(d).or_insert_with(T::zero);
        *entry += v;
        if *entry == T::zero() {
            band.remove(&d);
            if band.is_empty() {
                self.data.remove(&b);
            }
        }
    }

    pub(crate) fn dropzeros(&mut self) {
        for band in self.data.values_mut() {
            band.retain(|_, v| *v != T::zero());
        }
        self.data.retain(|_, band| !band.is_empty());
    }

    /// Copy of the bands `lower..=upper`, keyed by band number in the
    /// logical frame.  Positions within a band are unchanged by
    /// transposition.
    pub fn bands(&self, lower: isize, upper: isize) -> BTreeMap<isize, BandData<T>> {
        if lower > upper {
            return BTreeMap::new();
        }
        match self.shape {
            MatrixShape::N => self
                .data
                .range(lower..=upper)
                .map(|(&b, band)| (b, band.clone()))
                .collect(),
            MatrixShape::T => self
                .data
                .range(upper.saturating_neg()..=lower.saturating_neg())
                .map(|(&b, band)| (-b, band.clone()))
                .collect(),
        }
    }

    /// Checks the storage invariants: every stored position lies inside
    /// the matrix on a band admitted by the pattern, a restricted pattern
    /// is square, and no zero value or empty band is stored.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.structure != BandStructure::General && self.m != self.n {
            return Err(SparseFormatError::BadStructure);
        }
        let (rows, cols) = match self.shape {
            MatrixShape::N => (self.m, self.n),
            MatrixShape::T => (self.n, self.m),
        };
        for (&b, band) in self.data.iter() {
            let logical = match self.shape {
                MatrixShape::N => b,
                MatrixShape::T => b.saturating_neg(),
            };
            if !self.structure.admits(logical) {
                return Err(SparseFormatError::BadStructure);
            }
            // positions 0..len fit in the matrix
            let len = if b <= 0 {
                rows.saturating_sub(b.unsigned_abs()).min(cols)
            } else {
                cols.saturating_sub(b.unsigned_abs()).min(rows)
            };
            match band.keys().next_back() {
                None => return Err(SparseFormatError::StoredZero),
                Some(&d) if d >= len => return Err(SparseFormatError::BadIndex),
                _ => (),
            }
            if band.values().any(|&v| v == T::zero()) {
                return Err(SparseFormatError::StoredZero);
            }
        }
        Ok(())
    }

    // a direct solve needs one stored diagonal entry per row
    pub(crate) fn check_full_diagonal(&self, expected: usize) -> Result<(), SolveError> {
        let found = self.data.get(&0).map_or(0, |band| band.len());
        if found == expected {
            Ok(())
        } else {
            Err(SolveError::RankDeficient { expected, found })
        }
    }

    /// Adds `c` to every entry of the main diagonal, including
    /// positions where nothing is stored yet.
    pub fn add_diagonal(&mut self, c: T) {
        for i in 0..self.m.min(self.n) {
            self.accumulate(i, i, c);
        }
    }

    /// Scales the stored entries of the main diagonal by `c`.  Does nothing
    /// if the diagonal is empty.
    pub fn scale_diagonal(&mut self, c: T) {
        let Some(band) = self.data.get_mut(&0) else {
            return;
        };
        band.values_mut().for_each(|v| *v *= c);
        band.retain(|_, v| *v != T::zero());
        if band.is_empty() {
            self.data.remove(&0);
        }
    }

    /// Transposes the matrix in place without moving any data.  A
    /// triangular band pattern becomes the opposite triangle.
    pub fn transpose(&mut self) {
        std::mem::swap(&mut self.m, &mut self.n);
        self.shape = self.shape.flip();
        self.structure = self.structure.transposed();
    }

    // same entries, admitting any band
    pub(crate) fn into_general(mut self) -> Self {
        self.structure = BandStructure::General;
        self
    }

    /// Returns a transposed copy, leaving `self` untouched
    pub fn transposed(&self) -> Self {
        let mut out = self.clone();
        out.transpose();
        out
    }

    /// number of stored entries
    pub fn nnz(&self) -> usize {
        self.data.values().map(|band| band.len()).sum()
    }

    /// number of nonempty bands
    pub fn num_bands(&self) -> usize {
        self.data.len()
    }

    /// Iterates over the stored entries as logical `(row, col, value)`
    /// triples, band by band.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.data.iter().flat_map(move |(&b, band)| {
            band.iter().map(move |(&d, &v)| {
                let (i, j) = self.logical_index(b, d);
                (i, j, v)
            })
        })
    }

    /// Writes one `[i,j] value` line per entry, with a blank line after
    /// each band.
    pub fn print_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        write!(out, "{}", self)
    }

    /// [`print_to`](BandedMatrix::print_to) standard output
    pub fn print(&self) {
        let _ = self.print_to(&mut crate::io::stdout());
    }
}

impl<T> ShapedMatrix for BandedMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        self.shape
    }
}

impl<T> MatrixMarketWrite<T> for BandedMatrix<T>
where
    T: FloatT,
{
    fn mm_size(&self) -> (usize, usize) {
        self.size()
    }
    fn mm_nnz(&self) -> usize {
        self.nnz()
    }
    fn mm_entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_> {
        Box::new(self.iter())
    }
}

impl<T> std::fmt::Display for BandedMatrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (&b, band) in self.data.iter() {
            for (&d, v) in band.iter() {
                let (i, j) = self.logical_index(b, d);
                writeln!(f, "[{},{}] {:.4}", i, j, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
