// Internal storage in this crate is always an ordered map of maps:
// row -> (col -> value) for general sparse matrices, and
// band -> (position -> value) for banded matrices.  Iteration in
// ascending key order is relied upon by the exports and the solvers.

/// Matrix orientation marker
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatrixShape {
    /// Normal matrix orientation
    #[default]
    N,
    /// Transposed matrix orientation
    T,
}

impl MatrixShape {
    /// the opposite orientation
    pub fn flip(self) -> Self {
        match self {
            MatrixShape::N => MatrixShape::T,
            MatrixShape::T => MatrixShape::N,
        }
    }
}

/// Band pattern admitted by a [`BandedMatrix`](crate::algebra::BandedMatrix).
///
/// The pattern gates which bands `set` and `entry_mut` accept and
/// which bands `get` reads from.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BandStructure {
    /// any band
    #[default]
    General,
    /// band 0 only
    Diagonal,
    /// bands >= 0
    Triu,
    /// bands <= 0
    Tril,
}

impl BandStructure {
    /// True if entries on band `b` may be stored
    #[inline]
    pub fn admits(self, b: isize) -> bool {
        match self {
            BandStructure::General => true,
            BandStructure::Diagonal => b == 0,
            BandStructure::Triu => b >= 0,
            BandStructure::Tril => b <= 0,
        }
    }

    /// pattern of the transposed matrix
    pub fn transposed(self) -> Self {
        match self {
            BandStructure::Triu => BandStructure::Tril,
            BandStructure::Tril => BandStructure::Triu,
            other => other,
        }
    }
}

/// Index base used by the CSR and COO exports
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum IndexBase {
    /// C style, first row / column is 0
    #[default]
    Zero,
    /// Fortran / Matrix-Market style, first row / column is 1
    One,
}

impl IndexBase {
    /// offset added to every exported index
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}
