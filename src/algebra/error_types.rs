use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
/// Error type returned when rebuilding a sparse matrix from exported parts.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Bad row pointer values")]
    /// Row pointer values are not monotone or do not match the data length
    BadRowptr,
    #[error("Row or column index exceeds the matrix dimension")]
    /// An index lies outside the matrix after removing the index base
    BadIndex,
    #[error("Index lies below the declared index base")]
    /// An index is smaller than the index base it was exported with
    BadIndexBase,
    #[error("Stored value is zero or a stored row or band is empty")]
    /// A zero value, or an empty row or band, is stored explicitly
    StoredZero,
    #[error("Band lies outside the band pattern")]
    /// A band is not admitted by the band pattern, or the pattern does
    /// not match the matrix type
    BadStructure,
}

/// Error type returned by the direct band solvers and by diagonal inversion.
///
/// A failed solve leaves its destination untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The diagonal band does not hold one nonzero per row.
    #[error("Matrix is rank-deficient: {found} of {expected} diagonal entries are nonzero")]
    RankDeficient { expected: usize, found: usize },
}
