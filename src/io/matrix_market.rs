use crate::algebra::FloatT;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

/// Header line of a real, general, coordinate Matrix-Market file
pub const MATRIX_MARKET_HEADER: &str = "%%MatrixMarket matrix coordinate real general";

/// Export of a sparse matrix in Matrix-Market coordinate format.
///
/// Implementors supply the logical dimensions, the number of stored
/// entries and their `(row, col, value)` triples in storage order.
/// Indices are written 1-based.
pub trait MatrixMarketWrite<T: FloatT> {
    /// logical `(rows, cols)`
    fn mm_size(&self) -> (usize, usize);

    /// number of stored entries
    fn mm_nnz(&self) -> usize;

    /// stored entries as 0-based logical `(row, col, value)` triples
    fn mm_entries(&self) -> Box<dyn Iterator<Item = (usize, usize, T)> + '_>;

    /// Writes the matrix to any stream
    fn write_matrix_market(&self, out: &mut dyn Write) -> Result<()> {
        let (m, n) = self.mm_size();
        writeln!(out, "{}", MATRIX_MARKET_HEADER)?;
        writeln!(out, "{} {} {}", m, n, self.mm_nnz())?;
        for (i, j, v) in self.mm_entries() {
            writeln!(out, "{} {} {}", i + 1, j + 1, v)?;
        }
        Ok(())
    }

    /// Writes the matrix to a file, creating or truncating it.
    ///
    /// The file handle is held until the write completes or fails.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()>
    where
        Self: Sized,
    {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_matrix_market(&mut out)?;
        out.flush()
    }
}
