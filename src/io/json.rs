use crate::{algebra::*, settings::SparseSettings};
use serde::{de::DeserializeOwned, Serialize};
use std::io::Write;
use std::{fs::File, io, io::Read};

/// Reading and writing of matrices and settings as JSON files.
///
/// Reading checks the same invariants the matrix types maintain, so a
/// file holding explicit zeros, entries outside the matrix or bands
/// outside a triangular or diagonal pattern is rejected with
/// [`io::ErrorKind::InvalidData`].
pub trait JsonReadWrite: Sized {
    /// Writes `self` to `file` as a single JSON document
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error>;

    /// Reads an object previously written by
    /// [`write_to_file`](JsonReadWrite::write_to_file)
    fn read_from_file(file: &mut File) -> Result<Self, io::Error>;
}

macro_rules! impl_json_read_write {
    ($($name:ident),*) => {
        $(
            impl<T> JsonReadWrite for $name<T>
            where
                T: FloatT + Serialize + DeserializeOwned,
            {
                fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
                    write_json(self, file)
                }

                fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
                    read_json(file)
                }
            }
        )*
    };
}

impl_json_read_write!(
    SparseMatrix,
    BandedMatrix,
    DiagonalMatrix,
    UpperTriangularMatrix,
    LowerTriangularMatrix
);

impl JsonReadWrite for SparseSettings {
    fn write_to_file(&self, file: &mut File) -> Result<(), io::Error> {
        write_json(self, file)
    }

    fn read_from_file(file: &mut File) -> Result<Self, io::Error> {
        let settings: SparseSettings = read_json(file)?;
        settings
            .validate()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(settings)
    }
}

fn write_json<M: Serialize>(data: &M, file: &mut File) -> Result<(), io::Error> {
    let json = serde_json::to_string(data)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

fn read_json<M: DeserializeOwned>(file: &mut File) -> Result<M, io::Error> {
    let mut buffer = String::new();
    file.read_to_string(&mut buffer)?;
    Ok(serde_json::from_str(&buffer)?)
}
