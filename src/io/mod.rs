//! Diagnostic output, Matrix-Market export and JSON file I/O.

use crate::settings::SparseSettings;
use std::fmt::Display;
use std::io::{Result, Write};

pub(crate) use std::io::{stderr, stdout};

mod matrix_market;
pub use matrix_market::*;

#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "serde")]
pub use json::*;

// Writes "ERROR: <msg>" for a failed operation when verbose printing
// is enabled.  Failures to write the diagnostic itself are ignored.
pub(crate) fn report_failure(settings: &SparseSettings, err: &dyn Display) {
    if settings.verbose {
        let _ = write_failure(&mut self::stderr(), err);
    }
}

pub(crate) fn write_failure(out: &mut impl Write, err: &dyn Display) -> Result<()> {
    writeln!(out, "ERROR: {}", err)
}

#[test]
fn test_write_failure() {
    let mut buffer: Vec<u8> = Vec::new();
    write_failure(&mut buffer, &"Matrix is rank-deficient.").unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "ERROR: Matrix is rank-deficient.\n"
    );
}
