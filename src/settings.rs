//! Runtime options for the sparse products and the band solvers.

use derive_builder::Builder;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, PartialEq, Eq)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

/// Options controlling threading and diagnostics.
///
/// Matrices never store settings.  Operations that honour them come in a
/// `*_with` flavour taking `&SparseSettings`; the plain flavour uses
/// `SparseSettings::default()`.
///
/// ```
/// use bandsparse::settings::SparseSettingsBuilder;
///
/// let settings = SparseSettingsBuilder::default()
///     .parallel(false)
///     .verbose(true)
///     .build()
///     .unwrap();
/// assert!(!settings.parallel);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SparseSettings {
    ///use threaded sparse x dense products when compiled with the "parallel" feature
    #[builder(default = "true")]
    pub parallel: bool,

    ///minimum number of stored rows before the threaded product is used
    #[builder(default = "64")]
    pub parallel_min_rows: usize,

    ///maximum threads for the threaded products.
    ///choosing 0 lets rayon choose for itself
    #[builder(default = "0")]
    pub max_threads: u32,

    ///print diagnostics for failed solves and inversions
    #[builder(default = "false")]
    pub verbose: bool,
}

impl Default for SparseSettings {
    fn default() -> SparseSettings {
        SparseSettingsBuilder::default().build().unwrap()
    }
}

impl SparseSettings {
    /// Checks that the settings are valid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_parallel_min_rows(self.parallel_min_rows)
    }

    /// true if a product over `rows` stored rows should be threaded
    pub(crate) fn use_threads(&self, rows: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && rows >= self.parallel_min_rows
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for SparseSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        SparseSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl SparseSettingsBuilder {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(rows) = self.parallel_min_rows {
            validate_parallel_min_rows(rows)?;
        }
        Ok(())
    }
}

fn validate_parallel_min_rows(rows: usize) -> Result<(), SettingsError> {
    if rows == 0 {
        Err(SettingsError::BadFieldValue("parallel_min_rows"))
    } else {
        Ok(())
    }
}

#[test]
fn test_settings_validate() {
    let settings = SparseSettings::default();
    assert!(settings.validate().is_ok());
    assert!(settings.parallel);
    assert_eq!(settings.parallel_min_rows, 64);
    assert!(!settings.verbose);

    // a zero threshold is rejected by the builder
    let result = SparseSettingsBuilder::default().parallel_min_rows(0).build();
    assert!(result.is_err());

    // and by direct validation of a modified struct
    let settings = SparseSettings {
        parallel_min_rows: 0,
        ..SparseSettings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("parallel_min_rows"))
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_settings_json() {
    let settings = SparseSettingsBuilder::default()
        .max_threads(4)
        .build()
        .unwrap();
    let json = serde_json::to_string(&settings).unwrap();
    let back: SparseSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(settings, back);

    // missing fields fall back to defaults
    let partial: SparseSettings = serde_json::from_str(r#"{"verbose": true}"#).unwrap();
    assert!(partial.verbose);
    assert_eq!(partial.parallel_min_rows, 64);
}
