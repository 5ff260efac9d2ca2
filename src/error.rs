//! The [`LollipopError`] `enum` definition and error messages.
//!
use thiserror::Error;

/// The [`LollipopError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum LollipopError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    // Variant table errors
    #[error("Variant table is missing the required column '{0}'")]
    MissingColumn(String),
    #[error("No variants with a numeric position remain ({dropped} rows dropped)")]
    EmptyDataset { dropped: usize },
    #[error("Row could not be parsed: position '{0}' is not an amino acid coordinate")]
    MalformedRow(String),

    // Cohort configuration errors
    #[error("Cohort '{0}' has no matching count columns")]
    UnknownCohort(String),
    #[error("Unknown cohort column convention '{0}'")]
    UnknownConvention(String),
    #[error("Column template '{0}' must contain the '{{cohort}}' placeholder exactly once")]
    InvalidTemplate(String),
}
