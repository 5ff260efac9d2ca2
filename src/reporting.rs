//! Types for standardized reports to the user about recovered conditions.
//!
//! The rendering pipeline never fails: empty inputs, unknown cohorts and
//! unparseable rows are recovered from locally. The [`Report`] records which
//! of these happened, so callers can decide whether to tell the user why a
//! plot came out empty or partial.

use std::fmt;

use crate::error::LollipopError;

/// A condition the pipeline recovered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recovered {
    /// No rows had a numeric position; the rendering is empty.
    EmptyDataset,
    /// The cohort has no count columns; its counts read as zero.
    UnknownCohort(String),
    /// This many rows were dropped during normalization.
    MalformedRows(usize),
    /// A required column is missing; the rendering is empty.
    MissingColumn(String),
}

impl fmt::Display for Recovered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recovered::EmptyDataset => write!(f, "no variants with a numeric position"),
            Recovered::UnknownCohort(cohort) => {
                write!(f, "cohort '{}' has no count columns; counts read as zero", cohort)
            }
            Recovered::MalformedRows(n) => write!(f, "{} malformed rows were dropped", n),
            Recovered::MissingColumn(column) => {
                write!(f, "required column '{}' is missing", column)
            }
        }
    }
}

impl Recovered {
    /// Convert a recoverable error into its condition; other errors are
    /// handed back.
    pub fn from_error(error: LollipopError) -> Result<Vec<Recovered>, LollipopError> {
        match error {
            LollipopError::EmptyDataset { dropped } => {
                let mut conditions = vec![Recovered::EmptyDataset];
                if dropped > 0 {
                    conditions.push(Recovered::MalformedRows(dropped));
                }
                Ok(conditions)
            }
            LollipopError::UnknownCohort(cohort) => Ok(vec![Recovered::UnknownCohort(cohort)]),
            LollipopError::MalformedRow(_) => Ok(vec![Recovered::MalformedRows(1)]),
            LollipopError::MissingColumn(column) => Ok(vec![Recovered::MissingColumn(column)]),
            other => Err(other),
        }
    }
}

/// The [`CommandOutput<U>`] type output is generic over some data output
/// from a command, and a [`Report`] that reports information to the user.
pub struct CommandOutput<U> {
    pub value: U,
    pub report: Report,
}

impl<U> CommandOutput<U> {
    pub fn new(value: U, report: Report) -> Self {
        Self { value, report }
    }
}

/// A type to (semi) standardize reporting to the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<Recovered>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, condition: Recovered) {
        log::warn!("{}", condition);
        self.entries.push(condition)
    }

    /// Record the conditions of a recoverable error, returning any other error.
    pub fn recover(&mut self, error: LollipopError) -> Result<(), LollipopError> {
        for condition in Recovered::from_error(error)? {
            self.add_issue(condition);
        }
        Ok(())
    }

    pub fn entries(&self) -> &[Recovered] {
        &self.entries
    }

    pub fn contains(&self, condition: &Recovered) -> bool {
        self.entries.contains(condition)
    }

    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }
}
