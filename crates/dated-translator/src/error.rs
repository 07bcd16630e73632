//! Error types for dated term translation.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while constructing or querying a [`Lookup`](crate::Lookup).
#[derive(Debug, Error)]
pub enum LookupError {
    // === Configuration Errors ===
    /// Configuration is structurally invalid. Raised before any I/O.
    #[error("setup error: {reason}")]
    Setup { reason: String },

    // === Schema Errors ===
    /// A configured column is absent from the dataset header.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === File System Errors ===
    /// Dataset file does not exist.
    #[error("dataset not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the dataset.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the dataset.
    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Dataset has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    // === Data Integrity Errors ===
    /// A term cell is empty after trimming.
    #[error("blank term in column '{column}' at {path}:{line}")]
    BlankTerm {
        path: PathBuf,
        line: u64,
        column: String,
    },

    /// A date cell could not be parsed as `YYYY-MM-DD`.
    #[error("invalid date '{value}' in column '{column}' at {path}:{line}")]
    InvalidDate {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },

    /// A row whose start date falls after its end date.
    #[error("start date {start} is after end date {end} at {path}:{line}")]
    InvertedInterval {
        path: PathBuf,
        line: u64,
        start: NaiveDate,
        end: NaiveDate,
    },

    // === Query Errors ===
    /// No interval for the term contains the date.
    #[error("no translation for '{term}' on {date}")]
    NotFound { term: String, date: NaiveDate },

    /// Overlapping intervals resolve the term to different values.
    #[error("ambiguous translation for '{term}' on {date}: {}", .candidates.join(", "))]
    Ambiguous {
        term: String,
        date: NaiveDate,
        candidates: Vec<String>,
    },

    /// A query date string is not a `YYYY-MM-DD` date.
    #[error("invalid query date '{value}'")]
    InvalidQueryDate { value: String },
}

impl LookupError {
    pub(crate) fn setup(reason: impl Into<String>) -> Self {
        Self::Setup {
            reason: reason.into(),
        }
    }

    /// True for configuration errors detected before touching the dataset.
    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }

    /// True for row-level problems found while building the index.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            Self::BlankTerm { .. } | Self::InvalidDate { .. } | Self::InvertedInterval { .. }
        )
    }
}

/// Result type for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;
