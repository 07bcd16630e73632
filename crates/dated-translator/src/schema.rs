//! Configuration and dataset schema validation.
//!
//! Validation runs in two fixed stages. [`validate_types`] checks the
//! configuration alone and never touches the filesystem. [`validate_header`]
//! runs once the dataset header has been read and resolves each configured
//! column to its offset, so rows are read positionally afterwards.

use std::path::Path;

use crate::config::{ColumnRole, LookupConfig};
use crate::dataset::DatasetHeader;
use crate::error::{LookupError, Result};

/// Header offsets of the four configured columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOffsets {
    pub term_1: usize,
    pub term_2: usize,
    pub start_date: usize,
    pub end_date: usize,
}

impl ColumnOffsets {
    pub fn offset(&self, role: ColumnRole) -> usize {
        match role {
            ColumnRole::Term1 => self.term_1,
            ColumnRole::Term2 => self.term_2,
            ColumnRole::StartDate => self.start_date,
            ColumnRole::EndDate => self.end_date,
        }
    }
}

/// Check that the configuration names a dataset and four non-blank columns.
pub fn validate_types(config: &LookupConfig) -> Result<()> {
    if config.dataset.as_os_str().is_empty() {
        return Err(LookupError::setup("the 'dataset' option is required"));
    }

    for role in ColumnRole::ALL {
        if config.column(role).trim().is_empty() {
            return Err(LookupError::setup(format!(
                "'{role}' must be a non-empty column name"
            )));
        }
    }

    Ok(())
}

/// Check that every configured column is present in `header`.
///
/// Columns are checked in [`ColumnRole::ALL`] order and the first absent one
/// is reported.
pub fn validate_header(
    config: &LookupConfig,
    header: &DatasetHeader,
    path: &Path,
) -> Result<ColumnOffsets> {
    let resolve = |role: ColumnRole| {
        let column = config.column(role);
        header
            .position(column)
            .ok_or_else(|| LookupError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })
    };

    let offsets = ColumnOffsets {
        term_1: resolve(ColumnRole::Term1)?,
        term_2: resolve(ColumnRole::Term2)?,
        start_date: resolve(ColumnRole::StartDate)?,
        end_date: resolve(ColumnRole::EndDate)?,
    };

    tracing::debug!(
        path = %path.display(),
        term_1 = offsets.term_1,
        term_2 = offsets.term_2,
        start_date = offsets.start_date,
        end_date = offsets.end_date,
        "Resolved dataset columns"
    );

    Ok(offsets)
}
