//! CSV dataset reader.
//!
//! The whole file is read in one blocking call; rows are then parsed lazily so
//! header checks run before any row is touched.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::{LookupError, Result};

use super::header::DatasetHeader;

/// A dataset whose header has been read and whose rows are pending.
pub struct DatasetReader {
    path: PathBuf,
    header: DatasetHeader,
    reader: csv::Reader<Cursor<Vec<u8>>>,
}

impl DatasetReader {
    /// Reads the dataset at `path` and parses its header row.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LookupError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LookupError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::from_bytes(path, bytes)
    }

    /// Parses an in-memory dataset. `path` is used only in error messages.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(Cursor::new(bytes));

        let header = reader
            .headers()
            .map(|record| DatasetHeader::new(record.iter()))
            .map_err(|e| LookupError::Csv {
                path: path.clone(),
                source: e,
            })?;

        if header.is_empty() {
            return Err(LookupError::EmptyCsv { path });
        }

        Ok(Self {
            path,
            header,
            reader,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> &DatasetHeader {
        &self.header
    }

    /// Iterates over the data rows in file order.
    pub fn rows(&mut self) -> Rows<'_> {
        Rows {
            path: self.path.as_path(),
            records: self.reader.records(),
        }
    }
}

/// Iterator over the data rows of a [`DatasetReader`].
pub struct Rows<'a> {
    path: &'a Path,
    records: csv::StringRecordsIter<'a, Cursor<Vec<u8>>>,
}

impl Iterator for Rows<'_> {
    type Item = Result<DatasetRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| DatasetRow {
                    line: record.position().map_or(0, csv::Position::line),
                    record,
                })
                .map_err(|e| LookupError::Csv {
                    path: self.path.to_path_buf(),
                    source: e,
                }),
        )
    }
}

/// One data row, addressed by column offset.
#[derive(Debug, Clone)]
pub struct DatasetRow {
    line: u64,
    record: csv::StringRecord,
}

impl DatasetRow {
    /// 1-based line number where the row starts.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Cell at `offset`, trimmed. Missing cells read as empty.
    pub fn get(&self, offset: usize) -> &str {
        self.record.get(offset).map(str::trim).unwrap_or_default()
    }
}
