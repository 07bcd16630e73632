//! The public lookup handle.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::config::LookupConfig;
use crate::date::parse_date;
use crate::error::{LookupError, Result};
use crate::index::{IntervalIndex, IntervalRecord, RowDiagnostic, RowPolicy};

/// How [`Lookup::translate`] resolves overlapping intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Return the first match in dataset order.
    #[default]
    FirstMatch,
    /// Fail with [`LookupError::Ambiguous`] when matches disagree.
    Reject,
}

/// Behavioural options that are not part of the dataset configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    pub row_policy: RowPolicy,
    pub overlap_policy: OverlapPolicy,
}

impl LookupOptions {
    #[must_use]
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    #[must_use]
    pub fn with_overlap_policy(mut self, policy: OverlapPolicy) -> Self {
        self.overlap_policy = policy;
        self
    }
}

/// Counts describing a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupSummary {
    pub dataset: PathBuf,
    pub records: usize,
    pub skipped_rows: usize,
    pub unique_terms: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// Translates between paired terms for a point in time.
///
/// A `Lookup` is built once from a dataset and is read-only afterwards, so it
/// can be shared between threads freely.
///
/// ```ignore
/// use chrono::NaiveDate;
/// use dated_translator::{Lookup, LookupConfig};
///
/// let lookup = Lookup::new(LookupConfig::new("titles.csv"))?;
/// let date = NaiveDate::from_ymd_opt(1855, 3, 1).unwrap();
/// let title = lookup.translate("Morning Chronicle", date)?;
/// ```
#[derive(Debug, Clone)]
pub struct Lookup {
    config: LookupConfig,
    options: LookupOptions,
    index: IntervalIndex,
}

impl Lookup {
    /// Build a lookup with default options.
    pub fn new(config: LookupConfig) -> Result<Self> {
        Self::with_options(config, LookupOptions::default())
    }

    /// Build a lookup for `dataset` using the default column names.
    pub fn open(dataset: impl Into<PathBuf>) -> Result<Self> {
        Self::new(LookupConfig::new(dataset))
    }

    /// Build a lookup from loosely typed options such as a parsed JSON file.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::new(LookupConfig::from_value(value)?)
    }

    /// Validate `config`, read the dataset and index it.
    ///
    /// Configuration is validated before the dataset is opened, and the
    /// header is validated before any row is parsed. Any failure returns an
    /// error and no `Lookup`.
    pub fn with_options(config: LookupConfig, options: LookupOptions) -> Result<Self> {
        let index = IntervalIndex::build(&config, options.row_policy)?;

        tracing::info!(
            path = %config.dataset().display(),
            records = index.len(),
            skipped = index.diagnostics().len(),
            "Loaded dated term dataset"
        );

        Ok(Self {
            config,
            options,
            index,
        })
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn options(&self) -> LookupOptions {
        self.options
    }

    pub fn dataset(&self) -> &Path {
        self.config.dataset()
    }

    /// Translate `term` to the term paired with it on `date`.
    ///
    /// `term` may appear in either term column. With
    /// [`OverlapPolicy::FirstMatch`] the first matching row in dataset order
    /// wins; with [`OverlapPolicy::Reject`] matches that disagree are an
    /// error.
    pub fn translate(&self, term: &str, date: NaiveDate) -> Result<&str> {
        let paired = self.index.paired_terms(term, date);
        match (paired.as_slice(), self.options.overlap_policy) {
            ([], _) => Err(LookupError::NotFound {
                term: term.to_string(),
                date,
            }),
            ([only], _) | ([only, ..], OverlapPolicy::FirstMatch) => Ok(*only),
            (candidates, OverlapPolicy::Reject) => {
                tracing::debug!(term, %date, count = candidates.len(), "Ambiguous translation");
                Err(LookupError::Ambiguous {
                    term: term.to_string(),
                    date,
                    candidates: candidates.iter().map(ToString::to_string).collect(),
                })
            }
        }
    }

    /// Like [`translate`](Self::translate) with a `YYYY-MM-DD` date string.
    pub fn translate_str(&self, term: &str, date: &str) -> Result<&str> {
        let parsed = parse_date(date).ok_or_else(|| LookupError::InvalidQueryDate {
            value: date.to_string(),
        })?;
        self.translate(term, parsed)
    }

    /// Every distinct term paired with `term` on `date`, in dataset order.
    pub fn translate_all(&self, term: &str, date: NaiveDate) -> Vec<&str> {
        self.index.paired_terms(term, date)
    }

    /// Records in dataset order.
    pub fn records(&self) -> &[IntervalRecord] {
        self.index.records()
    }

    /// Records whose interval contains `date`.
    pub fn records_at(&self, date: NaiveDate) -> Vec<&IntervalRecord> {
        self.index.records_at(date).collect()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.index.contains_term(term)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Rows excluded while building with [`RowPolicy::Lenient`].
    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        self.index.diagnostics()
    }

    pub fn summary(&self) -> LookupSummary {
        let span = self.index.date_span();
        LookupSummary {
            dataset: self.dataset().to_path_buf(),
            records: self.index.len(),
            skipped_rows: self.index.diagnostics().len(),
            unique_terms: self.index.unique_terms(),
            earliest: span.map(|(start, _)| start),
            latest: span.map(|(_, end)| end),
        }
    }
}
