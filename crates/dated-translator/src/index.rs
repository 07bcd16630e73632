//! Interval index over the rows of a dataset.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{ColumnRole, LookupConfig};
use crate::dataset::{DatasetReader, DatasetRow};
use crate::date::parse_date;
use crate::error::{LookupError, Result};
use crate::schema::{ColumnOffsets, validate_header, validate_types};

/// One dataset row: a term pair and the closed interval it is valid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalRecord {
    term_1: String,
    term_2: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    line: u64,
}

impl IntervalRecord {
    pub fn term_1(&self) -> &str {
        &self.term_1
    }

    pub fn term_2(&self) -> &str {
        &self.term_2
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Source line of the row in the dataset.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// True if `date` lies within `[start_date, end_date]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// The term paired with `term` in this record, if `term` is one of them.
    pub fn paired_term(&self, term: &str) -> Option<&str> {
        if self.term_1 == term {
            Some(&self.term_2)
        } else if self.term_2 == term {
            Some(&self.term_1)
        } else {
            None
        }
    }
}

/// How rows with blank terms or unusable dates are handled while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowPolicy {
    /// The first bad row fails the whole construction.
    #[default]
    Strict,
    /// Bad rows are excluded and kept as [`RowDiagnostic`]s.
    Lenient,
}

/// What was wrong with an excluded row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIssue {
    BlankTerm { column: String },
    InvalidDate { column: String, value: String },
    InvertedInterval { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssue::BlankTerm { column } => write!(f, "blank term in column '{column}'"),
            RowIssue::InvalidDate { column, value } => {
                write!(f, "invalid date '{value}' in column '{column}'")
            }
            RowIssue::InvertedInterval { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
        }
    }
}

/// A row excluded under [`RowPolicy::Lenient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    pub line: u64,
    pub issue: RowIssue,
}

impl RowDiagnostic {
    fn into_error(self, path: &Path) -> LookupError {
        match self.issue {
            RowIssue::BlankTerm { column } => LookupError::BlankTerm {
                path: path.to_path_buf(),
                line: self.line,
                column,
            },
            RowIssue::InvalidDate { column, value } => LookupError::InvalidDate {
                path: path.to_path_buf(),
                line: self.line,
                column,
                value,
            },
            RowIssue::InvertedInterval { start, end } => LookupError::InvertedInterval {
                path: path.to_path_buf(),
                line: self.line,
                start,
                end,
            },
        }
    }
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.issue)
    }
}

/// Records in dataset order plus per-term posting lists.
///
/// Built once and never mutated; every query takes `&self`.
#[derive(Debug, Clone)]
pub struct IntervalIndex {
    path: PathBuf,
    records: Vec<IntervalRecord>,
    by_term_1: HashMap<String, Vec<usize>>,
    by_term_2: HashMap<String, Vec<usize>>,
    diagnostics: Vec<RowDiagnostic>,
}

impl IntervalIndex {
    /// Read the configured dataset and index every row.
    ///
    /// The configuration is checked before the dataset is opened, and the
    /// header before any row is parsed.
    pub fn build(config: &LookupConfig, policy: RowPolicy) -> Result<Self> {
        validate_types(config)?;
        let mut reader = DatasetReader::open(config.dataset())?;
        let offsets = validate_header(config, reader.header(), reader.path())?;
        Self::from_reader(&mut reader, config, offsets, policy)
    }

    fn from_reader(
        reader: &mut DatasetReader,
        config: &LookupConfig,
        offsets: ColumnOffsets,
        policy: RowPolicy,
    ) -> Result<Self> {
        let path = reader.path().to_path_buf();
        let mut records = Vec::new();
        let mut diagnostics = Vec::new();

        for row in reader.rows() {
            let row = row?;
            match parse_row(&row, config, offsets) {
                Ok(record) => records.push(record),
                Err(diagnostic) => match policy {
                    RowPolicy::Strict => return Err(diagnostic.into_error(&path)),
                    RowPolicy::Lenient => {
                        tracing::warn!(
                            path = %path.display(),
                            line = diagnostic.line,
                            issue = %diagnostic.issue,
                            "Skipping dataset row"
                        );
                        diagnostics.push(diagnostic);
                    }
                },
            }
        }

        let mut by_term_1: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_term_2: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_term_1.entry(record.term_1.clone()).or_default().push(idx);
            by_term_2.entry(record.term_2.clone()).or_default().push(idx);
        }

        Ok(Self {
            path,
            records,
            by_term_1,
            by_term_2,
            diagnostics,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in dataset order.
    pub fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows excluded during a lenient build.
    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        &self.diagnostics
    }

    /// True if `term` appears on either side of any record.
    pub fn contains_term(&self, term: &str) -> bool {
        self.by_term_1.contains_key(term) || self.by_term_2.contains_key(term)
    }

    /// Number of distinct terms across both columns.
    pub fn unique_terms(&self) -> usize {
        self.by_term_1.len()
            + self
                .by_term_2
                .keys()
                .filter(|term| !self.by_term_1.contains_key(*term))
                .count()
    }

    /// Records whose interval contains `date`, in dataset order.
    pub fn records_at(&self, date: NaiveDate) -> impl Iterator<Item = &IntervalRecord> {
        self.records.iter().filter(move |record| record.contains(date))
    }

    /// Records that mention `term` and contain `date`, in dataset order.
    pub fn matches(&self, term: &str, date: NaiveDate) -> Vec<&IntervalRecord> {
        let mut candidates: Vec<usize> = self
            .by_term_1
            .get(term)
            .into_iter()
            .chain(self.by_term_2.get(term))
            .flatten()
            .copied()
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        candidates
            .into_iter()
            .map(|idx| &self.records[idx])
            .filter(|record| record.contains(date))
            .collect()
    }

    /// Distinct terms paired with `term` on `date`, in dataset order.
    pub fn paired_terms(&self, term: &str, date: NaiveDate) -> Vec<&str> {
        let mut paired: Vec<&str> = Vec::new();
        for record in self.matches(term, date) {
            if let Some(other) = record.paired_term(term)
                && !paired.contains(&other)
            {
                paired.push(other);
            }
        }
        paired
    }

    /// Earliest start date and latest end date across all records.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.records.iter().map(IntervalRecord::start_date).min()?;
        let end = self.records.iter().map(IntervalRecord::end_date).max()?;
        Some((start, end))
    }
}

fn parse_row(
    row: &DatasetRow,
    config: &LookupConfig,
    offsets: ColumnOffsets,
) -> std::result::Result<IntervalRecord, RowDiagnostic> {
    let term_at = |role: ColumnRole| {
        let value = row.get(offsets.offset(role));
        if value.is_empty() {
            Err(RowDiagnostic {
                line: row.line(),
                issue: RowIssue::BlankTerm {
                    column: config.column(role).to_string(),
                },
            })
        } else {
            Ok(value.to_string())
        }
    };

    let term_1 = term_at(ColumnRole::Term1)?;
    let term_2 = term_at(ColumnRole::Term2)?;

    let date_at = |role: ColumnRole| {
        let value = row.get(offsets.offset(role));
        parse_date(value).ok_or_else(|| RowDiagnostic {
            line: row.line(),
            issue: RowIssue::InvalidDate {
                column: config.column(role).to_string(),
                value: value.to_string(),
            },
        })
    };

    let start_date = date_at(ColumnRole::StartDate)?;
    let end_date = date_at(ColumnRole::EndDate)?;
    if start_date > end_date {
        return Err(RowDiagnostic {
            line: row.line(),
            issue: RowIssue::InvertedInterval {
                start: start_date,
                end: end_date,
            },
        });
    }

    Ok(IntervalRecord {
        term_1,
        term_2,
        start_date,
        end_date,
        line: row.line(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn build_from(csv: &str, policy: RowPolicy) -> Result<IntervalIndex> {
        let config = LookupConfig::new("test.csv");
        let mut reader = DatasetReader::from_bytes("test.csv", csv.as_bytes().to_vec())?;
        let offsets = validate_header(&config, reader.header(), reader.path())?;
        IntervalIndex::from_reader(&mut reader, &config, offsets, policy)
    }

    const TITLES: &str = "term_1,term_2,start_date,end_date
Morning Chronicle,Chronicle,1800-01-01,1850-12-31
Morning Chronicle,Evening Chronicle,1851-01-01,1860-12-31
Daily News,News,1846-01-21,1912-05-16
";

    #[test]
    fn test_build_keeps_dataset_order() {
        let index = build_from(TITLES, RowPolicy::Strict).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.records()[0].term_2(), "Chronicle");
        assert_eq!(index.records()[2].term_1(), "Daily News");
        assert_eq!(index.records()[2].line(), 4);
        assert!(index.diagnostics().is_empty());
    }

    #[test]
    fn test_interval_is_closed() {
        let index = build_from(TITLES, RowPolicy::Strict).unwrap();
        let record = &index.records()[0];
        assert!(record.contains(date(1800, 1, 1)));
        assert!(record.contains(date(1850, 12, 31)));
        assert!(!record.contains(date(1799, 12, 31)));
        assert!(!record.contains(date(1851, 1, 1)));
    }

    #[test]
    fn test_paired_terms_by_date() {
        let index = build_from(TITLES, RowPolicy::Strict).unwrap();
        assert_eq!(
            index.paired_terms("Morning Chronicle", date(1820, 3, 1)),
            vec!["Chronicle"]
        );
        assert_eq!(
            index.paired_terms("Morning Chronicle", date(1855, 3, 1)),
            vec!["Evening Chronicle"]
        );
        assert_eq!(index.paired_terms("News", date(1900, 1, 1)), vec!["Daily News"]);
        assert!(index.paired_terms("Morning Chronicle", date(1870, 1, 1)).is_empty());
        assert!(index.paired_terms("Unknown", date(1820, 1, 1)).is_empty());
    }

    #[test]
    fn test_matches_merges_both_columns_in_order() {
        let csv = "term_1,term_2,start_date,end_date
X,A,2000-01-01,2000-12-31
A,Y,2000-01-01,2000-12-31
";
        let index = build_from(csv, RowPolicy::Strict).unwrap();
        let matches = index.matches("A", date(2000, 6, 1));
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].line(), 2);
        assert_eq!(index.paired_terms("A", date(2000, 6, 1)), vec!["X", "Y"]);
    }

    #[test]
    fn test_self_paired_record_matches_once() {
        let csv = "term_1,term_2,start_date,end_date
A,A,2000-01-01,2000-12-31
";
        let index = build_from(csv, RowPolicy::Strict).unwrap();
        assert_eq!(index.matches("A", date(2000, 6, 1)).len(), 1);
        assert_eq!(index.unique_terms(), 1);
    }

    #[test]
    fn test_strict_rejects_invalid_date() {
        let csv = "term_1,term_2,start_date,end_date
A,B,2020-01-01,2020-12-31
C,D,2020-01-01,someday
";
        let err = build_from(csv, RowPolicy::Strict).unwrap_err();
        match err {
            LookupError::InvalidDate {
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "end_date");
                assert_eq!(value, "someday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_empty_date() {
        let csv = "term_1,term_2,start_date,end_date
A,B,,2020-12-31
";
        let err = build_from(csv, RowPolicy::Strict).unwrap_err();
        assert!(err.is_data_integrity());
    }

    #[test]
    fn test_strict_rejects_inverted_interval() {
        let csv = "term_1,term_2,start_date,end_date
A,B,2021-01-01,2020-12-31
";
        let err = build_from(csv, RowPolicy::Strict).unwrap_err();
        assert!(matches!(err, LookupError::InvertedInterval { line: 2, .. }));
    }

    #[test]
    fn test_strict_rejects_blank_term() {
        let csv = "term_1,term_2,start_date,end_date
A,B,2020-01-01,2020-12-31
  ,B,2020-01-01,2020-12-31
";
        let err = build_from(csv, RowPolicy::Strict).unwrap_err();
        assert!(err.is_data_integrity());
        match err {
            LookupError::BlankTerm { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "term_1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lenient_skips_blank_term() {
        let csv = "term_1,term_2,start_date,end_date
,B,2020-01-01,2020-12-31
A,,2020-01-01,2020-12-31
C,D,2020-01-01,2020-12-31
";
        let index = build_from(csv, RowPolicy::Lenient).unwrap();
        assert_eq!(index.len(), 1);
        assert!(!index.contains_term(""));
        assert!(index.paired_terms("", date(2020, 6, 1)).is_empty());
        assert_eq!(
            index.diagnostics()[1].to_string(),
            "line 3: blank term in column 'term_2'"
        );
    }

    #[test]
    fn test_build_validates_config_before_io() {
        let err = IntervalIndex::build(&LookupConfig::default(), RowPolicy::Strict).unwrap_err();
        assert!(err.is_setup(), "unexpected error: {err}");

        let config = LookupConfig::new("/no/such/file.csv").with_start_date_column(" ");
        let err = IntervalIndex::build(&config, RowPolicy::Lenient).unwrap_err();
        assert!(err.is_setup(), "unexpected error: {err}");
    }

    #[test]
    fn test_single_day_interval_is_valid() {
        let csv = "term_1,term_2,start_date,end_date
A,B,2020-02-29,2020-02-29
";
        let index = build_from(csv, RowPolicy::Strict).unwrap();
        assert_eq!(index.paired_terms("A", date(2020, 2, 29)), vec!["B"]);
    }

    #[test]
    fn test_lenient_skips_and_records_diagnostics() {
        let csv = "term_1,term_2,start_date,end_date
A,B,2020-01-01,2020-12-31
C,D,2020-13-01,2020-12-31
E,F,2021-01-01,2020-01-01
G,H,2020-01-01,2020-12-31
";
        let index = build_from(csv, RowPolicy::Lenient).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.records()[1].term_1(), "G");
        assert_eq!(
            index.diagnostics(),
            [
                RowDiagnostic {
                    line: 3,
                    issue: RowIssue::InvalidDate {
                        column: "start_date".to_string(),
                        value: "2020-13-01".to_string(),
                    },
                },
                RowDiagnostic {
                    line: 4,
                    issue: RowIssue::InvertedInterval {
                        start: date(2021, 1, 1),
                        end: date(2020, 1, 1),
                    },
                },
            ]
        );
        assert_eq!(
            index.diagnostics()[0].to_string(),
            "line 3: invalid date '2020-13-01' in column 'start_date'"
        );
    }

    #[test]
    fn test_csv_errors_are_fatal_even_when_lenient() {
        let csv = "term_1,term_2,start_date,end_date
A,B,2020-01-01
";
        let err = build_from(csv, RowPolicy::Lenient).unwrap_err();
        assert!(matches!(err, LookupError::Csv { .. }));
    }

    #[test]
    fn test_header_only_dataset_builds_empty_index() {
        let index = build_from("term_1,term_2,start_date,end_date\n", RowPolicy::Strict).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.date_span(), None);
    }

    #[test]
    fn test_records_at_and_date_span() {
        let index = build_from(TITLES, RowPolicy::Strict).unwrap();
        let at: Vec<&str> = index
            .records_at(date(1850, 6, 1))
            .map(IntervalRecord::term_1)
            .collect();
        assert_eq!(at, vec!["Morning Chronicle", "Daily News"]);
        assert_eq!(index.date_span(), Some((date(1800, 1, 1), date(1912, 5, 16))));
    }

    #[test]
    fn test_contains_and_unique_terms() {
        let index = build_from(TITLES, RowPolicy::Strict).unwrap();
        assert!(index.contains_term("Evening Chronicle"));
        assert!(index.contains_term("Daily News"));
        assert!(!index.contains_term("Times"));
        assert_eq!(index.unique_terms(), 5);
    }
}
