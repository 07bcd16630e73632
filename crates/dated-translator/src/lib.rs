//! Point-in-time translation between paired terms.
//!
//! A dataset lists pairs of terms (for example a publication's old and new
//! title) together with the closed date interval during which each pair
//! applies. A [`Lookup`] loads such a dataset once and answers "what was the
//! other term on this date?" queries.
//!
//! # Features
//!
//! - **Configuration**: typed builder or loosely typed JSON options, validated
//!   before any file is opened
//! - **Schema Checks**: every configured column must be present in the header
//! - **Interval Index**: rows indexed by term, queried by date
//! - **Row Policies**: fail on the first bad row, or skip and keep diagnostics
//!
//! # Example
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use dated_translator::{Lookup, LookupConfig};
//!
//! let config = LookupConfig::new("titles.csv")
//!     .with_term_1_column("old_title")
//!     .with_term_2_column("new_title");
//! let lookup = Lookup::new(config)?;
//!
//! let date = NaiveDate::from_ymd_opt(1855, 3, 1).unwrap();
//! println!("{}", lookup.translate("Morning Chronicle", date)?);
//! ```

mod config;
mod dataset;
mod date;
mod error;
mod index;
mod lookup;
mod schema;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// === Error Types ===
pub use error::{LookupError, Result};

// === Configuration ===
pub use config::{
    ColumnRole, DATASET_OPTION, DEFAULT_END_DATE_COLUMN, DEFAULT_START_DATE_COLUMN,
    DEFAULT_TERM_1_COLUMN, DEFAULT_TERM_2_COLUMN, LookupConfig,
};

// === Schema Validation ===
pub use schema::{ColumnOffsets, validate_header, validate_types};

// === Dataset Reading ===
pub use dataset::{DatasetHeader, DatasetReader, DatasetRow, Rows, normalize_header};

// === Dates ===
pub use date::{DATE_FORMAT, format_date, parse_date};

// === Interval Index ===
pub use index::{IntervalIndex, IntervalRecord, RowDiagnostic, RowIssue, RowPolicy};

// === Lookup ===
pub use lookup::{Lookup, LookupOptions, LookupSummary, OverlapPolicy};
