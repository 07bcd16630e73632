//! Lookup configuration: dataset location and the four column names.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{LookupError, Result};

pub const DEFAULT_TERM_1_COLUMN: &str = "term_1";
pub const DEFAULT_TERM_2_COLUMN: &str = "term_2";
pub const DEFAULT_START_DATE_COLUMN: &str = "start_date";
pub const DEFAULT_END_DATE_COLUMN: &str = "end_date";

/// Option key naming the dataset location.
pub const DATASET_OPTION: &str = "dataset";

/// The column a configuration option refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Term1,
    Term2,
    StartDate,
    EndDate,
}

impl ColumnRole {
    /// All roles, in the order they are validated.
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Term1,
        ColumnRole::Term2,
        ColumnRole::StartDate,
        ColumnRole::EndDate,
    ];

    /// Configuration key for this role.
    pub fn option_name(self) -> &'static str {
        match self {
            ColumnRole::Term1 => "term_1_column",
            ColumnRole::Term2 => "term_2_column",
            ColumnRole::StartDate => "start_date_column",
            ColumnRole::EndDate => "end_date_column",
        }
    }

    /// Column name used when the option is not supplied.
    pub fn default_column(self) -> &'static str {
        match self {
            ColumnRole::Term1 => DEFAULT_TERM_1_COLUMN,
            ColumnRole::Term2 => DEFAULT_TERM_2_COLUMN,
            ColumnRole::StartDate => DEFAULT_START_DATE_COLUMN,
            ColumnRole::EndDate => DEFAULT_END_DATE_COLUMN,
        }
    }

    fn from_option_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.option_name() == name)
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.option_name())
    }
}

/// Construction options for a [`Lookup`](crate::Lookup).
///
/// The default value has no dataset and fails validation; use
/// [`LookupConfig::new`] or [`LookupConfig::from_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Location of the CSV dataset.
    pub dataset: PathBuf,
    pub term_1_column: String,
    pub term_2_column: String,
    pub start_date_column: String,
    pub end_date_column: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::new(),
            term_1_column: DEFAULT_TERM_1_COLUMN.to_string(),
            term_2_column: DEFAULT_TERM_2_COLUMN.to_string(),
            start_date_column: DEFAULT_START_DATE_COLUMN.to_string(),
            end_date_column: DEFAULT_END_DATE_COLUMN.to_string(),
        }
    }
}

impl LookupConfig {
    /// Configuration for `dataset` with the default column names.
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_term_1_column(mut self, name: impl Into<String>) -> Self {
        self.term_1_column = name.into();
        self
    }

    #[must_use]
    pub fn with_term_2_column(mut self, name: impl Into<String>) -> Self {
        self.term_2_column = name.into();
        self
    }

    #[must_use]
    pub fn with_start_date_column(mut self, name: impl Into<String>) -> Self {
        self.start_date_column = name.into();
        self
    }

    #[must_use]
    pub fn with_end_date_column(mut self, name: impl Into<String>) -> Self {
        self.end_date_column = name.into();
        self
    }

    /// Set the column for `role`.
    #[must_use]
    pub fn with_column(self, role: ColumnRole, name: impl Into<String>) -> Self {
        match role {
            ColumnRole::Term1 => self.with_term_1_column(name),
            ColumnRole::Term2 => self.with_term_2_column(name),
            ColumnRole::StartDate => self.with_start_date_column(name),
            ColumnRole::EndDate => self.with_end_date_column(name),
        }
    }

    pub fn dataset(&self) -> &Path {
        &self.dataset
    }

    /// Column name configured for `role`.
    pub fn column(&self, role: ColumnRole) -> &str {
        match role {
            ColumnRole::Term1 => &self.term_1_column,
            ColumnRole::Term2 => &self.term_2_column,
            ColumnRole::StartDate => &self.start_date_column,
            ColumnRole::EndDate => &self.end_date_column,
        }
    }

    /// Build a configuration from loosely typed options, e.g. a parsed JSON file.
    ///
    /// Every value is checked structurally: `dataset` and the `*_column`
    /// options must be strings. Numbers, mappings, lists, booleans and null
    /// are rejected rather than coerced. Unknown keys are rejected too.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(options) = value else {
            return Err(LookupError::setup(format!(
                "configuration must be a mapping, got {}",
                value_kind(value)
            )));
        };

        if let Some(key) = options.keys().find(|key| {
            key.as_str() != DATASET_OPTION && ColumnRole::from_option_name(key).is_none()
        }) {
            return Err(LookupError::setup(format!("unrecognized option '{key}'")));
        }

        let dataset = match options.get(DATASET_OPTION) {
            None | Some(Value::Null) => {
                return Err(LookupError::setup("the 'dataset' option is required"));
            }
            Some(Value::String(dataset)) => dataset,
            Some(other) => {
                return Err(LookupError::setup(format!(
                    "'dataset' must be text, got {}",
                    value_kind(other)
                )));
            }
        };

        let mut config = Self::new(dataset);
        for role in ColumnRole::ALL {
            if let Some(name) = text_option(options, role)? {
                config = config.with_column(role, name);
            }
        }
        Ok(config)
    }

    /// Parse a JSON document and build a configuration from it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| LookupError::setup(format!("invalid configuration JSON: {e}")))?;
        Self::from_value(&value)
    }
}

fn text_option<'a>(options: &'a Map<String, Value>, role: ColumnRole) -> Result<Option<&'a str>> {
    match options.get(role.option_name()) {
        None => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.as_str())),
        Some(other) => Err(LookupError::setup(format!(
            "'{role}' must be text, got {}",
            value_kind(other)
        ))),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
