//! Dataset header normalization.

/// Ordered column names from the first row of a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHeader {
    columns: Vec<String>,
}

impl DatasetHeader {
    /// Creates a header, normalizing every column name.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|c| normalize_header(c.as_ref()))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no named columns.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(String::is_empty)
    }

    /// Offset of the first column named exactly `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

/// Strips a UTF-8 byte order mark and surrounding whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_string()
}
