//! CSV dataset reading.

mod header;
mod reader;

pub use header::{DatasetHeader, normalize_header};
pub use reader::{DatasetReader, DatasetRow, Rows};
