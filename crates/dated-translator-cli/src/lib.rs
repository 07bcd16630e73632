//! CLI library components for the dated term translator.

pub mod logging;
pub mod report;
