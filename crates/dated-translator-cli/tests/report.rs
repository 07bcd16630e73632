//! Rendering tests for command output.

use std::io::Write;

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use dated_translator::{Lookup, LookupConfig, LookupOptions, RowPolicy};
use dated_translator_cli::report::{diagnostics_table, records_table, summary_table, to_json};

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

const TITLES: &str = "term_1,term_2,start_date,end_date
Daily News,The Daily News,1846-01-21,1912-05-16
Leeds Mercury,The Leeds Mercury,1807-01-03,1900-12-31
Leeds Mercury,Leeds Weekly,1901-01-01,1939-11-25
Western Mail,The Western Mail,not-a-date,1900-12-31
";

fn lenient_lookup(file: &NamedTempFile) -> Lookup {
    let options = LookupOptions::default().with_row_policy(RowPolicy::Lenient);
    Lookup::with_options(LookupConfig::new(file.path()), options).unwrap()
}

#[test]
fn summary_table_lists_counts_and_span() {
    let file = create_temp_csv(TITLES);
    let lookup = lenient_lookup(&file);
    let mut table = summary_table(&lookup.summary());
    table.force_no_tty();
    let rendered = table.to_string();

    assert!(rendered.contains("Records"));
    assert!(rendered.contains("Skipped rows"));
    assert!(rendered.contains("1807-01-03"));
    assert!(rendered.contains("1939-11-25"));
}

#[test]
fn diagnostics_table_only_when_rows_skipped() {
    let file = create_temp_csv(TITLES);
    let lookup = lenient_lookup(&file);
    let mut table = diagnostics_table(lookup.diagnostics()).expect("one skipped row");
    table.force_no_tty();
    assert!(table.to_string().contains("not-a-date"));

    let clean = create_temp_csv("term_1,term_2,start_date,end_date\nA,B,2020-01-01,2020-12-31\n");
    let lookup = Lookup::open(clean.path()).unwrap();
    assert!(diagnostics_table(lookup.diagnostics()).is_none());
}

#[test]
fn records_table_has_one_row_per_record() {
    let file = create_temp_csv(TITLES);
    let lookup = lenient_lookup(&file);
    let at = NaiveDate::from_ymd_opt(1905, 1, 1).unwrap();
    let mut table = records_table(lookup.records_at(at));
    table.force_no_tty();
    let rendered = table.to_string();

    assert_eq!(table.row_iter().count(), 2);
    assert!(rendered.contains("Leeds Weekly"));
    assert!(!rendered.contains("The Leeds Mercury"));
}

#[test]
fn records_serialize_as_json() {
    let file = create_temp_csv(TITLES);
    let lookup = lenient_lookup(&file);
    let json = to_json(lookup.records()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value.as_array().map(Vec::len), Some(3));
    assert_eq!(value[0]["term_1"], "Daily News");
    assert_eq!(value[0]["start_date"], "1846-01-21");
    assert_eq!(value[0]["line"], 2);
}
