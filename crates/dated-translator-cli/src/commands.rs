use anyhow::{Context, Result};
use tracing::info_span;

use dated_translator::{
    ColumnRole, Lookup, LookupConfig, LookupError, LookupOptions, OverlapPolicy, RowPolicy,
};
use dated_translator_cli::report::{diagnostics_table, records_table, summary_table, to_json};

use crate::cli::{DatasetArgs, ListArgs, OutputFormatArg, TranslateArgs};

pub fn run_translate(args: &TranslateArgs) -> Result<()> {
    let lookup = load_lookup(&args.dataset)?;
    if args.all {
        let paired = lookup.translate_all(&args.term, args.date);
        if paired.is_empty() {
            return Err(LookupError::NotFound {
                term: args.term.clone(),
                date: args.date,
            }
            .into());
        }
        for term in paired {
            println!("{term}");
        }
    } else {
        println!("{}", lookup.translate(&args.term, args.date)?);
    }
    Ok(())
}

pub fn run_check(args: &DatasetArgs) -> Result<()> {
    let lookup = load_lookup(args)?;
    println!("{}", summary_table(&lookup.summary()));
    if let Some(table) = diagnostics_table(lookup.diagnostics()) {
        println!();
        println!("Skipped rows:");
        println!("{table}");
    }
    Ok(())
}

pub fn run_list(args: &ListArgs) -> Result<()> {
    let lookup = load_lookup(&args.dataset)?;
    let records = match args.at {
        Some(date) => lookup.records_at(date),
        None => lookup.records().iter().collect(),
    };
    match args.format {
        OutputFormatArg::Table => println!("{}", records_table(records)),
        OutputFormatArg::Json => println!("{}", to_json(&records).context("serialize records")?),
    }
    Ok(())
}

fn load_lookup(args: &DatasetArgs) -> Result<Lookup> {
    let config = resolve_config(args)?;
    let span = info_span!("load", dataset = %config.dataset().display());
    let _guard = span.enter();

    let options = LookupOptions::default()
        .with_row_policy(if args.lenient {
            RowPolicy::Lenient
        } else {
            RowPolicy::Strict
        })
        .with_overlap_policy(if args.reject_overlaps {
            OverlapPolicy::Reject
        } else {
            OverlapPolicy::FirstMatch
        });

    Lookup::with_options(config, options)
        .with_context(|| format!("load dataset {}", config_label(args)))
}

/// Merge the optional JSON config file with command-line flags.
fn resolve_config(args: &DatasetArgs) -> Result<LookupConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            LookupConfig::from_json_str(&json)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => LookupConfig::default(),
    };

    if let Some(dataset) = &args.dataset {
        config.dataset = dataset.clone();
    }
    let overrides = [
        (ColumnRole::Term1, &args.term_1_column),
        (ColumnRole::Term2, &args.term_2_column),
        (ColumnRole::StartDate, &args.start_date_column),
        (ColumnRole::EndDate, &args.end_date_column),
    ];
    for (role, name) in overrides {
        if let Some(name) = name {
            config = config.with_column(role, name.as_str());
        }
    }
    Ok(config)
}

fn config_label(args: &DatasetArgs) -> String {
    match (&args.dataset, &args.config) {
        (Some(dataset), _) => dataset.display().to_string(),
        (None, Some(config)) => format!("from {}", config.display()),
        (None, None) => "(no dataset given)".to_string(),
    }
}
