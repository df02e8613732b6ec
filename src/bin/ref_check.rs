//! Validate a reference-data directory before shipping it.
//!
//! Usage:
//!   ref-check --data-dir data
//!   ref-check --json
//!
//! Loads all six tables with the same validation the configurator applies and
//! prints a row count per table, plus any labels shared by several rows.

use anyhow::{Context, Result};
use clap::Parser;
use m22_configurator::logging::init_logging;
use m22_configurator::{ReferenceData, ReferenceRow, ReferenceTable, find_data_dir};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ref-check")]
#[command(about = "Validate M22 reference tables and summarise their contents")]
struct Cli {
    /// Reference-data directory (defaults to discovery via M22_DATA_DIR or ./data).
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Emit the summary as JSON.
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let data_dir = find_data_dir(cli.data_dir.as_deref()).context("locating reference data")?;
    let data = ReferenceData::load(&data_dir)?;

    let mut duplicates: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
    collect_duplicates(&mut duplicates, &data.bezels);
    collect_duplicates(&mut duplicates, &data.operators);
    collect_duplicates(&mut duplicates, &data.button_colors);
    collect_duplicates(&mut duplicates, &data.lens_colors);
    collect_duplicates(&mut duplicates, &data.contact_blocks);

    if cli.json {
        let rows: BTreeMap<&str, usize> = data
            .summary()
            .into_iter()
            .map(|(kind, count)| (kind.as_str(), count))
            .collect();
        let report = json!({
            "data_dir": data_dir.display().to_string(),
            "rows": rows,
            "duplicate_labels": duplicates,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("reference data: {}", data_dir.display());
    for (kind, count) in data.summary() {
        println!("  {:<20} {count:>4} rows", kind.file_name());
    }
    for (table, labels) in &duplicates {
        println!("  duplicate labels in {table}: {}", labels.join(", "));
    }
    Ok(())
}

fn collect_duplicates<R: ReferenceRow>(
    into: &mut BTreeMap<&'static str, Vec<String>>,
    table: &ReferenceTable<R>,
) {
    let labels: Vec<String> = table
        .duplicate_labels()
        .into_iter()
        .map(str::to_string)
        .collect();
    if !labels.is_empty() {
        into.insert(table.kind().as_str(), labels);
    }
}
