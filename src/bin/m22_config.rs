//! Command-line front end for the configurator.
//!
//! Each generation subcommand resolves the reference-data directory, expands
//! the selections into catalog numbers and prints them as a table or JSON.
//! `--expand` drills into the sub-components of one catalog number and, when
//! a component database is available, cross-checks the breakdown against it.
//! With `--format json` everything goes into one document on stdout:
//! `{"entries": [...], "expanded": [...], "cross_checks": [...]}`.
//! Any selection left out defaults to `Any`.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use m22_configurator::catalog::rules;
use m22_configurator::logging::init_logging;
use m22_configurator::render::{self, JsonReport, Layout};
use m22_configurator::{
    CatalogEntry, ComponentLookup, Configurator, CrossCheck, IlluminatedRequest,
    NonIlluminatedRequest, PlateScheme, ReferenceData, Selection, TableKind, complete_only, expand,
    find_data_dir, resolve_component_db, resolve_rows,
};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

#[derive(Parser, Debug)]
#[command(name = "m22-config")]
#[command(about = "Enumerate M22 pushbutton catalog numbers from attribute selections")]
struct Cli {
    /// Reference-data directory holding the CSV tables (or set M22_DATA_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// SQLite database of assembled SKUs and their components.
    #[arg(long, global = true, value_name = "PATH", env = "M22_COMPONENT_DB")]
    component_db: Option<PathBuf>,
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Non-illuminated pushbuttons: operator-only and complete devices.
    NonIlluminated(NonIlluminatedArgs),
    /// Illuminated pushbuttons: complete devices with a light unit.
    Illuminated(IlluminatedArgs),
    /// List the choices accepted for one attribute category.
    Options {
        #[arg(value_parser = parse_table_kind)]
        category: TableKind,
    },
    /// Show the stored components of an assembled SKU.
    Components {
        sku: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Print the sub-components of every listed row with this catalog number.
    #[arg(long, value_name = "CATALOG_NUMBER")]
    expand: Option<String>,
}

#[derive(Args, Debug)]
struct NonIlluminatedArgs {
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    bezel: Selection,
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    operator: Selection,
    /// Button color label.
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    color: Selection,
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    contact_block: Selection,
    /// Only list complete devices (those including a contact block).
    #[arg(long)]
    complete_only: bool,
    /// Button plate template: `uniform` or `by-style` (XDH plates for extended operators).
    #[arg(
        long,
        default_value = "uniform",
        value_parser = parse_plate_scheme,
        env = "M22_PLATE_SCHEME"
    )]
    plate_scheme: PlateScheme,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct IlluminatedArgs {
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    bezel: Selection,
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    operator: Selection,
    /// Lens color label.
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    lens: Selection,
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    contact_block: Selection,
    /// Light unit color. `Any` matches the lens color.
    #[arg(long, default_value = "Any", value_parser = parse_selection)]
    light_unit: Selection,
    #[command(flatten)]
    output: OutputArgs,
}

fn parse_selection(raw: &str) -> Result<Selection, String> {
    Ok(Selection::from_label(raw))
}

fn parse_table_kind(raw: &str) -> Result<TableKind, String> {
    TableKind::try_from(raw).map_err(|err| err.to_string())
}

fn parse_plate_scheme(raw: &str) -> Result<PlateScheme, String> {
    PlateScheme::try_from(raw).map_err(|err| err.to_string())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let data_dir = find_data_dir(cli.data_dir.as_deref())?;
    let component_db = resolve_component_db(cli.component_db.as_deref(), &data_dir);

    match cli.command {
        Command::NonIlluminated(args) => {
            let data = ReferenceData::load_cached(&data_dir)?;
            note_guard_without_contacts(&data, &args.operator);
            let request = NonIlluminatedRequest {
                bezel: args.bezel,
                operator: args.operator,
                color: args.color,
                contact_block: args.contact_block,
            };
            let entries = Configurator::new(&data)
                .with_plate_scheme(args.plate_scheme)
                .non_illuminated(&request);
            let shown = if args.complete_only {
                complete_only(&entries)
            } else {
                entries.iter().collect()
            };
            emit(&shown, Layout::NonIlluminated, &args.output, component_db.as_deref())
        }
        Command::Illuminated(args) => {
            let data = ReferenceData::load_cached(&data_dir)?;
            let request = IlluminatedRequest {
                bezel: args.bezel,
                operator: args.operator,
                lens: args.lens,
                contact_block: args.contact_block,
                light_unit: args.light_unit,
            };
            let entries = Configurator::new(&data).illuminated(&request);
            let shown: Vec<&CatalogEntry> = entries.iter().collect();
            emit(&shown, Layout::Illuminated, &args.output, component_db.as_deref())
        }
        Command::Options { category } => {
            let data = ReferenceData::load_cached(&data_dir)?;
            let mut out = io::stdout().lock();
            for option in data.options(category) {
                writeln!(out, "{option}")?;
            }
            Ok(())
        }
        Command::Components { sku, format } => {
            let Some(db) = component_db else {
                bail!("no component database; pass --component-db or set M22_COMPONENT_DB");
            };
            let lookup = ComponentLookup::open(&db)?;
            let records = lookup.components(&sku)?;
            let mut out = io::stdout().lock();
            match format {
                OutputFormat::Table => render::write_components(&mut out, &sku, &records)?,
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut out, &records)?;
                    writeln!(out)?;
                }
            }
            Ok(())
        }
    }
}

fn emit(
    entries: &[&CatalogEntry],
    layout: Layout,
    output: &OutputArgs,
    component_db: Option<&Path>,
) -> Result<()> {
    let expanded = match output.expand.as_deref() {
        Some(number) => {
            let selected = expand(entries.iter().copied(), number);
            if selected.is_empty() {
                bail!("catalog number {number} is not among the listed results");
            }
            Some(selected)
        }
        None => None,
    };
    let cross_checks = match (&expanded, component_db) {
        (Some(selected), Some(db)) => Some(cross_check_all(db, selected)?),
        _ => None,
    };

    let mut out = io::stdout().lock();
    match output.format {
        OutputFormat::Table => {
            render::write_table(&mut out, entries, layout)?;
            if let Some(selected) = &expanded {
                writeln!(out)?;
                render::write_expansion(&mut out, selected)?;
            }
            for check in cross_checks.iter().flatten() {
                render::write_cross_check(&mut out, check)?;
            }
        }
        OutputFormat::Json => {
            let report = JsonReport {
                entries,
                expanded: expanded.as_deref(),
                cross_checks: cross_checks.as_deref(),
            };
            render::write_json(&mut out, &report)?;
        }
    }
    Ok(())
}

fn cross_check_all(db: &Path, selected: &[&CatalogEntry]) -> Result<Vec<CrossCheck>> {
    let lookup = ComponentLookup::open(db)?;
    selected
        .iter()
        .map(|entry| {
            lookup
                .cross_check(entry)
                .with_context(|| format!("cross-checking {}", entry.catalog_number))
        })
        .collect()
}

/// The bare guard is sold without contact blocks. Say so when every operator
/// the label selects is the bare guard, whatever contact block was chosen.
fn note_guard_without_contacts(data: &ReferenceData, operator: &Selection) {
    if operator.is_any() {
        return;
    }
    let rows = resolve_rows(&data.operators, operator);
    let guard_only = !rows.is_empty()
        && rows
            .iter()
            .all(|row| !rules::yields_complete_devices(&row.code));
    if guard_only {
        eprintln!(
            "note: operator '{operator}' is sold without contact blocks; contact-block choices do not apply"
        );
    }
}
