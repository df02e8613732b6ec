#![allow(dead_code)]

use anyhow::{Context, Result};
use m22_configurator::{
    CatalogEntry, LabeledCode, LightUnitRow, OperatorRow, ReferenceData, ReferenceTable, TableKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Reference data shipped with the crate.
pub fn shipped_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn labeled(kind: TableKind, rows: &[(&str, &str)]) -> ReferenceTable<LabeledCode> {
    ReferenceTable::new(
        kind,
        rows.iter()
            .map(|(label, code)| LabeledCode::new(*label, *code))
            .collect(),
    )
}

pub fn operators(rows: &[(&str, &str)]) -> ReferenceTable<OperatorRow> {
    ReferenceTable::new(
        TableKind::Operator,
        rows.iter()
            .map(|(label, code)| OperatorRow::new(*label, *code))
            .collect(),
    )
}

pub fn light_units(rows: &[(&str, &str, &str)]) -> ReferenceTable<LightUnitRow> {
    ReferenceTable::new(
        TableKind::LightUnit,
        rows.iter()
            .map(|(code, color, voltage)| LightUnitRow::new(*code, *color, *voltage))
            .collect(),
    )
}

/// Small tables with the codes used throughout the generation scenarios.
pub fn scenario_data() -> ReferenceData {
    ReferenceData {
        bezels: labeled(TableKind::Bezel, &[("Silver", "M22")]),
        operators: operators(&[("Flush", "D"), ("Flush with guard", "DG")]),
        button_colors: labeled(TableKind::ButtonColor, &[("White", "WH"), ("Red", "RD")]),
        lens_colors: labeled(TableKind::LensColor, &[("White", "WH")]),
        contact_blocks: labeled(TableKind::ContactBlock, &[("1 N/O", "1NO")]),
        light_units: light_units(&[("LED1", "WH", "24V")]),
    }
}

/// Two bezels and all guard variants, for compatibility-rule checks.
pub fn guard_data() -> ReferenceData {
    ReferenceData {
        bezels: labeled(TableKind::Bezel, &[("Silver", "M22"), ("Black", "M22S")]),
        operators: operators(&[
            ("Flush", "D"),
            ("Flush with guard", "DG"),
            ("High guard", "DGH"),
        ]),
        button_colors: labeled(TableKind::ButtonColor, &[("Green", "G"), ("Red", "R")]),
        lens_colors: labeled(TableKind::LensColor, &[("Green", "G"), ("Red", "R")]),
        contact_blocks: labeled(TableKind::ContactBlock, &[("1 N/O", "K10"), ("1 N/C", "K01")]),
        light_units: light_units(&[
            ("G", "G", "12-30 VAC/DC"),
            ("R", "R", "12-30 VAC/DC"),
            ("230G", "G", "85-264 VAC"),
        ]),
    }
}

/// Write a complete set of CSV tables into `dir`, overriding individual
/// files through `overrides` (`(file name, contents)`).
pub fn write_tables(dir: &Path, overrides: &[(&str, &str)]) -> Result<()> {
    let defaults = [
        ("bezel.csv", "label,code\nSilver,M22\nBlack,M22S\n"),
        ("operator.csv", "label,code,buttonless\nFlush,D,D\nExtended,DH,\n"),
        ("button_color.csv", "label,code\nRed,R\nGreen,G\n"),
        ("lens_color.csv", "label,code\nRed,R\nGreen,G\n"),
        ("contact_blocks.csv", "label,code\n1 N/O,K10\n"),
        (
            "light_units.csv",
            "code,color,lu_voltage\nR,R,12-30 VAC/DC\nG,G,12-30 VAC/DC\n230G,G,85-264 VAC\n",
        ),
    ];
    fs::create_dir_all(dir)?;
    for (name, contents) in defaults {
        let contents = overrides
            .iter()
            .find(|(file, _)| *file == name)
            .map(|(_, body)| *body)
            .unwrap_or(contents);
        fs::write(dir.join(name), contents)
            .with_context(|| format!("writing fixture {}", dir.join(name).display()))?;
    }
    Ok(())
}

pub fn catalog_numbers(entries: &[CatalogEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.catalog_number.as_str()).collect()
}

/// Run one of the crate's binaries with a clean configuration environment.
pub fn run_bin(name: &str, args: &[&str]) -> Result<Output> {
    let path = match name {
        "m22-config" => env!("CARGO_BIN_EXE_m22-config"),
        "ref-check" => env!("CARGO_BIN_EXE_ref-check"),
        other => anyhow::bail!("unknown binary {other}"),
    };
    Command::new(path)
        .args(args)
        .env_remove("M22_DATA_DIR")
        .env_remove("M22_COMPONENT_DB")
        .env_remove("M22_PLATE_SCHEME")
        .env_remove("M22_LOG")
        .output()
        .with_context(|| format!("failed to execute {name}"))
}
