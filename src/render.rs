//! Text and JSON rendering of generated entries.

use crate::catalog::CatalogEntry;
use crate::components::{ComponentRecord, CrossCheck};
use anyhow::Result;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

/// Column set shown for a result list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// `Type`, `Catalog Number`
    NonIlluminated,
    /// `Catalog Number`, `Voltage`
    Illuminated,
}

pub fn entries_table(entries: &[&CatalogEntry], layout: Layout) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    match layout {
        Layout::NonIlluminated => {
            table.set_header(vec!["Type", "Catalog Number"]);
            for entry in entries {
                table.add_row(vec![
                    entry.entry_type.as_str().to_string(),
                    entry.catalog_number.clone(),
                ]);
            }
        }
        Layout::Illuminated => {
            table.set_header(vec!["Catalog Number", "Voltage"]);
            for entry in entries {
                table.add_row(vec![
                    entry.catalog_number.clone(),
                    entry.voltage.clone().unwrap_or_default(),
                ]);
            }
        }
    }
    table
}

pub fn summary_line(count: usize) -> String {
    match count {
        0 => "No matching configurations.".to_string(),
        1 => "Found 1 matching configuration:".to_string(),
        n => format!("Found {n} matching configurations:"),
    }
}

pub fn write_table<W: Write>(
    mut writer: W,
    entries: &[&CatalogEntry],
    layout: Layout,
) -> Result<()> {
    writeln!(writer, "{}", summary_line(entries.len()))?;
    if !entries.is_empty() {
        writeln!(writer, "{}", entries_table(entries, layout))?;
    }
    Ok(())
}

/// Single JSON document for a result list. The drill-down fields are only
/// present when `--expand` was given, and `cross_checks` only with a
/// component database.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub entries: &'a [&'a CatalogEntry],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expanded: Option<&'a [&'a CatalogEntry]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_checks: Option<&'a [CrossCheck]>,
}

pub fn write_json<W: Write>(mut writer: W, report: &JsonReport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Sub-component breakdown, one block per entry.
pub fn write_expansion<W: Write>(mut writer: W, entries: &[&CatalogEntry]) -> Result<()> {
    for entry in entries {
        writeln!(writer, "{} ({})", entry.catalog_number, entry.entry_type)?;
        for component in &entry.sub_components {
            writeln!(writer, "  - {component}")?;
        }
    }
    Ok(())
}

/// Stored component rows as a two-column table.
pub fn write_components<W: Write>(
    mut writer: W,
    assembled_sku: &str,
    records: &[ComponentRecord],
) -> Result<()> {
    if records.is_empty() {
        writeln!(writer, "No stored components for {assembled_sku}.")?;
        return Ok(());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Component Type", "Component SKU"]);
    for record in records {
        table.add_row(vec![record.component_type.clone(), record.component_sku.clone()]);
    }
    writeln!(writer, "{assembled_sku}")?;
    writeln!(writer, "{table}")?;
    Ok(())
}

pub fn write_cross_check<W: Write>(mut writer: W, check: &CrossCheck) -> Result<()> {
    if check.is_unknown() {
        writeln!(
            writer,
            "{}: not in component database",
            check.catalog_number
        )?;
        return Ok(());
    }
    let verdict = if check.is_consistent() { "matches" } else { "differs from" };
    writeln!(
        writer,
        "{}: generated breakdown {verdict} component database ({} matched)",
        check.catalog_number,
        check.matched.len()
    )?;
    for sku in &check.generated_only {
        writeln!(writer, "  + {sku} (generated only)")?;
    }
    for record in &check.stored_only {
        writeln!(
            writer,
            "  - {} ({}, stored only)",
            record.component_sku, record.component_type
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ComponentRole, EntryType, SubComponent};

    fn illuminated() -> CatalogEntry {
        CatalogEntry {
            entry_type: EntryType::CompleteIlluminatedDevice,
            catalog_number: "M22L-D-G-K10-G".to_string(),
            sub_components: vec![
                SubComponent::new(ComponentRole::OperatorOnly, "M22L-D-G"),
                SubComponent::new(ComponentRole::LightUnit, "M22-LED-G"),
            ],
            voltage: Some("12-30 VAC/DC".to_string()),
        }
    }

    #[test]
    fn illuminated_table_shows_voltage() {
        let entry = illuminated();
        let mut out = Vec::new();
        write_table(&mut out, &[&entry], Layout::Illuminated).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Found 1 matching configuration:"));
        assert!(text.contains("M22L-D-G-K10-G"));
        assert!(text.contains("12-30 VAC/DC"));
    }

    #[test]
    fn expansion_lists_roles() {
        let entry = illuminated();
        let mut out = Vec::new();
        write_expansion(&mut out, &[&entry]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "M22L-D-G-K10-G (Complete Illuminated Device)\n  - Operator Only: M22L-D-G\n  - Light Unit: M22-LED-G\n"
        );
    }

    #[test]
    fn cross_check_reports_both_sides() {
        let check = CrossCheck {
            catalog_number: "M22-D-G-K10".to_string(),
            matched: vec!["M22-D-X".to_string()],
            generated_only: vec!["M22-XD-G".to_string()],
            stored_only: vec![ComponentRecord {
                component_type: "Button Plate".to_string(),
                component_sku: "M22-XDH-G".to_string(),
            }],
        };
        let mut out = Vec::new();
        write_cross_check(&mut out, &check).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("differs from component database (1 matched)"));
        assert!(text.contains("+ M22-XD-G (generated only)"));
        assert!(text.contains("- M22-XDH-G (Button Plate, stored only)"));
    }

    #[test]
    fn json_report_nests_the_drill_down() {
        let entry = illuminated();
        let entries = [&entry];
        let mut out = Vec::new();
        let report = JsonReport {
            entries: &entries,
            expanded: Some(&entries[..]),
            cross_checks: None,
        };
        write_json(&mut out, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["entries"][0]["catalog_number"], "M22L-D-G-K10-G");
        assert_eq!(value["expanded"][0]["sub_components"][1]["sku"], "M22-LED-G");
        assert!(value.get("cross_checks").is_none());

        let mut plain = Vec::new();
        let report = JsonReport {
            entries: &entries,
            expanded: None,
            cross_checks: None,
        };
        write_json(&mut plain, &report).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&plain).unwrap();
        assert!(value.get("expanded").is_none());
    }

    #[test]
    fn empty_results_print_only_the_summary() {
        let mut out = Vec::new();
        write_table(&mut out, &[], Layout::NonIlluminated).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No matching configurations.\n");
    }
}
