//! Indexed view of a single reference table.
//!
//! Rows keep their file order; a label index built once at construction maps
//! each label to every row carrying it, so lookups stay O(1) while duplicate
//! labels still resolve to all of their rows.

use crate::reference::ReferenceRow;
use anyhow::{Result, bail};
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TableKind {
    Bezel,
    Operator,
    ButtonColor,
    LensColor,
    ContactBlock,
    LightUnit,
}

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        TableKind::Bezel,
        TableKind::Operator,
        TableKind::ButtonColor,
        TableKind::LensColor,
        TableKind::ContactBlock,
        TableKind::LightUnit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Bezel => "bezel",
            TableKind::Operator => "operator",
            TableKind::ButtonColor => "button-color",
            TableKind::LensColor => "lens-color",
            TableKind::ContactBlock => "contact-block",
            TableKind::LightUnit => "light-unit",
        }
    }

    /// CSV file holding this table inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            TableKind::Bezel => "bezel.csv",
            TableKind::Operator => "operator.csv",
            TableKind::ButtonColor => "button_color.csv",
            TableKind::LensColor => "lens_color.csv",
            TableKind::ContactBlock => "contact_blocks.csv",
            TableKind::LightUnit => "light_units.csv",
        }
    }
}

impl TryFrom<&str> for TableKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        TableKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = TableKind::ALL.iter().map(TableKind::as_str).collect();
                anyhow::anyhow!("unknown table '{value}', expected one of {known:?}")
            })
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct ReferenceTable<R> {
    kind: TableKind,
    rows: Vec<R>,
    by_label: HashMap<String, Vec<usize>>,
}

impl<R: ReferenceRow> ReferenceTable<R> {
    /// Build the label index over `rows`. No validation happens here; see
    /// [`ReferenceTable::validate`].
    pub fn new(kind: TableKind, rows: Vec<R>) -> Self {
        let mut by_label: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_label.entry(row.label().to_string()).or_default().push(idx);
        }
        Self {
            kind,
            rows,
            by_label,
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose label equals `label` exactly, in table order.
    pub fn lookup<'a>(&'a self, label: &str) -> impl Iterator<Item = &'a R> + use<'a, R> {
        self.by_label
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.rows[idx])
    }

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(idx, row)| {
                self.by_label.get(row.label()).and_then(|all| all.first()) == Some(idx)
            })
            .map(|(_, row)| row.label())
            .collect()
    }

    /// Labels carried by more than one row, in first-seen order.
    pub fn duplicate_labels(&self) -> Vec<&str> {
        self.labels()
            .into_iter()
            .filter(|label| self.by_label.get(*label).is_some_and(|idx| idx.len() > 1))
            .collect()
    }

    /// Rejects tables that cannot take part in generation: no rows, or rows
    /// with blank labels or codes.
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            bail!("{} table contains no rows", self.kind);
        }
        for (idx, row) in self.rows.iter().enumerate() {
            // +2: header line plus 1-based numbering
            let line = idx + 2;
            if row.label().trim().is_empty() {
                bail!("{} table line {line}: label must not be empty", self.kind);
            }
            if row.code().trim().is_empty() {
                bail!(
                    "{} table line {line}: code must not be empty (label '{}')",
                    self.kind,
                    row.label()
                );
            }
        }
        Ok(())
    }
}
