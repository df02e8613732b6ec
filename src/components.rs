//! Read-only access to the assembled-SKU component database.
//!
//! The database is optional: generation never depends on it. It lets a
//! caller list the components stored for an assembled SKU and cross-check
//! them against a generated breakdown.

use crate::catalog::CatalogEntry;
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, params};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

pub const COMPONENT_TABLE: &str = "pushbutton_components";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    pub component_type: String,
    pub component_sku: String,
}

/// Result of comparing a generated entry with the stored breakdown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CrossCheck {
    pub catalog_number: String,
    /// SKUs present on both sides, in generated order.
    pub matched: Vec<String>,
    pub generated_only: Vec<String>,
    pub stored_only: Vec<ComponentRecord>,
}

impl CrossCheck {
    /// True when the database has no rows for the SKU at all.
    pub fn is_unknown(&self) -> bool {
        self.matched.is_empty() && self.stored_only.is_empty()
    }

    pub fn is_consistent(&self) -> bool {
        self.generated_only.is_empty() && self.stored_only.is_empty()
    }
}

pub struct ComponentLookup {
    conn: Connection,
}

impl ComponentLookup {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .with_context(|| format!("opening component database {}", path.display()))?;
        Ok(Self { conn })
    }

    /// Stored components for `assembled_sku`, in row order.
    pub fn components(&self, assembled_sku: &str) -> Result<Vec<ComponentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT component_type, component_sku FROM {COMPONENT_TABLE}
                 WHERE assembled_sku = ?1 ORDER BY rowid"
            ))
            .context("preparing component query")?;
        let rows = stmt
            .query_map(params![assembled_sku], |row| {
                Ok(ComponentRecord {
                    component_type: row.get(0)?,
                    component_sku: row.get(1)?,
                })
            })
            .with_context(|| format!("querying components of {assembled_sku}"))?;

        let records = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("reading components of {assembled_sku}"))?;
        debug!(assembled_sku, count = records.len(), "component lookup");
        Ok(records)
    }

    /// Compare the generated sub-components of `entry` with the stored ones,
    /// matching on SKU only.
    pub fn cross_check(&self, entry: &CatalogEntry) -> Result<CrossCheck> {
        let stored = self.components(&entry.catalog_number)?;
        let mut check = CrossCheck {
            catalog_number: entry.catalog_number.clone(),
            ..Default::default()
        };

        for component in &entry.sub_components {
            if stored.iter().any(|r| r.component_sku == component.sku) {
                check.matched.push(component.sku.clone());
            } else {
                check.generated_only.push(component.sku.clone());
            }
        }
        check.stored_only = stored
            .into_iter()
            .filter(|r| !entry.sub_components.iter().any(|c| c.sku == r.component_sku))
            .collect();
        Ok(check)
    }
}
