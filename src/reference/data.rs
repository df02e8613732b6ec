//! Loading the full set of reference tables from a data directory.

use crate::reference::{
    LabeledCode, LightUnitRow, OperatorRow, ReferenceRow, ReferenceTable, TableKind,
};
use crate::selection::Selection;
use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, warn};

/// Every table the generators read, loaded together.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    pub bezels: ReferenceTable<LabeledCode>,
    pub operators: ReferenceTable<OperatorRow>,
    pub button_colors: ReferenceTable<LabeledCode>,
    pub lens_colors: ReferenceTable<LabeledCode>,
    pub contact_blocks: ReferenceTable<LabeledCode>,
    pub light_units: ReferenceTable<LightUnitRow>,
}

impl ReferenceData {
    /// Read and validate all six CSV tables under `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let data = Self {
            bezels: load_table(dir, TableKind::Bezel)?,
            operators: load_table(dir, TableKind::Operator)?,
            button_colors: load_table(dir, TableKind::ButtonColor)?,
            lens_colors: load_table(dir, TableKind::LensColor)?,
            contact_blocks: load_table(dir, TableKind::ContactBlock)?,
            light_units: load_table(dir, TableKind::LightUnit)?,
        };
        data.validate()
            .with_context(|| format!("validating reference data in {}", dir.display()))?;
        debug!(dir = %dir.display(), rows = ?data.summary(), "loaded reference data");
        Ok(data)
    }

    /// Load once per directory for the life of the process.
    ///
    /// Tables are static, so nothing is ever invalidated; a second call with
    /// the same (canonical) directory hands back the same snapshot.
    pub fn load_cached(dir: &Path) -> Result<Arc<Self>> {
        static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<ReferenceData>>>> = OnceLock::new();

        let key = dir
            .canonicalize()
            .with_context(|| format!("resolving data directory {}", dir.display()))?;
        let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut guard = cache
            .lock()
            .map_err(|_| anyhow::anyhow!("reference data cache poisoned"))?;
        if let Some(hit) = guard.get(&key) {
            return Ok(Arc::clone(hit));
        }
        let loaded = Arc::new(Self::load(&key)?);
        guard.insert(key, Arc::clone(&loaded));
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        self.bezels.validate()?;
        self.operators.validate()?;
        self.button_colors.validate()?;
        self.lens_colors.validate()?;
        self.contact_blocks.validate()?;
        self.light_units.validate()?;

        for (idx, row) in self.light_units.rows().iter().enumerate() {
            if row.voltage.trim().is_empty() {
                bail!(
                    "light-unit table line {}: lu_voltage must not be empty (code '{}')",
                    idx + 2,
                    row.code
                );
            }
        }

        warn_duplicates(&self.bezels);
        warn_duplicates(&self.operators);
        warn_duplicates(&self.button_colors);
        warn_duplicates(&self.lens_colors);
        warn_duplicates(&self.contact_blocks);
        Ok(())
    }

    /// Row count per table, in [`TableKind::ALL`] order.
    pub fn summary(&self) -> Vec<(TableKind, usize)> {
        TableKind::ALL
            .into_iter()
            .map(|kind| (kind, self.row_count(kind)))
            .collect()
    }

    fn row_count(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Bezel => self.bezels.len(),
            TableKind::Operator => self.operators.len(),
            TableKind::ButtonColor => self.button_colors.len(),
            TableKind::LensColor => self.lens_colors.len(),
            TableKind::ContactBlock => self.contact_blocks.len(),
            TableKind::LightUnit => self.light_units.len(),
        }
    }

    /// Choices offered for a category: the wildcard first, then each distinct
    /// label. Light units are offered by color.
    pub fn options(&self, kind: TableKind) -> Vec<String> {
        let labels = match kind {
            TableKind::Bezel => self.bezels.labels(),
            TableKind::Operator => self.operators.labels(),
            TableKind::ButtonColor => self.button_colors.labels(),
            TableKind::LensColor => self.lens_colors.labels(),
            TableKind::ContactBlock => self.contact_blocks.labels(),
            TableKind::LightUnit => self.light_units.labels(),
        };
        std::iter::once(Selection::ANY_LABEL)
            .chain(labels)
            .map(str::to_string)
            .collect()
    }
}

fn load_table<R>(dir: &Path, kind: TableKind) -> Result<ReferenceTable<R>>
where
    R: ReferenceRow + DeserializeOwned,
{
    let path = dir.join(kind.file_name());
    let file = File::open(&path)
        .with_context(|| format!("opening {} table {}", kind, path.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<R>().enumerate() {
        let row = record.with_context(|| {
            format!("parsing {} table {} line {}", kind, path.display(), idx + 2)
        })?;
        rows.push(row);
    }
    Ok(ReferenceTable::new(kind, rows))
}

fn warn_duplicates<R: ReferenceRow>(table: &ReferenceTable<R>) {
    for label in table.duplicate_labels() {
        warn!(
            table = %table.kind(),
            label,
            "label appears on more than one row; all rows will match"
        );
    }
}
