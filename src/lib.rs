use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub mod catalog;
pub mod components;
pub mod logging;
pub mod reference;
pub mod render;
pub mod resolver;
pub mod selection;

pub use catalog::{
    CatalogEntry, ComponentRole, Configurator, EntryType, IlluminatedRequest,
    NonIlluminatedRequest, OperatorStyle, PlateScheme, SubComponent, complete_only, expand,
    generate_illuminated, generate_non_illuminated,
};
pub use components::{ComponentLookup, ComponentRecord, CrossCheck};
pub use reference::{
    CodeColumn, LabeledCode, LightUnitRow, OperatorRow, ReferenceData, ReferenceRow,
    ReferenceTable, TableKind,
};
pub use resolver::{resolve, resolve_column, resolve_rows};
pub use selection::Selection;

pub const DATA_DIR_ENV: &str = "M22_DATA_DIR";
pub const COMPONENT_DB_ENV: &str = "M22_COMPONENT_DB";
pub const DEFAULT_COMPONENT_DB: &str = "components.db";

const DATA_DIR: &str = "data";
const DATA_SENTINEL: &str = "bezel.csv";

fn is_data_dir(candidate: &Path) -> bool {
    candidate.join(DATA_SENTINEL).is_file()
}

fn data_dir_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !is_data_dir(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

/// Walk up from `start` looking for a directory that is, or contains, a
/// reference-data directory.
fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_data_dir(&dir) {
            return Some(dir);
        }
        let nested = dir.join(DATA_DIR);
        if is_data_dir(&nested) {
            return Some(nested);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the reference-data directory.
///
/// Order: `explicit` (must be valid), `M22_DATA_DIR`, upward search from the
/// current directory, upward search from the executable, then the build-time
/// `M22_DATA_DIR_HINT`.
pub fn find_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !is_data_dir(path) {
            bail!(
                "{} is not a reference-data directory (missing {DATA_SENTINEL})",
                path.display()
            );
        }
        return Ok(path.to_path_buf());
    }

    if let Ok(env_dir) = env::var(DATA_DIR_ENV) {
        if let Some(dir) = data_dir_from_hint(&env_dir) {
            return Ok(dir);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(dir) = search_upwards(&cwd) {
            return Ok(dir);
        }
    }

    if let Ok(exe_path) = env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            if let Some(dir) = search_upwards(exe_dir) {
                return Ok(dir);
            }
        }
    }

    if let Some(hint) = option_env!("M22_DATA_DIR_HINT") {
        if let Some(dir) = data_dir_from_hint(hint) {
            return Ok(dir);
        }
    }

    bail!(
        "Unable to locate reference data. Pass --data-dir or set {DATA_DIR_ENV} to a directory containing {DATA_SENTINEL}."
    );
}

/// Component database to consult, if any: `explicit`, then
/// `M22_COMPONENT_DB`, then `components.db` beside the reference tables.
pub fn resolve_component_db(explicit: Option<&Path>, data_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(raw) = env::var_os(COMPONENT_DB_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(raw));
    }
    let bundled = data_dir.join(DEFAULT_COMPONENT_DB);
    bundled.is_file().then_some(bundled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn data_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join(DATA_DIR);
        fs::create_dir_all(data.join("nested")).unwrap();
        fs::write(data.join(DATA_SENTINEL), "label,code\n").unwrap();
        temp
    }

    #[test]
    fn search_finds_data_dir_from_project_root_and_inside_it() {
        let temp = data_tree();
        let expected = fs::canonicalize(temp.path().join(DATA_DIR)).unwrap();
        assert_eq!(search_upwards(temp.path()), Some(expected.clone()));
        assert_eq!(
            search_upwards(&temp.path().join(DATA_DIR).join("nested")),
            Some(expected)
        );
    }

    #[test]
    fn explicit_data_dir_must_hold_sentinel() {
        let temp = data_tree();
        assert!(find_data_dir(Some(temp.path())).is_err());
        let data = temp.path().join(DATA_DIR);
        assert_eq!(find_data_dir(Some(&data)).unwrap(), data);
    }

    #[test]
    fn component_db_prefers_explicit_then_bundled_file() {
        let temp = data_tree();
        let data = temp.path().join(DATA_DIR);
        let explicit = temp.path().join("other.db");
        assert_eq!(
            resolve_component_db(Some(&explicit), &data),
            Some(explicit.clone())
        );

        if env::var_os(COMPONENT_DB_ENV).is_none() {
            assert_eq!(resolve_component_db(None, &data), None);
            fs::write(data.join(DEFAULT_COMPONENT_DB), b"").unwrap();
            assert_eq!(
                resolve_component_db(None, &data),
                Some(data.join(DEFAULT_COMPONENT_DB))
            );
        }
    }
}
