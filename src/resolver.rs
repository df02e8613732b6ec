//! Resolves selections against reference tables.
//!
//! An unmatched label is not an error: it resolves to nothing, which collapses
//! every Cartesian product built from it to zero rows.

use crate::reference::{CodeColumn, ReferenceRow, ReferenceTable};
use crate::selection::Selection;
use tracing::debug;

/// Rows matched by `selection`, in table order. `Any` yields the whole table,
/// duplicates included.
pub fn resolve_rows<'a, R: ReferenceRow>(
    table: &'a ReferenceTable<R>,
    selection: &Selection,
) -> Vec<&'a R> {
    let rows: Vec<&R> = match selection {
        Selection::Any => table.rows().iter().collect(),
        Selection::Specific(label) => table.lookup(label).collect(),
    };
    if rows.is_empty() {
        debug!(table = %table.kind(), %selection, "selection matched no rows");
    }
    rows
}

/// Primary codes matched by `selection`.
pub fn resolve<R: ReferenceRow>(table: &ReferenceTable<R>, selection: &Selection) -> Vec<String> {
    resolve_column(table, selection, CodeColumn::Code)
}

/// Codes from `column` of every row matched by `selection`.
pub fn resolve_column<R: ReferenceRow>(
    table: &ReferenceTable<R>,
    selection: &Selection,
    column: CodeColumn,
) -> Vec<String> {
    resolve_rows(table, selection)
        .into_iter()
        .map(|row| row.column(column).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{LabeledCode, OperatorRow, TableKind};

    fn bezels() -> ReferenceTable<LabeledCode> {
        ReferenceTable::new(
            TableKind::Bezel,
            vec![
                LabeledCode::new("Titanium", "M22"),
                LabeledCode::new("Silver", "M22S"),
                LabeledCode::new("Titanium", "M22"),
            ],
        )
    }

    #[test]
    fn any_returns_full_code_column_in_order() {
        assert_eq!(resolve(&bezels(), &Selection::Any), vec!["M22", "M22S", "M22"]);
    }

    #[test]
    fn specific_returns_all_exact_matches() {
        assert_eq!(
            resolve(&bezels(), &Selection::specific("Titanium")),
            vec!["M22", "M22"]
        );
        assert_eq!(resolve(&bezels(), &Selection::specific("Silver")), vec!["M22S"]);
    }

    #[test]
    fn unknown_or_miscased_label_resolves_empty() {
        assert!(resolve(&bezels(), &Selection::specific("Bronze")).is_empty());
        assert!(resolve(&bezels(), &Selection::specific("silver")).is_empty());
    }

    #[test]
    fn buttonless_column_projects_auxiliary_codes() {
        let operators = ReferenceTable::new(
            TableKind::Operator,
            vec![
                OperatorRow::new("Flush", "D"),
                OperatorRow::new("Extended", "DH").with_buttonless("D"),
            ],
        );
        assert_eq!(
            resolve_column(&operators, &Selection::Any, CodeColumn::Buttonless),
            vec!["D", "D"]
        );
        assert_eq!(resolve(&operators, &Selection::Any), vec!["D", "DH"]);
    }
}
