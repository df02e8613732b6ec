//! Cartesian expansion of selections into catalog entries.
//!
//! Both generators walk bezel × operator × finish (button color or lens
//! color) in table order, drop combinations the bezel cannot take, and build
//! every row for one combination from a single [`OperatorAssembly`] so
//! operator-only and complete numbers never drift apart.

use crate::catalog::rules::{self, OperatorStyle, PlateScheme};
use crate::catalog::{CatalogEntry, ComponentRole, EntryType, SubComponent};
use crate::reference::{LightUnitRow, OperatorRow, ReferenceData};
use crate::resolver::{resolve, resolve_rows};
use crate::selection::Selection;
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NonIlluminatedRequest {
    pub bezel: Selection,
    pub operator: Selection,
    pub color: Selection,
    pub contact_block: Selection,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IlluminatedRequest {
    pub bezel: Selection,
    pub operator: Selection,
    pub lens: Selection,
    pub contact_block: Selection,
    /// `Any` picks light units whose color matches a resolved lens; a
    /// specific color picks that color's units without consulting the lens.
    pub light_unit: Selection,
}

/// Generator bound to one snapshot of reference data.
#[derive(Clone, Copy, Debug)]
pub struct Configurator<'a> {
    data: &'a ReferenceData,
    plate_scheme: PlateScheme,
}

impl<'a> Configurator<'a> {
    pub fn new(data: &'a ReferenceData) -> Self {
        Self {
            data,
            plate_scheme: PlateScheme::default(),
        }
    }

    pub fn with_plate_scheme(mut self, plate_scheme: PlateScheme) -> Self {
        self.plate_scheme = plate_scheme;
        self
    }

    /// Operator-only and complete-device rows for push buttons without a
    /// light unit.
    pub fn non_illuminated(&self, request: &NonIlluminatedRequest) -> Vec<CatalogEntry> {
        let bezels = resolve(&self.data.bezels, &request.bezel);
        let operators = resolve_rows(&self.data.operators, &request.operator);
        let colors = resolve(&self.data.button_colors, &request.color);
        let contact_blocks = resolve(&self.data.contact_blocks, &request.contact_block);

        let mut entries = Vec::new();
        for bezel in &bezels {
            for operator in &operators {
                if !rules::bezel_accepts(bezel, &operator.code) {
                    continue;
                }
                let style = OperatorStyle::for_code(&operator.code);
                for color in &colors {
                    let plate = SubComponent::new(
                        ComponentRole::ButtonPlate,
                        self.plate_scheme.button_plate(style, color),
                    );
                    let assembly = OperatorAssembly::new(bezel, operator, color, plate);
                    entries.push(assembly.operator_only());

                    if !rules::yields_complete_devices(&operator.code) {
                        continue;
                    }
                    for contact_block in &contact_blocks {
                        entries.push(assembly.complete_device(contact_block));
                    }
                }
            }
        }

        debug!(
            bezels = bezels.len(),
            operators = operators.len(),
            colors = colors.len(),
            contact_blocks = contact_blocks.len(),
            entries = entries.len(),
            "generated non-illuminated catalog numbers"
        );
        entries
    }

    /// Complete illuminated devices. No operator-only rows are emitted and
    /// the bare guard operator is not special-cased here.
    pub fn illuminated(&self, request: &IlluminatedRequest) -> Vec<CatalogEntry> {
        let bezels = resolve(&self.data.bezels, &request.bezel);
        let operators = resolve_rows(&self.data.operators, &request.operator);
        let lenses = resolve(&self.data.lens_colors, &request.lens);
        let contact_blocks = resolve(&self.data.contact_blocks, &request.contact_block);
        let light_units = self.matching_light_units(&request.light_unit, &lenses);

        let mut entries = Vec::new();
        for bezel in &bezels {
            let lit_bezel = rules::illuminated_bezel(bezel);
            for operator in &operators {
                if !rules::bezel_accepts(bezel, &operator.code) {
                    continue;
                }
                for lens in &lenses {
                    let cap = SubComponent::new(ComponentRole::Lens, rules::button_lens(lens));
                    let assembly = OperatorAssembly::new(&lit_bezel, operator, lens, cap);
                    for light_unit in &light_units {
                        for contact_block in &contact_blocks {
                            entries.push(assembly.illuminated_device(contact_block, light_unit));
                        }
                    }
                }
            }
        }

        debug!(
            bezels = bezels.len(),
            operators = operators.len(),
            lenses = lenses.len(),
            light_units = light_units.len(),
            contact_blocks = contact_blocks.len(),
            entries = entries.len(),
            "generated illuminated catalog numbers"
        );
        entries
    }

    fn matching_light_units(
        &self,
        selection: &Selection,
        lenses: &[String],
    ) -> Vec<&'a LightUnitRow> {
        let data: &'a ReferenceData = self.data;
        let table = &data.light_units;
        match selection {
            Selection::Any => table
                .rows()
                .iter()
                .filter(|unit| lenses.contains(&unit.color))
                .collect(),
            Selection::Specific(_) => resolve_rows(table, selection),
        }
    }
}

/// Non-illuminated generation with the default plate scheme.
pub fn generate_non_illuminated(
    data: &ReferenceData,
    bezel: &Selection,
    operator: &Selection,
    color: &Selection,
    contact_block: &Selection,
) -> Vec<CatalogEntry> {
    Configurator::new(data).non_illuminated(&NonIlluminatedRequest {
        bezel: bezel.clone(),
        operator: operator.clone(),
        color: color.clone(),
        contact_block: contact_block.clone(),
    })
}

pub fn generate_illuminated(
    data: &ReferenceData,
    bezel: &Selection,
    operator: &Selection,
    lens: &Selection,
    contact_block: &Selection,
    light_unit: &Selection,
) -> Vec<CatalogEntry> {
    Configurator::new(data).illuminated(&IlluminatedRequest {
        bezel: bezel.clone(),
        operator: operator.clone(),
        lens: lens.clone(),
        contact_block: contact_block.clone(),
        light_unit: light_unit.clone(),
    })
}

/// Values shared by one operator-only number and every device built on it.
struct OperatorAssembly {
    catalog_number: String,
    buttonless: String,
    cap: SubComponent,
}

impl OperatorAssembly {
    fn new(bezel: &str, operator: &OperatorRow, finish: &str, cap: SubComponent) -> Self {
        Self {
            catalog_number: format!("{bezel}-{}-{finish}", operator.code),
            buttonless: format!("{bezel}-{}-X", operator.buttonless_code()),
            cap,
        }
    }

    fn buttonless_component(&self) -> SubComponent {
        SubComponent::new(ComponentRole::ButtonlessOperator, self.buttonless.clone())
    }

    fn operator_reference(&self) -> SubComponent {
        SubComponent::new(ComponentRole::OperatorOnly, self.catalog_number.clone())
    }

    fn operator_only(&self) -> CatalogEntry {
        CatalogEntry {
            entry_type: EntryType::OperatorOnly,
            catalog_number: self.catalog_number.clone(),
            sub_components: vec![self.buttonless_component(), self.cap.clone()],
            voltage: None,
        }
    }

    fn complete_device(&self, contact_block: &str) -> CatalogEntry {
        CatalogEntry {
            entry_type: EntryType::CompleteDevice,
            catalog_number: format!("{}-{contact_block}", self.catalog_number),
            sub_components: vec![
                self.operator_reference(),
                self.buttonless_component(),
                self.cap.clone(),
                SubComponent::new(
                    ComponentRole::ContactBlock,
                    rules::contact_block_sku(contact_block),
                ),
            ],
            voltage: None,
        }
    }

    fn illuminated_device(&self, contact_block: &str, light_unit: &LightUnitRow) -> CatalogEntry {
        CatalogEntry {
            entry_type: EntryType::CompleteIlluminatedDevice,
            catalog_number: format!("{}-{contact_block}-{}", self.catalog_number, light_unit.code),
            sub_components: vec![
                self.operator_reference(),
                self.buttonless_component(),
                self.cap.clone(),
                SubComponent::new(
                    ComponentRole::ContactBlock,
                    rules::contact_block_sku(contact_block),
                ),
                SubComponent::new(
                    ComponentRole::LightUnit,
                    rules::light_unit_sku(&light_unit.code),
                ),
            ],
            voltage: Some(light_unit.voltage.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{LabeledCode, ReferenceTable, TableKind};

    fn data() -> ReferenceData {
        let labeled = |kind, rows: &[(&str, &str)]| {
            ReferenceTable::new(
                kind,
                rows.iter()
                    .map(|(label, code)| LabeledCode::new(*label, *code))
                    .collect(),
            )
        };
        ReferenceData {
            bezels: labeled(TableKind::Bezel, &[("Titanium", "M22"), ("Silver", "M22S")]),
            operators: ReferenceTable::new(
                TableKind::Operator,
                vec![
                    OperatorRow::new("Flush", "D"),
                    OperatorRow::new("Extended", "DH").with_buttonless("DH1"),
                    OperatorRow::new("High guard", "DGH"),
                ],
            ),
            button_colors: labeled(TableKind::ButtonColor, &[("Green", "G")]),
            lens_colors: labeled(TableKind::LensColor, &[("Green", "G"), ("Red", "R")]),
            contact_blocks: labeled(TableKind::ContactBlock, &[("1 N/O", "K10")]),
            light_units: ReferenceTable::new(
                TableKind::LightUnit,
                vec![
                    LightUnitRow::new("G", "G", "12-30 VAC/DC"),
                    LightUnitRow::new("W", "W", "12-30 VAC/DC"),
                ],
            ),
        }
    }

    fn numbers(entries: &[CatalogEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.catalog_number.as_str()).collect()
    }

    #[test]
    fn buttonless_code_and_plate_scheme_shape_sub_components() {
        let data = data();
        let request = NonIlluminatedRequest {
            operator: Selection::specific("Extended"),
            bezel: Selection::specific("Titanium"),
            ..Default::default()
        };

        let uniform = Configurator::new(&data).non_illuminated(&request);
        assert_eq!(numbers(&uniform), vec!["M22-DH-G", "M22-DH-G-K10"]);
        let op_only = &uniform[0];
        assert_eq!(
            op_only.component(ComponentRole::ButtonlessOperator).unwrap().sku,
            "M22-DH1-X"
        );
        assert_eq!(op_only.component(ComponentRole::ButtonPlate).unwrap().sku, "M22-XD-G");

        let by_style = Configurator::new(&data)
            .with_plate_scheme(PlateScheme::ByStyle)
            .non_illuminated(&request);
        assert_eq!(
            by_style[1].component(ComponentRole::ButtonPlate).unwrap().sku,
            "M22-XDH-G"
        );
    }

    #[test]
    fn high_guard_is_limited_to_base_bezel_but_keeps_complete_devices() {
        let data = data();
        let request = NonIlluminatedRequest {
            operator: Selection::specific("High guard"),
            ..Default::default()
        };
        let entries = Configurator::new(&data).non_illuminated(&request);
        assert_eq!(numbers(&entries), vec!["M22-DGH-G", "M22-DGH-G-K10"]);
    }

    #[test]
    fn explicit_light_unit_color_bypasses_lens_matching() {
        let data = data();
        let request = IlluminatedRequest {
            bezel: Selection::specific("Titanium"),
            operator: Selection::specific("Flush"),
            lens: Selection::specific("Red"),
            light_unit: Selection::specific("W"),
            ..Default::default()
        };
        let entries = Configurator::new(&data).illuminated(&request);
        assert_eq!(numbers(&entries), vec!["M22L-D-R-K10-W"]);

        let matched = Configurator::new(&data).illuminated(&IlluminatedRequest {
            light_unit: Selection::Any,
            ..request
        });
        assert!(matched.is_empty(), "no light unit is red");
    }
}
