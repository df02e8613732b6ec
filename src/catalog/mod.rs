//! Catalog-number generation.
//!
//! Generated entries are value objects: each generation call builds a fresh
//! `Vec<CatalogEntry>` from the reference tables and nothing is cached or
//! deduplicated. Complete devices always carry the operator-only number they
//! were derived from as their first sub-component.

pub mod generator;
pub mod rules;

pub use generator::{
    Configurator, IlluminatedRequest, NonIlluminatedRequest, generate_illuminated,
    generate_non_illuminated,
};
pub use rules::{OperatorStyle, PlateScheme};

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EntryType {
    #[serde(rename = "Operator Only")]
    OperatorOnly,
    #[serde(rename = "Complete Device")]
    CompleteDevice,
    #[serde(rename = "Complete Illuminated Device")]
    CompleteIlluminatedDevice,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::OperatorOnly => "Operator Only",
            EntryType::CompleteDevice => "Complete Device",
            EntryType::CompleteIlluminatedDevice => "Complete Illuminated Device",
        }
    }

    /// Complete devices include a contact block; operator-only rows do not.
    pub fn is_complete(&self) -> bool {
        !matches!(self, EntryType::OperatorOnly)
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ComponentRole {
    #[serde(rename = "Operator Only")]
    OperatorOnly,
    #[serde(rename = "Buttonless Operator")]
    ButtonlessOperator,
    #[serde(rename = "Button Plate")]
    ButtonPlate,
    #[serde(rename = "Lens")]
    Lens,
    #[serde(rename = "Contact Block")]
    ContactBlock,
    #[serde(rename = "Light Unit")]
    LightUnit,
}

impl ComponentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentRole::OperatorOnly => "Operator Only",
            ComponentRole::ButtonlessOperator => "Buttonless Operator",
            ComponentRole::ButtonPlate => "Button Plate",
            ComponentRole::Lens => "Lens",
            ComponentRole::ContactBlock => "Contact Block",
            ComponentRole::LightUnit => "Light Unit",
        }
    }
}

impl fmt::Display for ComponentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubComponent {
    pub role: ComponentRole,
    pub sku: String,
}

impl SubComponent {
    pub fn new(role: ComponentRole, sku: impl Into<String>) -> Self {
        Self {
            role,
            sku: sku.into(),
        }
    }
}

impl fmt::Display for SubComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.role, self.sku)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub catalog_number: String,
    pub sub_components: Vec<SubComponent>,
    /// Only set on illuminated devices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<String>,
}

impl CatalogEntry {
    pub fn is_complete(&self) -> bool {
        self.entry_type.is_complete()
    }

    /// First sub-component filling `role`.
    pub fn component(&self, role: ComponentRole) -> Option<&SubComponent> {
        self.sub_components.iter().find(|c| c.role == role)
    }
}

/// Drops operator-only rows, keeping generation order.
pub fn complete_only(entries: &[CatalogEntry]) -> Vec<&CatalogEntry> {
    entries.iter().filter(|entry| entry.is_complete()).collect()
}

/// Every entry carrying `catalog_number`. Duplicates are independent rows, so
/// all of them come back.
pub fn expand<'a, I>(entries: I, catalog_number: &str) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.catalog_number == catalog_number)
        .collect()
}
