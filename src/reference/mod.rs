//! Reference data wiring.
//!
//! The configurator reads six small CSV tables (bezels, operators, button
//! colors, lens colors, contact blocks, light units) mapping human labels to
//! product codes. Tables are loaded once, validated, and indexed by label;
//! they are never written back.

pub mod data;
pub mod model;
pub mod table;

pub use data::ReferenceData;
pub use model::{CodeColumn, LabeledCode, LightUnitRow, OperatorRow, ReferenceRow};
pub use table::{ReferenceTable, TableKind};
