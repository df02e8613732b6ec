//! Row types for the reference tables.
//!
//! Each struct mirrors the CSV header of its table. Rows are plain values;
//! lookup structure lives in [`ReferenceTable`](super::ReferenceTable).

use serde::{Deserialize, Serialize};

/// Which code column a resolver projects out of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CodeColumn {
    #[default]
    Code,
    /// Operator body without its cap. Rows without the column fall back to
    /// the primary code.
    Buttonless,
}

/// A row addressable by a human-readable label.
pub trait ReferenceRow {
    fn label(&self) -> &str;
    fn code(&self) -> &str;

    fn column(&self, column: CodeColumn) -> &str {
        match column {
            CodeColumn::Code | CodeColumn::Buttonless => self.code(),
        }
    }
}

/// Plain `label,code` row used by bezels, button colors, lens colors and
/// contact blocks.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LabeledCode {
    pub label: String,
    pub code: String,
}

impl LabeledCode {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }
}

impl ReferenceRow for LabeledCode {
    fn label(&self) -> &str {
        &self.label
    }

    fn code(&self) -> &str {
        &self.code
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperatorRow {
    pub label: String,
    pub code: String,
    #[serde(default)]
    pub buttonless: Option<String>,
}

impl OperatorRow {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
            buttonless: None,
        }
    }

    pub fn with_buttonless(mut self, code: impl Into<String>) -> Self {
        self.buttonless = Some(code.into());
        self
    }

    /// Code of the operator body sold without a button cap.
    pub fn buttonless_code(&self) -> &str {
        match self.buttonless.as_deref() {
            Some(code) if !code.trim().is_empty() => code,
            _ => &self.code,
        }
    }
}

impl ReferenceRow for OperatorRow {
    fn label(&self) -> &str {
        &self.label
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn column(&self, column: CodeColumn) -> &str {
        match column {
            CodeColumn::Code => &self.code,
            CodeColumn::Buttonless => self.buttonless_code(),
        }
    }
}

/// Illumination module. Light units are selected by color, so the color
/// doubles as the row label.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct LightUnitRow {
    pub code: String,
    pub color: String,
    #[serde(rename = "lu_voltage", alias = "voltage")]
    pub voltage: String,
}

impl LightUnitRow {
    pub fn new(
        code: impl Into<String>,
        color: impl Into<String>,
        voltage: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            color: color.into(),
            voltage: voltage.into(),
        }
    }
}

impl ReferenceRow for LightUnitRow {
    fn label(&self) -> &str {
        &self.color
    }

    fn code(&self) -> &str {
        &self.code
    }
}
