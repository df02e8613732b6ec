//! Part-number templates and the few compatibility rules of the M22 family.

use anyhow::{Result, bail};
use std::fmt;

/// Base bezel family. Caps, lenses, contact blocks and light units are always
/// cataloged under it regardless of the bezel actually selected.
pub const BASE_BEZEL: &str = "M22";

/// Guarded operators only mount on the base bezel.
const GUARD_OPERATORS: [&str; 2] = ["DG", "DGH"];

/// Guard without a button: sold as an operator only, never as a complete device.
const GUARD_PLACEHOLDER: &str = "DG";

const FLUSH_OPERATORS: [&str; 3] = ["D", "DR", "DG"];

/// Suffix appended to the bezel code for illuminated operators.
const ILLUMINATED_SUFFIX: &str = "L";

/// Whether `operator_code` may be combined with `bezel`.
pub fn bezel_accepts(bezel: &str, operator_code: &str) -> bool {
    !GUARD_OPERATORS.contains(&operator_code) || bezel == BASE_BEZEL
}

/// Whether a non-illuminated operator also yields complete devices.
pub fn yields_complete_devices(operator_code: &str) -> bool {
    operator_code != GUARD_PLACEHOLDER
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorStyle {
    Flush,
    Extended,
}

impl OperatorStyle {
    pub fn for_code(operator_code: &str) -> Self {
        if FLUSH_OPERATORS.contains(&operator_code) {
            OperatorStyle::Flush
        } else {
            OperatorStyle::Extended
        }
    }
}

/// How the button plate catalog number is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlateScheme {
    /// `M22-XD-{color}` for every operator.
    #[default]
    Uniform,
    /// `M22-XD-{color}` for flush operators, `M22-XDH-{color}` for extended.
    ByStyle,
}

impl PlateScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlateScheme::Uniform => "uniform",
            PlateScheme::ByStyle => "by-style",
        }
    }

    pub fn button_plate(&self, style: OperatorStyle, color: &str) -> String {
        match (self, style) {
            (PlateScheme::ByStyle, OperatorStyle::Extended) => {
                format!("{BASE_BEZEL}-XDH-{color}")
            }
            _ => format!("{BASE_BEZEL}-XD-{color}"),
        }
    }
}

impl TryFrom<&str> for PlateScheme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value.trim() {
            "uniform" => Ok(PlateScheme::Uniform),
            "by-style" | "by_style" => Ok(PlateScheme::ByStyle),
            other => bail!("unknown plate scheme '{other}', expected uniform or by-style"),
        }
    }
}

impl fmt::Display for PlateScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn illuminated_bezel(bezel: &str) -> String {
    format!("{bezel}{ILLUMINATED_SUFFIX}")
}

pub fn button_lens(lens: &str) -> String {
    format!("{BASE_BEZEL}-XDL-{lens}")
}

pub fn contact_block_sku(contact_block: &str) -> String {
    format!("{BASE_BEZEL}-{contact_block}")
}

pub fn light_unit_sku(light_unit: &str) -> String {
    format!("{BASE_BEZEL}-LED-{light_unit}")
}
