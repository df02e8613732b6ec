//! User selections per attribute category.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A chosen label, or the wildcard matching every row of a table.
///
/// The wildcard is its own variant so a real label spelled "Any" can still be
/// selected through [`Selection::specific`]. Only [`Selection::from_label`]
/// (used at the CLI boundary) treats the literal string as the wildcard.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    Any,
    Specific(String),
}

impl Selection {
    pub const ANY_LABEL: &'static str = "Any";

    pub fn specific(label: impl Into<String>) -> Self {
        Selection::Specific(label.into())
    }

    pub fn from_label(raw: &str) -> Self {
        if raw == Self::ANY_LABEL {
            Selection::Any
        } else {
            Selection::Specific(raw.to_string())
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Selection::Any)
    }
}

impl FromStr for Selection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Selection::from_label(s))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Any => f.write_str(Self::ANY_LABEL),
            Selection::Specific(label) => f.write_str(label),
        }
    }
}
