//! Record families and their inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::table::Table;

/// A numbered record type with its own reconciliation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Country master data, compared cell by cell.
    #[serde(rename = "01")]
    I01,
    /// Records split by country only.
    #[serde(rename = "34")]
    I34,
    /// Validated against two HOS extracts (I38 and I37).
    #[serde(rename = "38")]
    I38,
    /// Online codes removed, then validated against I37.
    #[serde(rename = "51")]
    I51,
    /// Online I51 records converted into I52 records, then validated against I36.
    #[serde(rename = "52")]
    I52,
    /// Validated against I35.
    #[serde(rename = "53")]
    I53,
}

/// The algorithmic shape a family runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Comparison,
    Split,
    Validation,
    TransformValidation,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::I01,
        Family::I34,
        Family::I38,
        Family::I51,
        Family::I52,
        Family::I53,
    ];

    /// Numeric code, e.g. `"38"`.
    pub fn code(&self) -> &'static str {
        match self {
            Family::I01 => "01",
            Family::I34 => "34",
            Family::I38 => "38",
            Family::I51 => "51",
            Family::I52 => "52",
            Family::I53 => "53",
        }
    }

    /// Prefix used in exported file names, e.g. `"I38"`.
    pub fn label(&self) -> &'static str {
        match self {
            Family::I01 => "I01",
            Family::I34 => "I34",
            Family::I38 => "I38",
            Family::I51 => "I51",
            Family::I52 => "I52",
            Family::I53 => "I53",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Family::I01 => "Country Master Data Comparison",
            Family::I34 => "Split by Country",
            Family::I38 => "Validate Records (I38/I37)",
            Family::I51 => "Validate Records (I51/I37)",
            Family::I52 => "Transform and Validate (I52/I51/I36)",
            Family::I53 => "Validate Records (I53/I35)",
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Family::I01 => Shape::Comparison,
            Family::I34 => Shape::Split,
            Family::I38 | Family::I51 | Family::I53 => Shape::Validation,
            Family::I52 => Shape::TransformValidation,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().trim_start_matches(['I', 'i']);
        Family::ALL
            .into_iter()
            .find(|f| f.code() == code)
            .ok_or_else(|| {
                format!(
                    "Unknown family: {}. Use one of 01, 34, 38, 51, 52, 53.",
                    s
                )
            })
    }
}

/// The tables one reconciliation consumes.
///
/// One variant per family, so every table accepted here is consulted by the
/// family's pipeline.
#[derive(Debug, Clone)]
pub enum FamilyInputs {
    I01 { rf: Table, hos: Table },
    I34 { rf: Table },
    I38 { rf: Table, hos38: Table, hos37: Table },
    I51 { rf: Table, hos37: Table },
    I52 { rf52: Table, rf51: Table, hos36: Table },
    I53 { rf: Table, hos35: Table },
}

impl FamilyInputs {
    pub fn family(&self) -> Family {
        match self {
            FamilyInputs::I01 { .. } => Family::I01,
            FamilyInputs::I34 { .. } => Family::I34,
            FamilyInputs::I38 { .. } => Family::I38,
            FamilyInputs::I51 { .. } => Family::I51,
            FamilyInputs::I52 { .. } => Family::I52,
            FamilyInputs::I53 { .. } => Family::I53,
        }
    }

    /// All input tables, primary first.
    pub fn tables(&self) -> Vec<&Table> {
        match self {
            FamilyInputs::I01 { rf, hos } => vec![rf, hos],
            FamilyInputs::I34 { rf } => vec![rf],
            FamilyInputs::I38 { rf, hos38, hos37 } => vec![rf, hos38, hos37],
            FamilyInputs::I51 { rf, hos37 } => vec![rf, hos37],
            FamilyInputs::I52 { rf52, rf51, hos36 } => vec![rf52, rf51, hos36],
            FamilyInputs::I53 { rf, hos35 } => vec![rf, hos35],
        }
    }
}
