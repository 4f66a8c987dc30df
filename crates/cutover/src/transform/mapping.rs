//! Field mappings between two record schemas.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::table::Value;

/// Copy one source column into one target column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCopy {
    pub source: String,
    pub target: String,
}

/// Fixed recipe for re-shaping a record into another schema.
///
/// Copies run first, in order; constants then overwrite their target columns.
/// Target columns covered by neither receive the missing marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMapping {
    #[serde(default)]
    pub copies: Vec<FieldCopy>,
    #[serde(default)]
    pub constants: IndexMap<String, Value>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `source` into `target`.
    pub fn copy(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.copies.push(FieldCopy {
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// Copy a column that has the same name on both sides.
    pub fn keep(self, column: impl Into<String>) -> Self {
        let column = column.into();
        self.copy(column.clone(), column)
    }

    /// Always write `value` into `target`.
    pub fn constant(mut self, target: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constants.insert(target.into(), value.into());
        self
    }

    /// Human-readable description.
    pub fn description(&self) -> String {
        let renamed = self.copies.iter().filter(|c| c.source != c.target).count();
        format!(
            "{} copied fields ({} renamed), {} constants",
            self.copies.len(),
            renamed,
            self.constants.len()
        )
    }
}
