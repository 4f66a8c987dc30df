//! Results of a reconciliation run.

use indexmap::IndexMap;
use serde::Serialize;

use crate::diff::{DifferenceRecord, differences_table};
use crate::error::Result;
use crate::table::Table;

use super::family::Family;

/// Row counts for one input table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputCounts {
    pub name: String,
    /// Rows supplied.
    pub rows: usize,
    /// Rows left after country filtering.
    pub in_scope: usize,
    /// Rows dropped by keep-first de-duplication.
    pub duplicates_dropped: usize,
}

/// What happened during a run, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    pub family: Family,
    pub inputs: Vec<InputCounts>,
    /// Primary rows removed by the attribute exclusion set.
    pub excluded_rows: usize,
    /// Secondary rows converted into the primary schema.
    pub converted_rows: usize,
    /// Rows of the combined primary set whose key no validation table holds.
    pub rejected_rows: usize,
    pub result_rows: usize,
    pub differences: usize,
    /// Countries present in the result, in first-appearance order.
    pub countries: Vec<String>,
}

impl ReconcileSummary {
    pub(crate) fn new(family: Family) -> Self {
        Self {
            family,
            inputs: Vec::new(),
            excluded_rows: 0,
            converted_rows: 0,
            rejected_rows: 0,
            result_rows: 0,
            differences: 0,
            countries: Vec::new(),
        }
    }

    pub(crate) fn input_mut(&mut self, name: &str) -> &mut InputCounts {
        let idx = match self.inputs.iter().position(|i| i.name == name) {
            Some(idx) => idx,
            None => {
                self.inputs.push(InputCounts {
                    name: name.to_string(),
                    ..Default::default()
                });
                self.inputs.len() - 1
            }
        };
        &mut self.inputs[idx]
    }
}

/// The validated (or filtered) table of a run plus, for family 01, its differences.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome {
    pub family: Family,
    /// Result rows. When keyed, the key column is the last column.
    pub table: Table,
    /// Name of the derived key column, if the family builds one.
    pub key_column: Option<String>,
    /// Column holding the country code.
    pub country_column: String,
    /// Cell differences (family 01 only).
    pub differences: Option<Vec<DifferenceRecord>>,
    pub summary: ReconcileSummary,
}

impl ReconcileOutcome {
    /// Whether no rows survived. A valid, successful result.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Result table without the derived key column.
    pub fn table_without_key(&self) -> Table {
        match &self.key_column {
            Some(key) => self.table.drop_columns(&[key]),
            None => self.table.clone(),
        }
    }

    /// Per-country tables ready for export.
    ///
    /// The key column is removed first, then the trailing `housekeeping`
    /// columns. Countries appear in the order they first occur.
    pub fn export_partitions(&self, housekeeping: usize) -> Result<IndexMap<String, Table>> {
        let parts = self.table_without_key().partition_by(&self.country_column)?;
        Ok(parts
            .into_iter()
            .map(|(country, t)| {
                let name = format!("{}_{}", self.family.label(), country);
                (country, t.drop_trailing_columns(housekeeping).renamed(name))
            })
            .collect())
    }

    /// The difference report as a table, when the family produces one.
    pub fn differences_table(&self) -> Result<Option<Table>> {
        self.differences
            .as_deref()
            .map(|d| differences_table(format!("{}_changes", self.family.label()), d))
            .transpose()
    }
}
