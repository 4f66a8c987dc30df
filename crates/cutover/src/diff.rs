//! Cell-level differences between matched rows.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::table::{Table, Value};

/// Column names of the rendered difference report.
pub const REPORT_COLUMNS: [&str; 4] = ["Country", "Column", "Old Value", "New Value"];

/// One disagreeing cell between the old (HOS) and new (RF) side of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    pub country: String,
    pub column: String,
    pub old_value: Value,
    pub new_value: Value,
}

/// Compares suffixed column pairs of a merged table.
#[derive(Debug, Clone)]
pub struct Differencer<'a> {
    country_column: &'a str,
    old_suffix: &'a str,
    new_suffix: &'a str,
}

impl<'a> Differencer<'a> {
    pub fn new(country_column: &'a str, old_suffix: &'a str, new_suffix: &'a str) -> Self {
        Self {
            country_column,
            old_suffix,
            new_suffix,
        }
    }

    /// Report every (row, column) whose old and new values differ exactly.
    ///
    /// A compared column is skipped unless both its suffixed variants exist in
    /// `merged`. Records come out in merge row order, then in the declaration
    /// order of `compare_columns`.
    pub fn diff<S: AsRef<str>>(
        &self,
        merged: &Table,
        compare_columns: &[S],
    ) -> Result<Vec<DifferenceRecord>> {
        merged.require_columns(&[self.country_column])?;

        let pairs: Vec<(&str, String, String)> = compare_columns
            .iter()
            .map(|c| c.as_ref())
            .map(|c| {
                (
                    c,
                    format!("{}{}", c, self.old_suffix),
                    format!("{}{}", c, self.new_suffix),
                )
            })
            .filter(|(_, old, new)| merged.has_column(old) && merged.has_column(new))
            .collect();

        let mut records = Vec::new();
        for row in merged.rows() {
            for (column, old_col, new_col) in &pairs {
                let old = row.get(old_col).cloned().unwrap_or_default();
                let new = row.get(new_col).cloned().unwrap_or_default();
                if old != new {
                    records.push(DifferenceRecord {
                        country: row
                            .get(self.country_column)
                            .map(|v| v.to_string())
                            .unwrap_or_default(),
                        column: column.to_string(),
                        old_value: old,
                        new_value: new,
                    });
                }
            }
        }
        Ok(records)
    }
}

/// Render difference records as a table with [`REPORT_COLUMNS`].
pub fn differences_table(name: impl Into<String>, records: &[DifferenceRecord]) -> Result<Table> {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                Value::from(r.country.as_str()),
                Value::from(r.column.as_str()),
                r.old_value.clone(),
                r.new_value.clone(),
            ]
        })
        .collect();
    Table::new(name, REPORT_COLUMNS, rows)
}
