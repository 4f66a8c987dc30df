//! Record transformer: re-shapes rows into a target schema.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::table::{MISSING, Row, Table, Value};

use super::mapping::FieldMapping;

/// Applies a [`FieldMapping`] to rows.
///
/// Absent source fields are expected, so they never fail the transform; the
/// target cell becomes the missing marker instead.
#[derive(Debug, Clone)]
pub struct RecordTransformer<'a> {
    mapping: &'a FieldMapping,
}

impl<'a> RecordTransformer<'a> {
    pub fn new(mapping: &'a FieldMapping) -> Self {
        Self { mapping }
    }

    /// Build a table whose columns are exactly `target_columns`, in that order.
    ///
    /// Mapped targets that are not part of `target_columns` are dropped.
    pub fn transform<'r, S: AsRef<str>>(
        &self,
        name: impl Into<String>,
        source_rows: impl IntoIterator<Item = Row<'r>>,
        target_columns: &[S],
    ) -> Result<Table> {
        let targets: Vec<&str> = target_columns.iter().map(|c| c.as_ref()).collect();
        let mut unfilled: IndexMap<&str, usize> = IndexMap::new();

        let rows: Vec<Vec<Value>> = source_rows
            .into_iter()
            .map(|row| {
                let record = self.map_row(&row);
                targets
                    .iter()
                    .map(|t| match record.get(*t) {
                        Some(v) => v.clone(),
                        None => {
                            *unfilled.entry(*t).or_default() += 1;
                            MISSING
                        }
                    })
                    .collect()
            })
            .collect();

        debug!(
            rows = rows.len(),
            mapping = %self.mapping.description(),
            unfilled_columns = unfilled.len(),
            "transformed records"
        );
        Table::new(name, targets, rows)
    }

    /// Map a single row to `target column -> value`.
    ///
    /// A copy whose source column is absent writes the missing marker.
    pub fn map_row(&self, row: &Row<'_>) -> IndexMap<String, Value> {
        let mut record: IndexMap<String, Value> = IndexMap::new();
        for copy in &self.mapping.copies {
            let value = row.get(&copy.source).cloned().unwrap_or(MISSING);
            record.insert(copy.target.clone(), value);
        }
        for (target, value) in &self.mapping.constants {
            record.insert(target.clone(), value.clone());
        }
        record
    }
}
