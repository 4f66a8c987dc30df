//! In-memory relation shared by every pipeline stage.

use indexmap::{IndexMap, IndexSet};

use crate::error::{CutoverError, Result};

use super::value::Value;

/// An ordered set of named columns and rows of values aligned to them.
///
/// Every row holds exactly one value per column. Operations never modify a
/// table in place; they return a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: IndexSet<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a IndexSet<String>,
    values: &'a [Value],
}

impl<'a> Row<'a> {
    /// Get a cell by column name.
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .get_index_of(column)
            .and_then(|i| self.values.get(i))
    }

    /// All values in column order.
    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

impl Table {
    /// Create a table, rejecting duplicate column names and ragged rows.
    pub fn new<I, S>(name: impl Into<String>, columns: I, rows: Vec<Vec<Value>>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut set = IndexSet::new();
        for column in columns {
            let column = column.into();
            if !set.insert(column.clone()) {
                return Err(CutoverError::Schema(format!(
                    "table '{}' declares column '{}' more than once",
                    name, column
                )));
            }
        }

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != set.len()) {
            return Err(CutoverError::Schema(format!(
                "table '{}' row {} has {} values but {} columns are declared",
                name,
                idx,
                row.len(),
                set.len()
            )));
        }

        Ok(Self {
            name,
            columns: set,
            rows,
        })
    }

    /// Create a table with columns and no rows.
    pub fn empty<I, S>(name: impl Into<String>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, columns, Vec::new())
    }

    /// Name of the input this table came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the same table under another name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.as_str())
    }

    /// Owned copy of the column names.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().cloned().collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All values of a column, or `None` if the column does not exist.
    pub fn column_values(&self, column: &str) -> Option<impl Iterator<Item = &Value>> {
        let col = self.column_index(column)?;
        Some(self.rows.iter().map(move |r| &r[col]))
    }

    /// Fail with [`CutoverError::MissingColumns`] unless every column is present.
    pub fn require_columns<S: AsRef<str>>(&self, required: &[S]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| !self.has_column(c))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(CutoverError::MissingColumns {
                table: self.name.clone(),
                missing,
                present: self.column_names(),
            })
        }
    }

    /// Copy of the rows for which `keep` returns true, in order.
    pub fn select_rows(&self, mut keep: impl FnMut(Row<'_>) -> bool) -> Table {
        let rows = self
            .rows()
            .filter(|r| keep(*r))
            .map(|r| r.values.to_vec())
            .collect();

        Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Copy with a new column appended after the existing ones.
    pub fn with_column(&self, name: impl Into<String>, values: Vec<Value>) -> Result<Table> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(CutoverError::Schema(format!(
                "table '{}' already has a column named '{}'",
                self.name, name
            )));
        }
        if values.len() != self.rows.len() {
            return Err(CutoverError::Schema(format!(
                "column '{}' has {} values but table '{}' has {} rows",
                name,
                values.len(),
                self.name,
                self.rows.len()
            )));
        }

        let mut columns = self.columns.clone();
        columns.insert(name);
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                row.push(value);
                row
            })
            .collect();

        Ok(Table {
            name: self.name.clone(),
            columns,
            rows,
        })
    }

    /// Copy without the named columns. Names that are not present are ignored.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Table {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| {
                let col = &self.columns[i];
                !names.iter().any(|n| n.as_ref() == col)
            })
            .collect();
        self.project(&keep)
    }

    /// Copy without the last `count` columns.
    pub fn drop_trailing_columns(&self, count: usize) -> Table {
        let keep: Vec<usize> = (0..self.columns.len().saturating_sub(count)).collect();
        self.project(&keep)
    }

    fn project(&self, keep: &[usize]) -> Table {
        let columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Table {
            name: self.name.clone(),
            columns,
            rows,
        }
    }

    /// Rows of `self` followed by rows of `other`. Schemas must match exactly.
    pub fn concat(&self, other: &Table) -> Result<Table> {
        if !self.columns.iter().eq(other.columns.iter()) {
            return Err(CutoverError::Schema(format!(
                "cannot concatenate '{}' onto '{}': column order differs",
                other.name, self.name
            )));
        }

        let mut rows = self.rows.clone();
        rows.extend(other.rows.iter().cloned());
        Ok(Table {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        })
    }

    /// Split rows by the string form of a column, ordered by first appearance.
    pub fn partition_by(&self, column: &str) -> Result<IndexMap<String, Table>> {
        self.require_columns(&[column])?;
        let col = self.column_index(column).unwrap_or_default();

        let mut parts: IndexMap<String, Table> = IndexMap::new();
        for row in &self.rows {
            let key = row[col].key_segment().into_owned();
            parts
                .entry(key)
                .or_insert_with(|| Table {
                    name: self.name.clone(),
                    columns: self.columns.clone(),
                    rows: Vec::new(),
                })
                .rows
                .push(row.clone());
        }
        Ok(parts)
    }

    /// Consume the table, returning its raw rows.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }
}
