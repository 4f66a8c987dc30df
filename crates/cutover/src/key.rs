//! Composite business keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CutoverError, Result};
use crate::table::{Row, Table, Value};

const SEPARATOR: char = '|';
const ESCAPE: char = '\\';

/// Key formed from the string form of designated columns, in order.
///
/// Segments are joined with `|`, and `|` or `\` inside a segment are escaped,
/// so two keys are equal exactly when every segment is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(String);

impl CompositeKey {
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut encoded = String::new();
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                encoded.push(SEPARATOR);
            }
            for ch in segment.as_ref().chars() {
                if ch == SEPARATOR || ch == ESCAPE {
                    encoded.push(ESCAPE);
                }
                encoded.push(ch);
            }
        }
        Self(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CompositeKey> for Value {
    fn from(key: CompositeKey) -> Self {
        Value::String(key.0)
    }
}

/// Derives a [`CompositeKey`] per row from a fixed list of columns.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    columns: Vec<String>,
}

impl KeyBuilder {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Build the key for one row. Absent or empty cells give an empty segment.
    pub fn build_key(&self, row: &Row<'_>) -> CompositeKey {
        CompositeKey::from_segments(self.columns.iter().map(|c| {
            row.get(c)
                .map(|v| v.key_segment().into_owned())
                .unwrap_or_default()
        }))
    }

    /// Copy of `table` with the key appended as the last column `key_column`.
    ///
    /// Fails if a designated column is missing from the table, or if the
    /// table already has a column named `key_column`.
    pub fn with_key_column(&self, table: &Table, key_column: &str) -> Result<Table> {
        table.require_columns(self.columns.as_slice())?;
        if table.has_column(key_column) {
            return Err(CutoverError::ReservedColumn {
                table: table.name().to_string(),
                column: key_column.to_string(),
            });
        }
        let keys = table
            .rows()
            .map(|row| Value::from(self.build_key(&row)))
            .collect();
        table.with_column(key_column, keys)
    }
}
