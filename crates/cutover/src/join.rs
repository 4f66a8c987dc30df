//! Exact-key joins.
//!
//! Keys are compared by their string form. No fuzzy matching: an empty key
//! segment only matches another empty segment.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::Result;
use crate::table::{Table, Value};

/// Keep rows of `primary` whose key also appears in `validation`'s key column.
///
/// Only the key column of `validation` is consulted; its other columns never
/// reach the result. Row order of `primary` is preserved.
pub fn semi_join(primary: &Table, validation: &Table, key_column: &str) -> Result<Table> {
    primary.require_columns(&[key_column])?;
    validation.require_columns(&[key_column])?;

    let known: HashSet<String> = validation
        .column_values(key_column)
        .into_iter()
        .flatten()
        .map(|v| v.key_segment().into_owned())
        .collect();

    let joined = primary.select_rows(|row| {
        row.get(key_column)
            .is_some_and(|v| known.contains(&*v.key_segment()))
    });

    debug!(
        primary = primary.name(),
        validation = validation.name(),
        kept = joined.row_count(),
        rejected = primary.row_count() - joined.row_count(),
        "validated against key column"
    );
    Ok(joined)
}

/// Suffixes applied to overlapping column names in [`inner_merge`].
#[derive(Debug, Clone, Copy)]
pub struct Suffixes<'a> {
    pub left: &'a str,
    pub right: &'a str,
}

/// Inner join of two tables on a single column, one-to-many allowed.
///
/// The result holds the left columns (the join column once, at its left
/// position) followed by the right columns. Names present on both sides get
/// the matching suffix. Rows are emitted in left order, and for each left row
/// its matches in right order.
pub fn inner_merge(left: &Table, right: &Table, on: &str, suffixes: Suffixes<'_>) -> Result<Table> {
    left.require_columns(&[on])?;
    right.require_columns(&[on])?;

    let rename = |col: &str, other: &Table, suffix: &str| {
        if col != on && other.has_column(col) {
            format!("{}{}", col, suffix)
        } else {
            col.to_string()
        }
    };

    let mut columns: Vec<String> = left
        .columns()
        .map(|c| rename(c, right, suffixes.left))
        .collect();
    let right_keep: Vec<usize> = right
        .columns()
        .enumerate()
        .filter(|(_, c)| *c != on)
        .map(|(i, _)| i)
        .collect();
    columns.extend(
        right
            .columns()
            .filter(|c| *c != on)
            .map(|c| rename(c, left, suffixes.right)),
    );

    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows().enumerate() {
        let key = row.get(on).map(|v| v.key_segment().into_owned()).unwrap_or_default();
        index.entry(key).or_default().push(i);
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for left_row in left.rows() {
        let key = left_row
            .get(on)
            .map(|v| v.key_segment().into_owned())
            .unwrap_or_default();
        let Some(matches) = index.get(&key) else {
            continue;
        };
        for &ri in matches {
            if let Some(right_row) = right.row(ri) {
                let mut values = left_row.values().to_vec();
                values.extend(right_keep.iter().map(|&c| right_row.values()[c].clone()));
                rows.push(values);
            }
        }
    }

    let merged = Table::new(format!("{}+{}", left.name(), right.name()), columns, rows)?;
    debug!(
        left = left.name(),
        right = right.name(),
        on,
        rows = merged.row_count(),
        "merged"
    );
    Ok(merged)
}
