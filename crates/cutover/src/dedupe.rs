//! Keep-first de-duplication.
//!
//! When several rows share a key, the first row in encounter order wins and
//! every later row with that key is dropped. Rows are never merged.

use std::collections::HashSet;

use tracing::debug;

use crate::error::Result;
use crate::table::Table;

/// Collapse `table` to one row per value of `key_column`, first occurrence wins.
pub fn dedupe(table: &Table, key_column: &str) -> Result<Table> {
    table.require_columns(&[key_column])?;

    let mut seen: HashSet<String> = HashSet::new();
    let deduped = table.select_rows(|row| {
        let key = row
            .get(key_column)
            .map(|v| v.key_segment().into_owned())
            .unwrap_or_default();
        seen.insert(key)
    });

    debug!(
        table = table.name(),
        dropped = table.row_count() - deduped.row_count(),
        kept = deduped.row_count(),
        "deduplicated"
    );
    Ok(deduped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn keyed(rows: &[(&str, f64)]) -> Table {
        Table::new(
            "t",
            ["Payload", "lookup_key"],
            rows.iter()
                .map(|(k, p)| vec![Value::from(*p), Value::from(*k)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_first_occurrence_wins() {
        let t = keyed(&[("A", 1.0), ("B", 2.0), ("A", 3.0)]);
        let d = dedupe(&t, "lookup_key").unwrap();

        assert_eq!(d.row_count(), 2);
        assert_eq!(
            d.row(0).unwrap().values(),
            &[Value::from(1.0), Value::from("A")]
        );
        assert_eq!(d.get(1, "lookup_key"), Some(&Value::from("B")));
    }

    #[test]
    fn test_idempotent() {
        let t = keyed(&[("A", 1.0), ("A", 2.0), ("C", 3.0), ("C", 4.0)]);
        let once = dedupe(&t, "lookup_key").unwrap();
        let twice = dedupe(&once, "lookup_key").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_key_column() {
        let t = keyed(&[("A", 1.0)]);
        assert!(dedupe(&t, "other_key").unwrap_err().is_precondition());
    }
}
