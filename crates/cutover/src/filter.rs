//! Country scoping.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CutoverError, Result};
use crate::table::Table;

/// The countries selected for one run.
///
/// Built once per invocation and only read afterwards. An empty selection is
/// rejected at construction, so holding one means processing may proceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct CountryAllowSet {
    countries: IndexSet<String>,
}

impl CountryAllowSet {
    /// Build an allow-set. Codes are trimmed; blank codes are ignored.
    pub fn new<I, S>(countries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let countries: IndexSet<String> = countries
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if countries.is_empty() {
            return Err(CutoverError::EmptyAllowSet);
        }
        Ok(Self { countries })
    }

    /// Parse a comma-separated selection such as `"US, GB"`.
    pub fn parse(list: &str) -> Result<Self> {
        Self::new(list.split(','))
    }

    pub fn contains(&self, country: &str) -> bool {
        self.countries.contains(country)
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Selected codes in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.as_str())
    }
}

impl TryFrom<Vec<String>> for CountryAllowSet {
    type Error = CutoverError;

    fn try_from(value: Vec<String>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CountryAllowSet> for Vec<String> {
    fn from(set: CountryAllowSet) -> Self {
        set.countries.into_iter().collect()
    }
}

/// Keep only rows whose country is in the allow-set.
///
/// Columns and row order are unchanged. The country is compared by its string
/// form, so a numeric cell `36` matches the code `"36"`.
pub fn filter_by_country(
    table: &Table,
    country_column: &str,
    allow: &CountryAllowSet,
) -> Result<Table> {
    table.require_columns(&[country_column])?;

    let filtered = table.select_rows(|row| {
        row.get(country_column)
            .is_some_and(|v| allow.contains(&v.key_segment()))
    });

    debug!(
        table = table.name(),
        before = table.row_count(),
        after = filtered.row_count(),
        "filtered by country"
    );
    Ok(filtered)
}
