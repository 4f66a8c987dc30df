//! Per-family reconciliation pipelines.
//!
//! Every family runs the same skeleton: country filter, composite key,
//! keep-first de-duplication, optional transform and merge, then exact-key
//! validation against every validation table. Families differ only in which
//! steps run. Inputs are never modified; each step works on a copy.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::config::FamilyConfig;
use crate::dedupe::dedupe;
use crate::diff::{DifferenceRecord, Differencer};
use crate::error::{CutoverError, Result};
use crate::filter::{CountryAllowSet, filter_by_country};
use crate::join::{Suffixes, inner_merge, semi_join};
use crate::key::KeyBuilder;
use crate::table::Table;
use crate::transform::RecordTransformer;

use super::family::{Family, FamilyInputs};
use super::outcome::{ReconcileOutcome, ReconcileSummary};

/// Runs family pipelines with a fixed set of constants.
#[derive(Debug, Clone)]
pub struct Reconciler<'a> {
    config: &'a FamilyConfig,
}

impl<'a> Reconciler<'a> {
    pub fn new(config: &'a FamilyConfig) -> Self {
        Self { config }
    }

    /// Reconcile one set of inputs for the selected countries.
    ///
    /// Required columns are checked on every input before any work is done;
    /// the first input lacking one fails the run with
    /// [`CutoverError::MissingColumns`]. Keyed families also reject inputs
    /// that already carry the key column.
    /// Zero surviving rows is a successful, empty outcome.
    pub fn run(&self, inputs: &FamilyInputs, allow: &CountryAllowSet) -> Result<ReconcileOutcome> {
        let family = inputs.family();
        self.check_preconditions(inputs)?;

        let outcome = match inputs {
            FamilyInputs::I01 { rf, hos } => self.compare(rf, hos, allow)?,
            FamilyInputs::I34 { rf } => self.split(family, rf, allow)?,
            FamilyInputs::I38 { rf, hos38, hos37 } => {
                self.validate(family, rf, &[hos38, hos37], None, allow)?
            }
            FamilyInputs::I51 { rf, hos37 } => self.validate(
                family,
                rf,
                &[hos37],
                Some(self.config.online_codes.as_slice()),
                allow,
            )?,
            FamilyInputs::I52 { rf52, rf51, hos36 } => {
                self.transform_and_validate(rf52, rf51, hos36, allow)?
            }
            FamilyInputs::I53 { rf, hos35 } => {
                self.validate(family, rf, &[hos35], None, allow)?
            }
        };

        info!(
            family = %family,
            countries = allow.len(),
            result_rows = outcome.summary.result_rows,
            rejected = outcome.summary.rejected_rows,
            differences = outcome.summary.differences,
            "reconciliation complete"
        );
        Ok(outcome)
    }

    fn check_preconditions(&self, inputs: &FamilyInputs) -> Result<()> {
        let keyed = self.config.key_columns();
        let required: &[&str] = match inputs.family() {
            Family::I01 | Family::I34 => &keyed[..1],
            _ => &keyed,
        };
        let keyed_family = !matches!(inputs.family(), Family::I01 | Family::I34);
        for table in inputs.tables() {
            table.require_columns(required)?;
            if keyed_family && table.has_column(&self.config.key_column) {
                return Err(CutoverError::ReservedColumn {
                    table: table.name().to_string(),
                    column: self.config.key_column.clone(),
                });
            }
        }
        Ok(())
    }

    fn key_builder(&self) -> KeyBuilder {
        KeyBuilder::new(self.config.key_columns())
    }

    /// Country filter, recording counts.
    fn scope(
        &self,
        table: &Table,
        allow: &CountryAllowSet,
        summary: &mut ReconcileSummary,
    ) -> Result<Table> {
        let filtered = filter_by_country(table, &self.config.country_column, allow)?;
        let counts = summary.input_mut(table.name());
        counts.rows = table.row_count();
        counts.in_scope = filtered.row_count();
        if filtered.is_empty() {
            warn!(input = table.name(), "no rows for the selected countries");
        }
        Ok(filtered)
    }

    /// Composite key plus keep-first de-duplication, recording counts.
    fn key_and_dedupe(&self, table: &Table, summary: &mut ReconcileSummary) -> Result<Table> {
        let key_column = &self.config.key_column;
        let keyed = self.key_builder().with_key_column(table, key_column)?;
        let deduped = dedupe(&keyed, key_column)?;
        summary.input_mut(table.name()).duplicates_dropped +=
            keyed.row_count() - deduped.row_count();
        Ok(deduped)
    }

    /// Family 01: merge HOS and RF on country and diff the compared columns.
    ///
    /// No de-duplication; the comparison runs over the raw filtered rows.
    fn compare(&self, rf: &Table, hos: &Table, allow: &CountryAllowSet) -> Result<ReconcileOutcome> {
        let mut summary = ReconcileSummary::new(Family::I01);
        let rf_scoped = self.scope(rf, allow, &mut summary)?;
        let hos_scoped = self.scope(hos, allow, &mut summary)?;

        let merged = inner_merge(
            &hos_scoped,
            &rf_scoped,
            &self.config.country_column,
            Suffixes {
                left: &self.config.old_suffix,
                right: &self.config.new_suffix,
            },
        )?;
        let differences = Differencer::new(
            &self.config.country_column,
            &self.config.old_suffix,
            &self.config.new_suffix,
        )
        .diff(&merged, &self.config.compare_columns)?;
        debug!(merged = merged.row_count(), differences = differences.len(), "compared");

        summary.differences = differences.len();
        self.finish(Family::I01, rf_scoped, None, Some(differences), summary)
    }

    /// Family 34: the allow-set is the only predicate.
    fn split(
        &self,
        family: Family,
        rf: &Table,
        allow: &CountryAllowSet,
    ) -> Result<ReconcileOutcome> {
        let mut summary = ReconcileSummary::new(family);
        let scoped = self.scope(rf, allow, &mut summary)?;
        self.finish(family, scoped, None, None, summary)
    }

    /// Families 38, 51 and 53: keep primary records whose key is present in
    /// every validation table.
    fn validate(
        &self,
        family: Family,
        primary: &Table,
        validators: &[&Table],
        exclude_codes: Option<&[String]>,
        allow: &CountryAllowSet,
    ) -> Result<ReconcileOutcome> {
        let mut summary = ReconcileSummary::new(family);
        let mut scoped = self.scope(primary, allow, &mut summary)?;

        if let Some(codes) = exclude_codes {
            let before = scoped.row_count();
            scoped = self.without_codes(&scoped, codes);
            summary.excluded_rows = before - scoped.row_count();
            debug!(excluded = summary.excluded_rows, "removed excluded attribute codes");
        }

        let primary_keyed = self.key_and_dedupe(&scoped, &mut summary)?;
        let mut keyed_validators = Vec::with_capacity(validators.len());
        for validator in validators {
            let v_scoped = self.scope(validator, allow, &mut summary)?;
            keyed_validators.push(self.key_and_dedupe(&v_scoped, &mut summary)?);
        }

        let validated = self.validate_keys(&primary_keyed, &keyed_validators)?;
        summary.rejected_rows = primary_keyed.row_count() - validated.row_count();
        self.finish(
            family,
            validated,
            Some(self.config.key_column.clone()),
            None,
            summary,
        )
    }

    /// Family 52: convert online I51 records into I52 records, merge them with
    /// the native I52 records, then validate the union against I36.
    fn transform_and_validate(
        &self,
        rf52: &Table,
        rf51: &Table,
        hos36: &Table,
        allow: &CountryAllowSet,
    ) -> Result<ReconcileOutcome> {
        let mut summary = ReconcileSummary::new(Family::I52);
        let key_column = &self.config.key_column;

        let rf52_scoped = self.scope(rf52, allow, &mut summary)?;
        let rf51_scoped = self.scope(rf51, allow, &mut summary)?;
        let hos36_scoped = self.scope(hos36, allow, &mut summary)?;

        let hos36_keyed = self.key_and_dedupe(&hos36_scoped, &mut summary)?;

        let online = self.only_codes(&rf51_scoped, &self.config.online_codes);
        let online_keyed = self.key_and_dedupe(&online, &mut summary)?;

        let native_keyed = self.key_and_dedupe(&rf52_scoped, &mut summary)?;

        let converted = RecordTransformer::new(&self.config.online_mapping).transform(
            format!("{} (converted)", rf51.name()),
            online_keyed.rows(),
            rf52_scoped.column_names().as_slice(),
        )?;
        let converted_keyed = self.key_builder().with_key_column(&converted, key_column)?;
        summary.converted_rows = converted_keyed.row_count();

        let combined = native_keyed.concat(&converted_keyed)?;
        let combined = dedupe(&combined, key_column)?;
        debug!(
            native = native_keyed.row_count(),
            converted = converted_keyed.row_count(),
            combined = combined.row_count(),
            "merged converted records"
        );

        let validated = self.validate_keys(&combined, &[hos36_keyed])?;
        summary.rejected_rows = combined.row_count() - validated.row_count();
        self.finish(
            Family::I52,
            validated,
            Some(key_column.clone()),
            None,
            summary,
        )
    }

    fn validate_keys(&self, primary: &Table, validators: &[Table]) -> Result<Table> {
        validators.iter().try_fold(primary.clone(), |acc, v| {
            semi_join(&acc, v, &self.config.key_column)
        })
    }

    fn code_matches(&self, table: &Table, codes: &[String], keep_matching: bool) -> Table {
        let codes: HashSet<&str> = codes.iter().map(|c| c.as_str()).collect();
        let code_column = &self.config.code_column;
        table.select_rows(|row| {
            let hit = row
                .get(code_column)
                .is_some_and(|v| codes.contains(&*v.key_segment()));
            hit == keep_matching
        })
    }

    fn without_codes(&self, table: &Table, codes: &[String]) -> Table {
        self.code_matches(table, codes, false)
    }

    fn only_codes(&self, table: &Table, codes: &[String]) -> Table {
        self.code_matches(table, codes, true)
    }

    fn finish(
        &self,
        family: Family,
        table: Table,
        key_column: Option<String>,
        differences: Option<Vec<DifferenceRecord>>,
        mut summary: ReconcileSummary,
    ) -> Result<ReconcileOutcome> {
        summary.result_rows = table.row_count();
        summary.countries = table
            .partition_by(&self.config.country_column)?
            .into_keys()
            .collect();

        Ok(ReconcileOutcome {
            family,
            table,
            key_column,
            country_column: self.config.country_column.clone(),
            differences,
            summary,
        })
    }
}
