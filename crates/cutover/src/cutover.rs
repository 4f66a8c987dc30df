//! Main Cutover struct and public API.

use std::path::Path;

use crate::config::{CutoverConfig, FamilyConfig};
use crate::error::Result;
use crate::filter::CountryAllowSet;
use crate::input::{Parser, SourceMetadata};
use crate::reconcile::{FamilyInputs, ReconcileOutcome, Reconciler};
use crate::table::Table;

/// Loads extracts and runs family reconciliations with one configuration.
pub struct Cutover {
    config: CutoverConfig,
    parser: Parser,
}

impl Cutover {
    /// Create a new Cutover instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(CutoverConfig::default())
    }

    /// Create a Cutover instance with custom configuration.
    pub fn with_config(config: CutoverConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Replace the family constants, keeping the parser settings.
    pub fn with_families(mut self, families: FamilyConfig) -> Self {
        self.config.families = families;
        self
    }

    pub fn config(&self) -> &CutoverConfig {
        &self.config
    }

    /// Load an extract file as the input called `name`.
    ///
    /// The name is what precondition errors report, so use the operator-facing
    /// label of the upload (e.g. `"I37 HOS"`).
    pub fn load_table(&self, name: &str, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        self.parser.parse_file(name, path)
    }

    /// Reconcile `inputs` for the countries in `allow`.
    pub fn reconcile(
        &self,
        inputs: &FamilyInputs,
        allow: &CountryAllowSet,
    ) -> Result<ReconcileOutcome> {
        Reconciler::new(&self.config.families).run(inputs, allow)
    }
}

impl Default for Cutover {
    fn default() -> Self {
        Self::new()
    }
}
