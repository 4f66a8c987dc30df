//! Family constants and run configuration.
//!
//! Every constant a family needs travels in [`FamilyConfig`] and is passed
//! explicitly into the reconciler. Defaults reproduce the production
//! cutover; a TOML file may override any field.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CutoverError, Result};
use crate::input::ParserConfig;
use crate::transform::FieldMapping;

/// Compared columns of the country master data (family 01).
pub const COMPARE_COLUMNS: &[&str] = &[
    "h_cost_rate",
    "h_trav_CM",
    "h_trav_PM",
    "mat_hand",
    "LaborGM",
    "PartsGM",
    "TP_LP_UP",
    "FP_LP_UP",
    "NBV_LAT",
    "NBV_NPC",
    "NBV_UPLIFT",
];

/// Online-service attribute codes: excluded from family 51, converted in family 52.
pub const ONLINE_CODES: &[&str] = &[
    "HEL_15T_IN",
    "HEL_30T_IN",
    "HEL_ING_IN",
    "EASYSWITCH_IN",
    "UQCM_IN",
];

/// Columns carried over unchanged when an online record becomes a lookup record.
const ONLINE_CARRIED_FIELDS: &[&str] = &[
    "Country",
    "Attribute Value Code",
    "Attribute Value Description",
    "Attribute Value FP",
    "Attribute Value TP",
    "Attribute Value LP",
    "Attribute Value MMFP",
    "Attribute Value MMTP",
    "Attribute Value MMLP",
    "Attribute Deactivated YN",
    "Customer Bank Value",
    "RSM Type",
    "RSM Consumption",
    "Currency",
    "Local FP",
    "Price Book Name",
    "Server",
    "Changed On",
    "Changed By",
];

const MASTER_COUNTRIES: &[&str] = &[
    "HK", "TW", "NZ", "AU", "BR", "CH", "CN", "IE", "IL", "IN", "JP", "MX", "MY", "PL", "RO",
    "SA", "SG", "TH", "ZA", "ES", "PT", "NL", "DK", "BE", "SE", "FI", "NO", "BD", "CA", "CZ",
    "FR", "DE", "HU", "GR", "ID", "KE", "QA", "KR", "TR", "GB", "US", "AF36", "SE36", "MY36",
    "ME36", "KR36",
];

/// Constants shared by the family pipelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyConfig {
    /// Column holding the country code.
    pub country_column: String,
    /// Column holding the attribute code, second half of the composite key.
    pub code_column: String,
    /// Name of the derived key column, always appended last.
    pub key_column: String,
    /// Columns compared between HOS and RF country master data.
    pub compare_columns: Vec<String>,
    /// Suffix of the HOS side after the family 01 merge.
    pub old_suffix: String,
    /// Suffix of the RF side after the family 01 merge.
    pub new_suffix: String,
    /// Attribute codes excluded from family 51 and converted in family 52.
    pub online_codes: Vec<String>,
    /// Mapping from an online record onto the lookup record schema.
    pub online_mapping: FieldMapping,
    /// Trailing housekeeping columns stripped from exported tables.
    pub housekeeping_columns: usize,
    /// Countries the operator can choose from.
    pub master_countries: Vec<String>,
}

impl Default for FamilyConfig {
    fn default() -> Self {
        let mut master_countries: Vec<String> =
            MASTER_COUNTRIES.iter().map(|c| c.to_string()).collect();
        master_countries.sort();

        Self {
            country_column: "Country".to_string(),
            code_column: "Attribute Value Code".to_string(),
            key_column: "lookup_key".to_string(),
            compare_columns: COMPARE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            old_suffix: "_hos".to_string(),
            new_suffix: "_rf".to_string(),
            online_codes: ONLINE_CODES.iter().map(|c| c.to_string()).collect(),
            online_mapping: default_online_mapping(),
            housekeeping_columns: 4,
            master_countries,
        }
    }
}

fn default_online_mapping() -> FieldMapping {
    ONLINE_CARRIED_FIELDS
        .iter()
        .fold(FieldMapping::new(), |m, f| m.keep(*f))
        .constant("Display Group Code", "LI")
        .constant("Attribute Value Price Type", "Lookup")
}

impl FamilyConfig {
    /// Parse a TOML document. Missing fields keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: FamilyConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| CutoverError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Reject configurations the pipelines cannot run with.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("country_column", &self.country_column),
            ("code_column", &self.code_column),
            ("key_column", &self.key_column),
        ] {
            if value.trim().is_empty() {
                return Err(CutoverError::Config(format!("{} must not be empty", field)));
            }
        }
        if self.key_column == self.country_column || self.key_column == self.code_column {
            return Err(CutoverError::Config(format!(
                "key_column '{}' collides with a source column",
                self.key_column
            )));
        }
        if self.old_suffix == self.new_suffix {
            return Err(CutoverError::Config(
                "old_suffix and new_suffix must differ".to_string(),
            ));
        }
        Ok(())
    }

    /// Columns every keyed input must carry.
    pub fn key_columns(&self) -> [&str; 2] {
        [self.country_column.as_str(), self.code_column.as_str()]
    }

    pub fn is_master_country(&self, code: &str) -> bool {
        self.master_countries.iter().any(|c| c == code)
    }
}

/// Configuration for a [`Cutover`](crate::Cutover) instance.
#[derive(Debug, Clone, Default)]
pub struct CutoverConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Family constants.
    pub families: FamilyConfig,
}
