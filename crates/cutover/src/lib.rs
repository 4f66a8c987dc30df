//! Cutover: reconciliation of RF extracts against HOS extracts.
//!
//! Record tables from the source system (RF) are restricted to an operator
//! chosen set of countries, keyed on country plus attribute code, de-duplicated
//! keep-first, and validated against the target system (HOS) by exact key
//! match. One family compares master data cell by cell instead, and one first
//! converts online-service records into lookup records.
//!
//! # Core Principles
//!
//! - **Explicit inputs**: every constant and the country selection are passed in
//! - **Non-destructive**: input tables are never modified
//! - **Order preserving**: results keep the primary input's row order
//!
//! # Example
//!
//! ```no_run
//! use cutover::{CountryAllowSet, Cutover, FamilyInputs};
//!
//! let cutover = Cutover::new();
//! let (rf, _) = cutover.load_table("I53 RF", "rf_53.csv").unwrap();
//! let (hos35, _) = cutover.load_table("I35 HOS", "hos_35.csv").unwrap();
//!
//! let allow = CountryAllowSet::parse("US,GB").unwrap();
//! let outcome = cutover.reconcile(&FamilyInputs::I53 { rf, hos35 }, &allow).unwrap();
//! println!("Validated rows: {}", outcome.table.row_count());
//! ```

pub mod config;
pub mod dedupe;
pub mod diff;
pub mod error;
pub mod export;
pub mod filter;
pub mod input;
pub mod join;
pub mod key;
pub mod reconcile;
pub mod table;
pub mod transform;

mod cutover;

pub use crate::cutover::Cutover;
pub use config::{CutoverConfig, FamilyConfig};
pub use dedupe::dedupe;
pub use diff::{DifferenceRecord, Differencer, differences_table};
pub use error::{CutoverError, Result};
pub use export::{save_csv, write_csv, write_outcome};
pub use filter::{CountryAllowSet, filter_by_country};
pub use input::{Encoding, Parser, ParserConfig, SourceMetadata};
pub use join::{Suffixes, inner_merge, semi_join};
pub use key::{CompositeKey, KeyBuilder};
pub use reconcile::{
    Family, FamilyInputs, InputCounts, ReconcileOutcome, ReconcileSummary, Reconciler, Shape,
};
pub use table::{MISSING, Number, Row, Table, Value};
pub use transform::{FieldCopy, FieldMapping, RecordTransformer};
