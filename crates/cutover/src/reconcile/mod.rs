//! Family reconciliation: inputs, pipelines and outcomes.

mod family;
mod outcome;
mod pipeline;

pub use family::{Family, FamilyInputs, Shape};
pub use outcome::{InputCounts, ReconcileOutcome, ReconcileSummary};
pub use pipeline::Reconciler;
