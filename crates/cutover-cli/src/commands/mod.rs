//! CLI command implementations.

pub mod countries;
pub mod reconcile;
