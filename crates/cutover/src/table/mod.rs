//! Tabular substrate: cell values and in-memory tables.

mod table;
mod value;

pub use table::{Row, Table};
pub use value::{MISSING, Number, Value};
