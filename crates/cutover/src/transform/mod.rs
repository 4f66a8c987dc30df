//! Schema-to-schema record transformation.

mod engine;
mod mapping;

pub use engine::RecordTransformer;
pub use mapping::{FieldCopy, FieldMapping};
