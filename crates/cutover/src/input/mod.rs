//! Loading extract files into tables.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{Encoding, SourceMetadata};
