//! Case-file renderers
//!
//! Exporters read records through their getters and never derive hashes on
//! their own. The JSON format can be read back with [`JsonExporter::parse`],
//! which rebuilds the records and reports any entry whose stored hash no
//! longer matches its content.

mod case;
mod json;
mod markdown;

pub use case::CaseFile;
pub use json::{ClaimCheck, EvidenceCheck, JsonExporter, ParsedCase};
pub use markdown::MarkdownExporter;
