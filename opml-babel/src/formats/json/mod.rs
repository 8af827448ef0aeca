//! JSON rendering of the canonical tree
//!
//! The document is written exactly as it is held in memory:
//!
//! ```text
//! {
//!   "head": { "title": "Reading list", "generator": "opml-babel v0.1.0" },
//!   "body": { "children": [ { "text": "Leaf" } ] }
//! }
//! ```
//!
//! Parsing accepts the same shape. A missing `head` or `body` becomes an empty mapping. The
//! tree is not validated on the way in; the OPML exporter rejects malformed trees.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Canonical outline tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        serde_json::from_str(source)
            .map_err(|e| FormatError::MalformedInput(format!("JSON parsing error: {e}")))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serde_json::to_string_pretty(doc).map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
