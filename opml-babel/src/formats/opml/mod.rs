//! OPML format implementation
//!
//! Parsing runs in two steps: [`tokenizer`] turns the XML text into a generic element tree,
//! then [`import`] rewrites that tree into the canonical [`Document`]. Serialization is the
//! inverse walk in [`export`].

use crate::error::FormatError;
use crate::format::Format;
use crate::formats::common::{bool_option, reject_unknown_options};
use crate::model::Document;
use std::collections::HashMap;

pub mod element;
pub mod export;
pub mod import;
pub mod tokenizer;

pub use export::ExportOptions;

/// Parses OPML text into a [`Document`].
pub fn parse_opml(source: &str) -> Result<Document, FormatError> {
    let generic = tokenizer::tokenize(source)?;
    import::import(generic)
}

/// OPML 2.0 outline documents.
#[derive(Default)]
pub struct OpmlFormat {
    options: ExportOptions,
}

impl OpmlFormat {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Applies per-call options over the format's own.
    ///
    /// - `indent`: `tab`, or a number of spaces
    /// - `escape-head`: boolean
    fn options_with(&self, options: &HashMap<String, String>) -> Result<ExportOptions, FormatError> {
        reject_unknown_options(self.name(), options, &["indent", "escape-head"])?;

        let mut resolved = self.options.clone();
        if let Some(raw) = options.get("indent") {
            resolved.indent = parse_indent(raw)?;
        }
        if let Some(escape_head) = bool_option(options, "escape-head")? {
            resolved.escape_head = escape_head;
        }
        Ok(resolved)
    }
}

fn parse_indent(raw: &str) -> Result<String, FormatError> {
    if raw.eq_ignore_ascii_case("tab") {
        return Ok("\t".to_string());
    }
    raw.parse::<usize>()
        .map(|spaces| " ".repeat(spaces))
        .map_err(|_| {
            FormatError::NotSupported(format!(
                "Invalid indent '{raw}': expected 'tab' or a number of spaces"
            ))
        })
}

impl Format for OpmlFormat {
    fn name(&self) -> &str {
        "opml"
    }

    fn description(&self) -> &str {
        "OPML 2.0 outline format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["opml"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parse_opml(source)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        export::export_with_options(doc, &self.options)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let resolved = self.options_with(options)?;
        export::export_with_options(doc, &resolved)
    }
}
