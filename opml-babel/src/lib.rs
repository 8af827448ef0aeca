//! OPML interoperability for outline trees
//!
//!     This crate converts OPML documents to and from a canonical, format-neutral tree, and
//!     offers a small visitor for walking that tree.
//!
//!     TLDR: For format authors:
//!         - Every format converts to and from the canonical model (./model.rs), never to another format directly.
//!         - XML tokenizing is left to roxmltree; our code only rewrites the generic element tree it produces.
//!         - Each format is unit tested next to its code, and end to end under tests/<format>.
//!
//! Architecture
//!
//!     Importing runs in two stages. The tokenizer (./formats/opml/tokenizer.rs) turns OPML text
//!     into a generic element tree where a repeated child name becomes a list. The importer
//!     (./formats/opml/import.rs) then rewrites that tree into the canonical model: `head` and
//!     `body` mappings, outline attributes as scalar fields, nested outlines under `children`.
//!
//!     Exporting is the inverse walk (./formats/opml/export.rs). The document is validated
//!     before a single byte is written, so a malformed tree yields an error and never a
//!     partial document.
//!
//!     This is a pure lib, that is, it powers the opml cli but is shell agnostic: no code
//!     here should suppose a shell environment, be it std printing, env vars etc.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── model.rs                # Canonical Document / Node / Value
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── common
//!     │   └── visit.rs            # Depth-first tree visitor
//!     ├── formats
//!     │   ├── opml                # element, tokenizer, import, export
//!     │   ├── json                # Canonical tree as JSON
//!     │   ├── treeviz             # Visual tree dump
//!     │   └── common              # Escaping and option parsing
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     └── opml
//!         ├── <testname>.rs
//!         └── fixtures
//!             └── <docname>.opml
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! The Canonical Model
//!
//!     A node is an ordered mapping from field name to value, where a value is either a text
//!     scalar or an ordered list of nodes. The field `children` is reserved for nested outlines
//!     and is the only field that may hold a list. Field order is kept as read, so attributes
//!     come back out in the order they went in.
//!
//!     Conversion is lossy on purpose: comments, processing instructions, namespaces, root
//!     attributes and the original whitespace are not kept. Everything an outline reader cares
//!     about (head metadata, attributes, nesting and order) survives a round trip.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod model;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use formats::opml::ExportOptions;
pub use model::{Document, Node, Value};
pub use registry::FormatRegistry;

/// Imports OPML text into the canonical [`Document`].
///
/// The head is stamped with this library's `generator` marker.
pub fn import(source: &str) -> Result<Document, FormatError> {
    formats::opml::parse_opml(source)
}

/// Exports a [`Document`] as OPML 2.0 text with default options.
pub fn export(doc: &Document) -> Result<String, FormatError> {
    formats::opml::export::export(doc)
}
