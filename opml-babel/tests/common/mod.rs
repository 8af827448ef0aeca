//! Shared helpers for integration tests

use opml_babel::model::GENERATOR_FIELD;
use opml_babel::{Document, Node};
use std::path::PathBuf;

/// Reads a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

/// Imports a fixture, panicking on failure.
pub fn import_fixture(name: &str) -> Document {
    opml_babel::import(&fixture(name)).unwrap_or_else(|e| panic!("Failed to import {name}: {e}"))
}

/// Removes the generator stamp so documents can be compared structurally.
pub fn without_generator(mut doc: Document) -> Document {
    doc.head.remove(GENERATOR_FIELD);
    doc
}

pub fn named(text: &str) -> Node {
    Node::new().with_scalar("text", text)
}

pub fn texts(nodes: &[Node]) -> Vec<&str> {
    nodes.iter().filter_map(|n| n.scalar("text")).collect()
}
