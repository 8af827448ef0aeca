//! XML to [`GenericElement`]
//!
//! `roxmltree` does the parsing; this module only reshapes its DOM. The result is a wrapper
//! element whose single field is the document's root element, so the importer can tell a
//! missing `<opml>` root from an empty one.
//!
//! Names keep their namespace prefix (`dc:creator`, `foo:bar`). Namespace declarations made
//! on an element below the root are kept as `xmlns:*` attributes so that a re-exported
//! element still declares the prefixes it uses.
//!
//! Text is kept verbatim, except in mixed content (an element with child elements) where the
//! direct text is trimmed so that indentation does not leak into the value.

use super::element::{Field, GenericElement};
use crate::error::FormatError;
use indexmap::IndexMap;
use roxmltree::{Node, ParsingOptions};

pub fn tokenize(source: &str) -> Result<GenericElement, FormatError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let xml = roxmltree::Document::parse_with_options(source, options)
        .map_err(|e| FormatError::MalformedInput(format!("XML parsing error: {e}")))?;

    let root = xml.root_element();
    let mut document = GenericElement::new();
    document.push_field(element_name(root), element_field(root));
    Ok(document)
}

fn element_field(node: Node) -> Field {
    let attributes = attributes(node);
    let has_elements = node.children().any(|child| child.is_element());

    if attributes.is_empty() && !has_elements {
        return Field::Text(direct_text(node));
    }

    let mut element = GenericElement::new();
    if !attributes.is_empty() {
        element.attributes = Some(attributes);
    }
    for child in node.children().filter(|child| child.is_element()) {
        element.push_field(element_name(child), element_field(child));
    }
    element.text = if has_elements {
        direct_text(node).trim().to_string()
    } else {
        direct_text(node)
    };
    Field::Element(element)
}

/// `prefix:local`, or the bare local name for unprefixed and default-namespace names.
fn qualified_name(scope: Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| scope.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

fn element_name(node: Node) -> String {
    let tag = node.tag_name();
    qualified_name(node, tag.namespace(), tag.name())
}

fn attributes(node: Node) -> IndexMap<String, String> {
    let mut attributes = IndexMap::new();

    // roxmltree reports in-scope namespaces; only the ones this element adds are declarations
    if let Some(parent) = node.parent_element() {
        for ns in node.namespaces() {
            let inherited = parent
                .namespaces()
                .any(|outer| outer.name() == ns.name() && outer.uri() == ns.uri());
            if inherited || ns.name() == Some("xml") {
                continue;
            }
            let name = match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            attributes.insert(name, ns.uri().to_string());
        }
    }

    for attr in node.attributes() {
        attributes.insert(
            qualified_name(node, attr.namespace(), attr.name()),
            attr.value().to_string(),
        );
    }
    attributes
}

fn direct_text(node: Node) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}
