//! Generic element tree to canonical [`Document`]
//!
//!     Attributes become scalar fields, text-only child elements become scalar fields, and
//!     every `outline` child is converted into a node appended to `children`, in document
//!     order, whether the tokenizer delivered one of them or a list.
//!
//!     Only `head` and `body` are kept from the root. Below them a node holds nothing but
//!     scalars and `children`, so any other structured child is flattened to its text.

use super::element::{as_list, Field, GenericElement};
use crate::error::FormatError;
use crate::model::{Document, Node, CHILDREN, GENERATOR, GENERATOR_FIELD};
use tracing::{debug, trace, warn};

/// Root element name of the outline exchange format.
pub const ROOT_TAG: &str = "opml";

/// The repeated child element collected into `children`.
pub const OUTLINE_TAG: &str = "outline";

/// Converts the tokenizer's output into a [`Document`] and stamps the generator.
///
/// Fails with [`FormatError::MalformedInput`] when there is no `<opml>` root or the root is
/// empty. A missing or empty head/body is not an error; they become empty mappings.
pub fn import(mut document: GenericElement) -> Result<Document, FormatError> {
    let opml = match document.fields.shift_remove(ROOT_TAG) {
        Some(Field::Element(element)) => element,
        Some(_) => {
            return Err(FormatError::MalformedInput(format!(
                "<{ROOT_TAG}> root element is empty"
            )))
        }
        None => {
            let found = document
                .fields
                .keys()
                .next()
                .map(|name| format!("<{name}>"))
                .unwrap_or_else(|| "nothing".to_string());
            return Err(FormatError::MalformedInput(format!(
                "Root element is {found}, expected <{ROOT_TAG}>"
            )));
        }
    };

    if let Some(attributes) = &opml.attributes {
        debug!(count = attributes.len(), "dropping root attributes");
    }

    let mut doc = Document::new();
    for (name, field) in opml.fields {
        match name.as_str() {
            "head" => doc.head = section(field),
            "body" => doc.body = section(field),
            other => debug!(element = other, "dropping unsupported top-level element"),
        }
    }

    if let Some(discarded) = doc.head.remove(CHILDREN) {
        warn!(
            count = discarded.as_nodes().map_or(0, <[Node]>::len),
            "discarding outline elements found in head"
        );
    }

    stamp_generator(&mut doc);
    Ok(doc)
}

/// A head or body section. Anything that is not an element (absent content, bare text)
/// becomes an empty mapping; a repeated section keeps its last occurrence.
fn section(field: Field) -> Node {
    match field {
        Field::Element(element) => convert(element),
        Field::List(items) => items.into_iter().last().map(section).unwrap_or_default(),
        Field::Text(text) => {
            if !text.trim().is_empty() {
                debug!("section holds only text; using an empty mapping");
            }
            Node::new()
        }
    }
}

/// Converts one element into a node.
pub fn convert(source: GenericElement) -> Node {
    let mut dest = Node::new();

    if let Some(attributes) = source.attributes {
        for (name, value) in attributes {
            if !dest.set_scalar(name, value) {
                debug!("ignoring attribute named `{CHILDREN}`");
            }
        }
    }

    for (name, field) in source.fields {
        if name == OUTLINE_TAG {
            for item in as_list(field) {
                dest.push_child(outline(item));
            }
        } else if name == CHILDREN {
            debug!("ignoring element named `{CHILDREN}`");
        } else {
            if !field.is_scalar() {
                debug!(element = %name, "flattening structured element to its text");
            }
            dest.set_scalar(name, field.into_text());
        }
    }

    trace!(fields = dest.len(), "converted element");
    dest
}

fn outline(item: Field) -> Node {
    match item {
        Field::Element(element) => convert(element),
        // `<outline/>` with no attributes reaches us as text
        Field::Text(text) => {
            if !text.trim().is_empty() {
                debug!("dropping text content of an outline element");
            }
            Node::new()
        }
        // as_list never yields nested lists
        Field::List(items) => items.into_iter().last().map(outline).unwrap_or_default(),
    }
}

fn stamp_generator(doc: &mut Document) {
    if !doc.head.set_scalar(GENERATOR_FIELD, GENERATOR) {
        debug!("could not stamp generator");
    }
}
