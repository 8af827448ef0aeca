//! Canonical outline tree
//!
//!     Every format converts to and from this representation. A [`Node`] is an ordered mapping
//!     from field name to [`Value`]: the field named `children` holds the nested outline
//!     entries, every other field holds a string. The field set is whatever the source
//!     document carried, so it is a map rather than a record.
//!
//!     A [`Document`] owns a `head` node (metadata, scalars only) and a `body` node whose
//!     `children` list is the root level of the outline. Nothing in the tree is shared.
//!
//!     The types cannot stop a caller from inserting a scalar under `children` or a node list
//!     under any other name (the JSON format can produce such trees too), so exporters call
//!     [`Document::validate`] before emitting anything.

use crate::error::FormatError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Reserved field name holding a node's nested entries.
pub const CHILDREN: &str = "children";

/// Head field stamped on import and stripped on export.
pub const GENERATOR_FIELD: &str = "generator";

/// Producer identification written into `head.generator` on import.
pub const GENERATOR: &str = concat!("opml-babel v", env!("CARGO_PKG_VERSION"));

/// A field value: either a string or, for `children` only, an ordered list of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(String),
    Nodes(Vec<Node>),
}

impl Value {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(text) => Some(text),
            Value::Nodes(_) => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[Node]> {
        match self {
            Value::Nodes(nodes) => Some(nodes),
            Value::Scalar(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Scalar(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Scalar(text)
    }
}

/// One outline entry.
///
/// Field order is kept so that re-export writes attributes in source order, but it does not
/// take part in equality.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node {
    fields: IndexMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Node::set_scalar`].
    pub fn with_scalar(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_scalar(name, value);
        self
    }

    /// Builder that replaces the children list.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.fields
            .insert(CHILDREN.to_string(), Value::Nodes(children));
        self
    }

    /// Returns the scalar stored under `name`, if any.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_scalar)
    }

    /// Stores a scalar field.
    ///
    /// Returns `false` and stores nothing when `name` is the reserved `children` field.
    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if name == CHILDREN {
            return false;
        }
        self.fields.insert(name, Value::Scalar(value.into()));
        true
    }

    /// The children list, or `None` when the node has none (or `children` is malformed).
    pub fn children(&self) -> Option<&[Node]> {
        self.fields.get(CHILDREN).and_then(Value::as_nodes)
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self.fields.get_mut(CHILDREN) {
            Some(Value::Nodes(nodes)) => Some(nodes),
            _ => None,
        }
    }

    /// Appends a child, starting a new list if `children` is absent or not a list.
    pub fn push_child(&mut self, child: Node) {
        match self.fields.get_mut(CHILDREN) {
            Some(Value::Nodes(nodes)) => nodes.push(child),
            _ => {
                self.fields
                    .insert(CHILDREN.to_string(), Value::Nodes(vec![child]));
            }
        }
    }

    /// True when the node has at least one child.
    pub fn has_children(&self) -> bool {
        self.children().is_some_and(|children| !children.is_empty())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Raw insert, bypassing the `children` reservation.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// All fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Scalar fields in insertion order, skipping `children`.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter(|(name, _)| name.as_str() != CHILDREN)
            .filter_map(|(name, value)| value.as_scalar().map(|text| (name.as_str(), text)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Human label: the `text` attribute, falling back to `title`.
    pub fn label(&self) -> Option<&str> {
        self.scalar("text").or_else(|| self.scalar("title"))
    }
}

/// The canonical root: metadata in `head`, the outline under `body.children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub head: Node,
    #[serde(default)]
    pub body: Node,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document whose body holds `outlines`.
    pub fn with_outlines(outlines: Vec<Node>) -> Self {
        Document {
            head: Node::new(),
            body: Node::new().with_children(outlines),
        }
    }

    /// Root-level outline entries (empty when the body has none).
    pub fn outlines(&self) -> &[Node] {
        self.body.children().unwrap_or(&[])
    }

    /// Root-level outline entries for in-place edits, `None` when the body has no list.
    pub fn outlines_mut(&mut self) -> Option<&mut Vec<Node>> {
        self.body.children_mut()
    }

    pub fn generator(&self) -> Option<&str> {
        self.head.scalar(GENERATOR_FIELD)
    }

    /// Checks the canonical shape: head holds only scalars, and in body and every outline
    /// `children` is a node list while every other field is a scalar.
    ///
    /// The error names the first offending field, e.g. `body/outline[1]/outline[0]/children`.
    pub fn validate(&self) -> Result<(), FormatError> {
        for (name, value) in self.head.fields() {
            if !value.is_scalar() {
                return Err(FormatError::malformed_document(
                    format!("head/{name}"),
                    "head fields must be scalars",
                ));
            }
        }
        validate_node(&self.body, "body")
    }
}

fn validate_node(node: &Node, path: &str) -> Result<(), FormatError> {
    for (name, value) in node.fields() {
        match (name == CHILDREN, value) {
            (true, Value::Nodes(children)) => {
                for (index, child) in children.iter().enumerate() {
                    validate_node(child, &format!("{path}/outline[{index}]"))?;
                }
            }
            (true, Value::Scalar(_)) => {
                return Err(FormatError::malformed_document(
                    format!("{path}/{CHILDREN}"),
                    "children must be a list of nodes",
                ));
            }
            (false, Value::Nodes(_)) => {
                return Err(FormatError::malformed_document(
                    format!("{path}/{name}"),
                    "only children may hold nodes",
                ));
            }
            (false, Value::Scalar(_)) => {}
        }
    }
    Ok(())
}
