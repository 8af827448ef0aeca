//! Treeviz formatter for outlines
//!
//! A visual rendering of the outline tree, one entry per line:
//!
//! <prefix><connector> <icon> <label> (label truncated to the configured width)
//!
//! ```text
//! ⧉ Reading list (3 outlines)
//! ├─ • Leaf
//! └─ § Parent
//!   └─ • Child
//! ```
//!
//! Icons: Document ⧉, head field ⊤, outline with children §, leaf outline •.
//! The label is the `text` attribute, then `title`, then the first scalar field.

use super::common::{bool_option, reject_unknown_options, truncate};
use super::icons::get_icon;
use crate::common::visit::count_nodes;
use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Document, Node, GENERATOR_FIELD};
use std::collections::HashMap;

pub const DEFAULT_MAX_LABEL_WIDTH: usize = 30;

fn node_label(node: &Node) -> String {
    if let Some(label) = node.label() {
        return label.to_string();
    }
    node.scalars()
        .next()
        .map(|(name, value)| format!("{name}={value}"))
        .unwrap_or_else(|| "(empty)".to_string())
}

fn format_node(
    node: &Node,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    width: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(if node.has_children() { "Group" } else { "Outline" });

    let mut output = format!(
        "{prefix}{connector} {icon} {}\n",
        truncate(&node_label(node), width)
    );

    if let Some(children) = node.children() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        output.push_str(&format_children(children, &child_prefix, width));
    }
    output
}

fn format_children(children: &[Node], prefix: &str, width: usize) -> String {
    let child_count = children.len();
    children
        .iter()
        .enumerate()
        .map(|(i, child)| format_node(child, prefix, i, child_count, width))
        .collect()
}

/// Convert a document to a treeviz string
///
/// - `width`: maximum label width in characters
/// - `show_head`: list head fields (the generator stamp excluded) under the document line
pub fn to_treeviz_str(doc: &Document, width: usize, show_head: bool) -> String {
    let title = doc.head.scalar("title").unwrap_or("Document");
    let mut output = format!(
        "{} {} ({} outlines)\n",
        get_icon("Document"),
        truncate(title, width),
        count_nodes(doc)
    );

    if show_head {
        let icon = get_icon("Head");
        for (name, value) in doc.head.scalars() {
            if name != GENERATOR_FIELD {
                output.push_str(&format!("  {icon} {name}: {}\n", truncate(value, width)));
            }
        }
    }

    output + &format_children(doc.outlines(), "", width)
}

/// Format implementation for treeviz format
pub struct TreevizFormat {
    max_label_width: usize,
    show_head: bool,
}

impl TreevizFormat {
    pub fn new(max_label_width: usize) -> Self {
        Self {
            max_label_width,
            show_head: false,
        }
    }

    pub fn with_show_head(mut self, show_head: bool) -> Self {
        self.show_head = show_head;
        self
    }
}

impl Default for TreevizFormat {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LABEL_WIDTH)
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with connectors and Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc, self.max_label_width, self.show_head))
    }

    /// Options: `max-label-width` (number), `show-head` (boolean).
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        reject_unknown_options(self.name(), options, &["max-label-width", "show-head"])?;

        let width = match options.get("max-label-width") {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                FormatError::NotSupported(format!("Invalid max-label-width '{raw}'"))
            })?,
            None => self.max_label_width,
        };
        let show_head = bool_option(options, "show-head")?.unwrap_or(self.show_head);
        Ok(to_treeviz_str(doc, width, show_head))
    }
}
