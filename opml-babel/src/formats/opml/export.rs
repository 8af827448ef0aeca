//! Canonical [`Document`] to OPML text
//!
//! Output layout, one element per line, one indent unit per nesting level:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <opml version="2.0">
//!     <head>
//!         <title>Reading list</title>
//!     </head>
//!     <body>
//!         <outline text="Leaf"/>
//!         <outline text="Parent">
//!             <outline text="Child"/>
//!         </outline>
//!     </body>
//! </opml>
//! ```
//!
//! Outline attributes are escaped; head values are written as they are unless
//! [`ExportOptions::escape_head`] is set. The generator stamp is never written out.

use super::import::{OUTLINE_TAG, ROOT_TAG};
use crate::error::FormatError;
use crate::formats::common::escape_xml;
use crate::model::{Document, Node, GENERATOR_FIELD};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const OPML_VERSION: &str = "2.0";

/// Knobs for [`export_with_options`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// One level of indentation.
    pub indent: String,
    /// Escape head values the way outline attributes are escaped.
    pub escape_head: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            indent: "\t".to_string(),
            escape_head: false,
        }
    }
}

/// Serializes with tab indentation and unescaped head values.
pub fn export(doc: &Document) -> Result<String, FormatError> {
    export_with_options(doc, &ExportOptions::default())
}

/// Serializes a document.
///
/// The document is validated first; a [`FormatError::MalformedDocument`] is returned and
/// nothing is written when it does not have the canonical shape.
pub fn export_with_options(doc: &Document, options: &ExportOptions) -> Result<String, FormatError> {
    doc.validate()?;

    let indent = options.indent.as_str();
    let mut output = String::new();
    output.push_str(XML_DECLARATION);
    output.push('\n');
    output.push_str(&format!("<{ROOT_TAG} version=\"{OPML_VERSION}\">\n"));

    output.push_str(&format!("{indent}<head>\n"));
    output.push_str(&render_head(&doc.head, options));
    output.push_str(&format!("{indent}</head>\n"));

    output.push_str(&format!("{indent}<body>\n"));
    for node in doc.outlines() {
        output.push_str(&render_outline(node, 2, indent));
    }
    output.push_str(&format!("{indent}</body>\n"));

    output.push_str(&format!("</{ROOT_TAG}>"));
    Ok(output)
}

fn render_head(head: &Node, options: &ExportOptions) -> String {
    let pad = options.indent.repeat(2);
    let mut output = String::new();
    for (name, value) in head.scalars() {
        if name == GENERATOR_FIELD {
            continue;
        }
        if options.escape_head {
            output.push_str(&format!("{pad}<{name}>{}</{name}>\n", escape_xml(value)));
        } else {
            output.push_str(&format!("{pad}<{name}>{value}</{name}>\n"));
        }
    }
    output
}

/// Renders one outline and its subtree, starting `depth` indent units in.
pub fn render_outline(node: &Node, depth: usize, indent: &str) -> String {
    let pad = indent.repeat(depth);
    let attributes = render_attributes(node);

    match node.children() {
        Some(children) if !children.is_empty() => {
            let mut output = format!("{pad}<{OUTLINE_TAG}{attributes}>\n");
            for child in children {
                output.push_str(&render_outline(child, depth + 1, indent));
            }
            output.push_str(&format!("{pad}</{OUTLINE_TAG}>\n"));
            output
        }
        _ => format!("{pad}<{OUTLINE_TAG}{attributes}/>\n"),
    }
}

fn render_attributes(node: &Node) -> String {
    node.scalars()
        .map(|(name, value)| format!(" {name}=\"{}\"", escape_xml(value)))
        .collect()
}
