//! CLI-specific inspect views
//!
//! Each view renders the imported outline tree in a different way:
//!
//! - `treeviz`: Tree visualization with Unicode icons (default)
//! - `json`: The canonical tree as JSON
//! - `stats`: Outline counts gathered with the tree visitor
//!
//! ## Extra Parameters
//!
//! Views accept extra parameters via `--extra-<name> [value]`, handed to the
//! underlying format. `treeviz` understands `max-label-width` and `show-head`.
//!
//! Example: `opml inspect feeds.opml treeviz --extra-show-head`

use opml_babel::common::visit::{count_nodes, max_depth, visit};
use opml_babel::{Document, FormatRegistry};
use std::collections::HashMap;

/// All available inspect views
pub const AVAILABLE_VIEWS: &[&str] = &["treeviz", "json", "stats"];

/// Render a parsed document with the named view
///
/// # Returns
///
/// The rendered output as a string, or an error message
pub fn execute_view(
    registry: &FormatRegistry,
    doc: &Document,
    view: &str,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    match view {
        "treeviz" | "json" => registry
            .serialize_with_options(doc, view, extra_params)
            .map_err(|e| format!("View failed: {e}")),
        "stats" => {
            if let Some(key) = extra_params.keys().next() {
                return Err(format!("View 'stats' does not support parameter '{key}'"));
            }
            Ok(stats(doc))
        }
        other => Err(format!("Unknown view '{other}'")),
    }
}

fn stats(doc: &Document) -> String {
    let mut leaves = 0;
    visit(doc.outlines(), |node| {
        if !node.has_children() {
            leaves += 1;
        }
        true
    });

    format!(
        "outlines: {}\nleaves: {}\nmax depth: {}\nhead fields: {}\n",
        count_nodes(doc),
        leaves,
        max_depth(doc.outlines()),
        doc.head.scalars().count()
    )
}
