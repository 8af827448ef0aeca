//! Common utilities for outline formats
//!
//! Escaping and option parsing shared by the serializers.

use crate::error::FormatError;
use std::collections::HashMap;

/// Escape XML special characters
///
/// Tab, line feed and carriage return are written as character references so that they
/// survive attribute-value normalization on the way back in.
pub(crate) fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
        .replace('\t', "&#9;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

/// Parses a boolean option value: `true`/`1`/`yes`/`y` or `false`/`0`/`no`/`n`, any case.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Reads a boolean option, accepting the spellings of [`parse_bool`].
pub(crate) fn bool_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<bool>, FormatError> {
    let Some(raw) = options.get(key) else {
        return Ok(None);
    };
    parse_bool(raw).map(Some).ok_or_else(|| {
        FormatError::NotSupported(format!(
            "Invalid boolean value '{raw}' for option '{key}'"
        ))
    })
}

/// Rejects any option not in `known`.
pub(crate) fn reject_unknown_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<_> = options
        .keys()
        .filter(|key| !known.contains(&key.as_str()))
        .cloned()
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not support option(s): {}",
        unknown.join(", ")
    )))
}

/// Truncates `text` to `width` characters, marking the cut with an ellipsis.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
