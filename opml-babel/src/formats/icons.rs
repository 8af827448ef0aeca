//! Icon mapping for tree visualization
//!
//! Kept in one place so every tree view draws the same symbol for the same kind of entry.

/// Get the Unicode icon for a kind of entry
pub fn get_icon(kind: &str) -> &'static str {
    match kind {
        "Document" => "⧉",
        "Head" => "⊤",
        "Outline" => "•",
        "Group" => "§",
        _ => "○",
    }
}
