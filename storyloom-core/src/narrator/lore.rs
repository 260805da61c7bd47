//! Conditional lore injection keyed on literal keyword matches.
//!
//! Matching is exact substring containment — no fuzzing, no case folding —
//! so an author can predict every trigger from the text itself.

use crate::story::LoreEntry;

/// Banner above the activated entries in the assembled prompt.
pub const LORE_BANNER: &str = "[Triggered lore]";

/// Entries whose keyword appears verbatim in `scan_text`, in definition
/// order. Entries with a blank keyword never activate.
///
/// `scan_text` is the windowed transcript plus the raw instruction, so a
/// trigger can come from story content or from the author's new direction.
pub fn activate<'a>(entries: &'a [LoreEntry], scan_text: &str) -> Vec<&'a LoreEntry> {
    entries
        .iter()
        .filter(|entry| {
            let keyword = entry.keyword.trim();
            !keyword.is_empty() && scan_text.contains(keyword)
        })
        .collect()
}

/// Render activated entries under the banner. Empty when nothing fired.
pub fn render(activated: &[&LoreEntry]) -> String {
    if activated.is_empty() {
        return String::new();
    }
    let mut out = String::from(LORE_BANNER);
    for entry in activated {
        out.push('\n');
        out.push_str("【entry: ");
        out.push_str(entry.keyword.trim());
        out.push('】');
        out.push_str(entry.description.trim());
    }
    out
}
