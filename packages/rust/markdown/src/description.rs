//! Search-index descriptions.

use std::sync::LazyLock;

use regex::Regex;

use nodedocs_shared::DESCRIPTION_MAX_CHARS;

/// Regions that never belong in a description: HTML comments (YAML
/// metadata blocks), `*` parameter lists, `> ` quotes and fenced code.
static REMOVABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)<!--[\s\S]+?-->|^\s*?\*.+|^\s*?> .+|```[\s\S]+?```").expect("valid regex")
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Derive a single-line snippet of at most [`DESCRIPTION_MAX_CHARS`] characters.
///
/// Truncation counts characters, not bytes, and may cut a word in half.
pub fn extract_description(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped = REMOVABLE_RE.replace_all(text, "");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    collapsed.chars().take(DESCRIPTION_MAX_CHARS).collect()
}
