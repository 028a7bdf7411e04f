//! Text transforms over the small rich-text markup stored in schedule slots.
//!
//! Slots hold inline HTML produced by an editor (`<b>`, `<font>`, `<br>`). Nothing here
//! sanitizes markup; these helpers only normalize line structure and derive plain text.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(?:div|p)\b[^>]*>").expect("block open pattern"));
static BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:div|p)\s*>").expect("block close pattern"));
static BREAK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:<br\s*/?>\s*){2,}").expect("break run pattern"));
static EDGE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:<br\s*/?>)+|(?:<br\s*/?>)+$").expect("edge break pattern")
});
static BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("break pattern"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern"));

/// Canonical line break used in stored markup
pub const BREAK_TAG: &str = "<br>";

/// Normalize editor output before it is stored in a slot.
///
/// Block wrappers become line breaks, runs of breaks collapse to one, and
/// leading/trailing breaks are removed.
pub fn normalize_markup(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let cleaned = BLOCK_OPEN.replace_all(html, BREAK_TAG);
    let cleaned = BLOCK_CLOSE.replace_all(&cleaned, BREAK_TAG);
    let cleaned = BREAK_RUN.replace_all(&cleaned, BREAK_TAG);
    EDGE_BREAKS.replace_all(&cleaned, "").into_owned()
}

/// Remove every tag, keeping text content as-is
pub fn strip_tags(html: &str) -> String {
    TAG.replace_all(html, "").into_owned()
}

/// Plain text with one `\n` per stored line break
pub fn markup_to_plain(html: &str) -> String {
    let with_newlines = BREAK.replace_all(html, "\n");
    decode_entities(&strip_tags(&with_newlines))
}

/// Convert textarea-style text into stored markup (newlines become breaks)
pub fn plain_to_markup(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\n', BREAK_TAG)
}

/// Stored markup as editable text, keeping inline tags but showing breaks as newlines
pub fn markup_to_editable(html: &str) -> String {
    BREAK.replace_all(html, "\n").into_owned()
}

/// Display lines of a slot, tags removed
pub fn display_lines(html: &str) -> Vec<String> {
    let plain = markup_to_plain(html);
    if plain.is_empty() {
        return Vec::new();
    }
    plain.split('\n').map(|s| s.to_string()).collect()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
