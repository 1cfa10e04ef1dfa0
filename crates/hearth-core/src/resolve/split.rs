// ── Conjunction splitter ──

use std::sync::LazyLock;

use regex::Regex;

static CONJUNCTION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i),\s*and\s+|\s+and\s+|\s+&\s+|,").ok());

/// Split a phrase naming several targets into trimmed, non-empty segments,
/// in their original order.
pub fn split_targets(text: &str) -> Vec<String> {
    let pieces: Vec<&str> = match CONJUNCTION.as_ref() {
        Some(re) => re.split(text).collect(),
        None => vec![text],
    };
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}
