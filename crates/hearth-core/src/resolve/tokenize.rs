// ── Tokenizer ──
//
// One function shared by corpus indexing and live queries, so both
// sides always produce comparable tokens.

/// Short tokens that still carry meaning for device names.
pub const SHORT_TOKEN_WHITELIST: &[&str] = &["ac", "tv", "ir", "fan", "led", "pir"];

/// Minimum length (in chars) of a token outside the whitelist.
pub const MIN_TOKEN_LEN: usize = 3;

/// Articles, fillers and command verbs that never identify a device.
///
/// Words that also occur in device names ("back", "check", "switch",
/// "all") are left to the scorer; the detectors strip their own verbs.
pub const STOP_WORDS: &[&str] = &[
    "the", "turn", "set", "please", "you", "could", "would", "what", "whats", "and", "with",
    "for", "from", "into", "this", "that", "them", "are", "was", "percent", "then", "also",
];

/// Lowercase `text`, split on runs of non-alphanumeric characters and keep
/// tokens of at least three characters or on the short-token whitelist.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .filter(|token| {
            token.chars().count() >= MIN_TOKEN_LEN || SHORT_TOKEN_WHITELIST.contains(token)
        })
        .map(str::to_owned)
        .collect()
}

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Tokenize a query and drop stop words.
pub fn query_tokens(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !is_stop_word(token))
        .collect()
}
