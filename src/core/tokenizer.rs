//! Query and field text normalization.

/// Tokens shorter than this are kept in the token sequence but skipped by
/// consumers that apply a minimum-length policy (per-token scoring).
pub const MIN_TOKEN_LEN: usize = 2;

/// Lowercase, trim, and collapse runs of whitespace into single spaces.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

/// Split a string into normalized word tokens.
///
/// Total and deterministic; empty input yields an empty sequence. Short
/// tokens are retained here so callers can apply their own policy.
pub fn tokenize(s: &str) -> Vec<String> {
    s.split_whitespace().map(|w| w.to_lowercase()).collect()
}
