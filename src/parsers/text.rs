use regex::Regex;
use std::sync::LazyLock;

/// Anything that is neither a Unicode word character nor whitespace
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern should be valid"));

/// Removes punctuation and symbols, keeping letters of every script
pub fn strip_punctuation(text: &str) -> String {
    PUNCTUATION_RE.replace_all(text, "").into_owned()
}
