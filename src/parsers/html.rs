use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// Non-greedy `<...>` on a single line; a stray `<` never swallows later lines
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern should be valid"));

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style pattern should be valid")
});

/// Removes every substring that looks like an HTML tag
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Removes `<script>` and `<style>` elements including their bodies
pub fn strip_script_and_style(html: &str) -> String {
    SCRIPT_STYLE_RE.replace_all(html, "").into_owned()
}

/// Extracts the trimmed text of the document's `<title>`, if there is one
pub fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    let title = doc
        .select(&selector)
        .next()?
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        None
    } else {
        ::log::debug!("HTML title: {}", title);
        Some(title)
    }
}
