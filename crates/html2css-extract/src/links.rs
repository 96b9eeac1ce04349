//! Stylesheet link discovery.

use std::sync::LazyLock;

use regex::Regex;

static LINK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<\s*link\b[^>]*>").expect("link tag pattern"));
static REL_STYLESHEET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\srel\s*=\s*["']?[^"'>]*\bstylesheet\b"#).expect("rel pattern")
});
static HREF_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\shref\s*=\s*["']([^"']+)["']"#).expect("href pattern")
});

/// Collect the `href` of every `<link rel="stylesheet">` in a document.
///
/// Attribute order does not matter. Targets are returned in document order
/// with duplicates removed; they are returned as written, unresolved.
pub fn stylesheet_links(html: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();

    for tag in LINK_TAG.find_iter(html) {
        let tag = tag.as_str();
        if !REL_STYLESHEET.is_match(tag) {
            continue;
        }
        if let Some(caps) = HREF_ATTR.captures(tag) {
            let href = caps[1].trim().to_string();
            if !href.is_empty() && !links.contains(&href) {
                links.push(href);
            }
        }
    }

    links
}
