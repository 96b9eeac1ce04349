//! Stylesheet splitter.
//!
//! Turns raw CSS text into a `Stylesheet`:
//! 1. strips `/* ... */` comments and statement at-rules (`@import ...;`)
//! 2. cuts out every `@media` block, matching its braces by depth
//! 3. reads `selector { body }` pairs from what remains and from each block
//! 4. sets `:root` bodies aside
//!
//! Anything the rule pattern cannot recognise is dropped without warning.

use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{MediaBlock, Rule, Stylesheet};

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("comment pattern"));
/// A run of statement at-rules, anchored at the start of the text or just
/// after a `;` or `}` so an `@` inside a value (`logo@2x.png`) never matches.
static STATEMENT_AT_RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[;}])(?:\s*@[\w-]+[^;{}]*;)+").expect("statement at-rule pattern")
});
static MEDIA_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@media\b([^{;]*)\{").expect("media pattern"));
pub(crate) static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").expect("rule pattern"));

const ROOT_SELECTOR: &str = ":root";

/// Split CSS text into root declarations, rules and media blocks.
pub fn parse(css: &str) -> Stylesheet {
    let css = COMMENT.replace_all(css, "");
    let css = STATEMENT_AT_RULE.replace_all(&css, "${1}");
    let (top_level, blocks) = split_media(&css);

    let mut sheet = Stylesheet::default();
    for rule in parse_rules(&top_level) {
        if rule.selector == ROOT_SELECTOR {
            sheet.root.push(rule.body);
        } else {
            sheet.rules.push(rule);
        }
    }

    sheet.media = blocks
        .into_iter()
        .map(|(query, body)| MediaBlock {
            query,
            rules: parse_rules(body),
        })
        .collect();

    tracing::debug!(
        root = sheet.root.len(),
        rules = sheet.rules.len(),
        media = sheet.media.len(),
        "parsed stylesheet"
    );

    sheet
}

/// Read every brace-delimited rule from a run of CSS text.
pub fn parse_rules(css: &str) -> Vec<Rule> {
    RULE.captures_iter(css)
        .filter_map(|caps| {
            let selector = normalize_selector(&caps[1]);
            if selector.is_empty() {
                return None;
            }
            Some(Rule::new(selector, caps[2].trim()))
        })
        .collect()
}

/// Collapse whitespace inside a selector list and rejoin it as `a, b`.
pub fn normalize_selector(selector: &str) -> String {
    selector
        .split(',')
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Separate `@media` blocks from the rest of the text.
///
/// Returns the text with every block removed, and each block's query and
/// inner text. An unterminated block runs to the end of the input.
fn split_media(css: &str) -> (String, Vec<(String, &str)>) {
    let mut top_level = String::with_capacity(css.len());
    let mut blocks = Vec::new();
    let mut rest = css;

    while let Some(caps) = MEDIA_START.captures(rest) {
        let Some(whole) = caps.get(0) else {
            break;
        };
        top_level.push_str(&rest[..whole.start()]);

        let query = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
        let inner = &rest[whole.end()..];
        match closing_brace(inner) {
            Some(end) => {
                blocks.push((query, &inner[..end]));
                rest = &inner[end + 1..];
            }
            None => {
                blocks.push((query, inner));
                rest = "";
            }
        }
    }
    top_level.push_str(rest);

    (top_level, blocks)
}

/// Byte offset of the `}` closing a block whose `{` was already consumed.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' if depth == 0 => return Some(i),
            b'}' => depth -= 1,
            _ => {}
        }
    }
    None
}
