//! CSS serializer.
//!
//! Renders a rule mapping as stylesheet text. `:root` always comes first;
//! the remaining keys follow the configured sort order. Runs of semicolons
//! left by fragment joining are collapsed in the final text.

use std::cmp::Ordering;
use std::sync::LazyLock;

use html2css_extract::SelectorKind;
use regex::Regex;

use crate::breakpoint::Breakpoint;
use crate::merge::{RuleMapping, ROOT_KEY};
use crate::options::{Placeholder, RenderOptions, SortOrder};

static SEMICOLON_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";{2,}").expect("semicolon pattern"));

/// Tags rendered ahead of every other selector, in this order.
pub const STRUCTURAL_TAGS: &[&str] = &["html", "body", "header", "footer"];

pub const PLACEHOLDER_COMMENT: &str = "/* Add your styles here */";


const INDENT: &str = "    ";

/// Render the base stylesheet.
pub fn render_base(mapping: &RuleMapping, options: &RenderOptions) -> String {
    let mut rules = Vec::new();

    if let Some(body) = mapping.flatten(ROOT_KEY) {
        rules.push(render_rule(ROOT_KEY, &body, options.placeholder, ""));
    }
    for key in ordered_keys(mapping, options.order) {
        let body = mapping.flatten(key).unwrap_or_default();
        rules.push(render_rule(key, &body, options.placeholder, ""));
    }

    collapse_semicolons(&rules.join("\n"))
}

/// Render one breakpoint's `@media` block.
///
/// With `stub` set every key gets an empty body; otherwise each key is
/// rendered with its flattened declarations.
pub fn render_media(
    breakpoint: Breakpoint,
    mapping: &RuleMapping,
    options: &RenderOptions,
    stub: bool,
) -> String {
    let rules: Vec<String> = ordered_keys(mapping, options.order)
        .into_iter()
        .filter(|key| !is_media_excluded(key))
        .map(|key| {
            if stub {
                render_rule(key, "", Placeholder::Empty, INDENT)
            } else {
                let body = mapping.flatten(key).unwrap_or_default();
                render_rule(key, &body, options.placeholder, INDENT)
            }
        })
        .collect();

    let mut out = format!("@media {} {{\n", breakpoint.expression());
    out.push_str(&rules.join("\n"));
    out.push_str("}\n");
    collapse_semicolons(&out)
}

/// True if every sub-selector of `key` targets `:root` or `html`, pseudo
/// suffixes included (`html:hover`). Such keys stay out of `@media` blocks.
fn is_media_excluded(key: &str) -> bool {
    key.split(',').map(str::trim).all(|part| {
        part.starts_with(ROOT_KEY) || part.split(':').next() == Some("html")
    })
}

/// Every key except `:root`, in output order.
pub fn ordered_keys(mapping: &RuleMapping, order: SortOrder) -> Vec<&str> {
    let mut keys: Vec<&str> = mapping.keys().filter(|key| *key != ROOT_KEY).collect();
    match order {
        SortOrder::Grouped => keys.sort_by(|a, b| compare_grouped(a, b)),
        SortOrder::Alphabetical => keys.sort_by(|a, b| {
            strip_prefix(a).cmp(strip_prefix(b)).then_with(|| a.cmp(b))
        }),
    }
    keys
}

fn compare_grouped(a: &str, b: &str) -> Ordering {
    group_rank(a)
        .cmp(&group_rank(b))
        .then_with(|| {
            strip_prefix(a)
                .to_lowercase()
                .cmp(&strip_prefix(b).to_lowercase())
        })
        .then_with(|| a.cmp(b))
}

/// Structural tags by position, then tags, classes, ids.
fn group_rank(key: &str) -> usize {
    if let Some(pos) = STRUCTURAL_TAGS.iter().position(|tag| *tag == key) {
        return pos;
    }
    STRUCTURAL_TAGS.len()
        + match SelectorKind::of_selector(key) {
            SelectorKind::Tag => 0,
            SelectorKind::Class => 1,
            SelectorKind::Id => 2,
        }
}

fn strip_prefix(key: &str) -> &str {
    key.trim_start_matches(['.', '#'])
}

fn render_rule(selector: &str, body: &str, placeholder: Placeholder, indent: &str) -> String {
    let mut out = format!("{indent}{selector} {{\n");
    if !body.is_empty() {
        out.push_str(&format!("{indent}{INDENT}{body};\n"));
    } else if placeholder == Placeholder::Comment {
        out.push_str(&format!("{indent}{INDENT}{PLACEHOLDER_COMMENT}\n"));
    }
    out.push_str(&format!("{indent}}}\n"));
    out
}

/// Collapse every run of two or more semicolons to one.
pub fn collapse_semicolons(css: &str) -> String {
    SEMICOLON_RUN.replace_all(css, ";").into_owned()
}
