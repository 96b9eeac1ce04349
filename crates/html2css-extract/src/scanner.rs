use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::selector::SelectorKind;
use crate::Extraction;

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\s*([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>").expect("open tag pattern")
});
static CLASS_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?i:class)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("class attribute pattern")
});
static ID_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?i:id)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("id attribute pattern")
});
static STYLE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s(?i:style)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("style attribute pattern")
});

/// Quoted attribute value, from whichever alternative matched.
fn attr_value<'h>(caps: &Captures<'h>) -> &'h str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

/// Tags that carry no visual styling of their own.
pub const NON_STYLABLE_TAGS: &[&str] = &["head", "title", "style", "div"];

/// Tags the legacy single-file generator left out of its output.
pub const LEGACY_EXCLUDED_TAGS: &[&str] = &["h6", "blockquote", "figure"];

/// Extraction policy.
///
/// Excluded tags are dropped from the tag set and their inline styles are
/// ignored. Classes and ids on excluded tags are still collected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub excluded_tags: BTreeSet<String>,
}

impl ExtractOptions {
    /// Keep every tag.
    pub fn all_tags() -> Self {
        Self::default()
    }

    /// Drop `head`, `title`, `style` and `div`.
    pub fn structural() -> Self {
        Self::excluding(NON_STYLABLE_TAGS.iter().copied())
    }

    /// Drop `h6`, `blockquote` and `figure`.
    pub fn legacy() -> Self {
        Self::excluding(LEGACY_EXCLUDED_TAGS.iter().copied())
    }

    pub fn excluding<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        options.exclude(tags);
        options
    }

    /// Add tags to the exclusion list. Names are compared lowercase.
    pub fn exclude<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded_tags
            .extend(tags.into_iter().map(|t| t.as_ref().trim().to_ascii_lowercase()));
    }

    pub fn is_excluded(&self, tag: &str) -> bool {
        self.excluded_tags.contains(tag)
    }
}

/// HTML selector scanner.
///
/// Matches opening-tag constructs (`<name ...>`) and reads the `class`,
/// `id` and `style` attributes found inside each one. Closing tags,
/// comments and doctypes never match the opening-tag pattern. Void and
/// self-closing elements are treated like any other opening tag.
pub struct Scanner<'a> {
    options: &'a ExtractOptions,
    extraction: Extraction,
}

impl<'a> Scanner<'a> {
    /// Create a scanner with an empty extraction.
    pub fn new(options: &'a ExtractOptions) -> Self {
        Self {
            options,
            extraction: Extraction::new(),
        }
    }

    /// Extract the selectors of a single document.
    pub fn extract(html: &str, options: &ExtractOptions) -> Extraction {
        let mut scanner = Scanner::new(options);
        scanner.scan(html);
        scanner.finish()
    }

    /// Extract the union of the selectors of several documents.
    ///
    /// Documents are scanned one at a time, so a tag left unterminated at
    /// the end of one document cannot swallow the start of the next, and
    /// the result does not depend on document order.
    pub fn extract_documents<I, S>(documents: I, options: &ExtractOptions) -> Extraction
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scanner = Scanner::new(options);
        for doc in documents {
            scanner.scan(doc.as_ref());
        }
        scanner.finish()
    }

    /// Scan one document, adding what it uses to the running extraction.
    pub fn scan(&mut self, html: &str) {
        for caps in OPEN_TAG.captures_iter(html) {
            let tag = caps[1].to_ascii_lowercase();
            let open_tag = &caps[0];
            self.scan_open_tag(tag, open_tag);
        }

        tracing::debug!(
            tags = self.extraction.selectors.tags.len(),
            classes = self.extraction.selectors.classes.len(),
            ids = self.extraction.selectors.ids.len(),
            "scanned document"
        );
    }

    pub fn finish(self) -> Extraction {
        self.extraction
    }

    fn scan_open_tag(&mut self, tag: String, open_tag: &str) {
        let selectors = &mut self.extraction.selectors;

        for caps in CLASS_ATTR.captures_iter(open_tag) {
            for class in attr_value(&caps).split_whitespace() {
                selectors.insert(SelectorKind::Class, class);
            }
        }

        // The whole value is the id: outer whitespace trimmed, inner kept.
        for caps in ID_ATTR.captures_iter(open_tag) {
            let id = attr_value(&caps).trim();
            if !id.is_empty() {
                selectors.insert(SelectorKind::Id, id);
            }
        }

        if self.options.is_excluded(&tag) {
            return;
        }

        for caps in STYLE_ATTR.captures_iter(open_tag) {
            let style = attr_value(&caps).trim();
            if !style.is_empty() {
                self.extraction
                    .inline_styles
                    .entry(tag.clone())
                    .or_default()
                    .insert(style.to_string());
            }
        }

        self.extraction.selectors.insert(SelectorKind::Tag, tag);
    }
}
