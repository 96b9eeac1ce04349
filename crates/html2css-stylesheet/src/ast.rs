//! Stylesheet model.
//!
//! The result of splitting external CSS text. Selectors are kept as opaque
//! strings; only the comma-separated list structure is recognised.

/// An external stylesheet, split into the parts html2css cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Bodies of the top-level `:root { ... }` blocks, in source order.
    pub root: Vec<String>,
    /// Top-level rules, excluding `:root` blocks and `@media` contents.
    pub rules: Vec<Rule>,
    pub media: Vec<MediaBlock>,
}

impl Stylesheet {
    pub fn parse(css: &str) -> Self {
        crate::parser::parse(css)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty() && self.rules.is_empty() && self.media.is_empty()
    }

    /// Rules of every `@media` block whose query satisfies `in_scope`.
    pub fn media_rules<'a, F>(&'a self, in_scope: F) -> impl Iterator<Item = &'a Rule> + 'a
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.media
            .iter()
            .filter(move |block| in_scope(&block.query))
            .flat_map(|block| block.rules.iter())
    }

    /// Every rule selector in the sheet, top-level first, then media-scoped.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .chain(self.media.iter().flat_map(|block| block.rules.iter()))
            .map(|rule| rule.selector.as_str())
    }
}

/// A `selector { body }` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Selector list with whitespace normalized (`a, .b > c`).
    pub selector: String,
    /// Declarations between the braces, trimmed.
    pub body: String,
}

impl Rule {
    pub fn new(selector: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            body: body.into(),
        }
    }

    /// The comma-separated parts of the selector list.
    ///
    /// Descendant and combinator selectors come back whole (`nav a`).
    pub fn sub_selectors(&self) -> impl Iterator<Item = &str> {
        self.selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// An `@media <query> { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBlock {
    /// The prelude between `@media` and `{`, whitespace collapsed.
    pub query: String,
    pub rules: Vec<Rule>,
}
