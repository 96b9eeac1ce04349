//! html2css Extractor
//!
//! Recovers the selectors used by one or more HTML documents: tag names,
//! class tokens and id values, plus the inline `style` attributes keyed by
//! their owning tag. Also discovers `<link rel="stylesheet">` targets.
//!
//! Extraction is pattern matching over raw text, not an HTML parser.
//! Malformed or unterminated markup is skipped silently.
//!
//! # Example
//!
//! ```
//! use html2css_extract::{ExtractOptions, Scanner};
//!
//! let extraction = Scanner::extract(r#"<p class="lead">Hi</p>"#, &ExtractOptions::default());
//! assert!(extraction.selectors.tags.contains("p"));
//! assert!(extraction.selectors.classes.contains("lead"));
//! ```

pub mod links;
pub mod scanner;
pub mod selector;

pub use links::stylesheet_links;
pub use scanner::{ExtractOptions, Scanner};
pub use selector::{SelectorKind, SelectorSet};

use std::collections::{BTreeMap, BTreeSet};

/// Everything recovered from a batch of HTML documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub selectors: SelectorSet,
    /// Raw `style="..."` values, keyed by the tag name carrying them.
    pub inline_styles: BTreeMap<String, BTreeSet<String>>,
}

impl Extraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union another extraction into this one.
    pub fn merge(&mut self, other: Extraction) {
        self.selectors.union(other.selectors);
        for (tag, styles) in other.inline_styles {
            self.inline_styles.entry(tag).or_default().extend(styles);
        }
    }
}
