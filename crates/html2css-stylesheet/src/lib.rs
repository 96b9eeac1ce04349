//! html2css Stylesheet
//!
//! Splits externally sourced CSS text into `:root` declarations, top-level
//! rules and `@media` blocks, and decides which rules are relevant to the
//! selectors recovered from the HTML.
//!
//! Like the extractor, this is pattern matching over raw text rather than a
//! CSS parser: rules are `selector { body }` pairs without nested braces.
//!
//! ```text
//! CSS text → parse() → Stylesheet { root, rules, media }
//!          → relevant_rules(&SelectorSet) → kept rules
//! ```

pub mod ast;
pub mod matcher;
pub mod parser;
pub mod sort;

pub use ast::{MediaBlock, Rule, Stylesheet};
pub use matcher::{is_selector_matching, pseudo_classes, relevant_rules, PseudoClass};
pub use parser::parse;
pub use sort::alphabetize;
