//! Rule merger.
//!
//! Owns the mapping from selector to declaration fragments for one run.
//! Fragments are kept in a sorted set, so a repeated fragment collapses and
//! the joined body is the same whatever order fragments arrived in.

use std::collections::{BTreeMap, BTreeSet};

use html2css_extract::{Extraction, SelectorKind};
use html2css_stylesheet::{pseudo_classes, relevant_rules, Rule, Stylesheet};

pub const ROOT_KEY: &str = ":root";

/// Selector → declaration fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMapping {
    rules: BTreeMap<String, BTreeSet<String>>,
}

impl RuleMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the base mapping for a run.
    ///
    /// 1. every tag, class and id is seeded with an empty fragment
    /// 2. inline styles are added under their tag
    /// 3. `:root` bodies and the relevant external rules are added
    /// 4. pseudo-classes whose base is already a key inherit its fragments
    ///
    /// External selectors never seen in the HTML are not added.
    pub fn build(extraction: &Extraction, sheet: &Stylesheet) -> Self {
        let mut mapping = RuleMapping::new();

        for kind in [SelectorKind::Tag, SelectorKind::Class, SelectorKind::Id] {
            for name in extraction.selectors.names(kind) {
                mapping.seed(kind.render(name));
            }
        }

        for (tag, styles) in &extraction.inline_styles {
            for style in styles {
                mapping.add(tag, style);
            }
        }

        for body in &sheet.root {
            mapping.add(ROOT_KEY, body);
        }
        mapping.add_relevant(&sheet.rules, extraction);

        for pseudo in pseudo_classes(sheet) {
            mapping.inherit(&pseudo.base, pseudo.selector());
        }

        tracing::debug!(keys = mapping.len(), "built rule mapping");
        mapping
    }

    /// Build a mapping from the relevant rules alone, without seeding.
    pub fn from_rules<'a, I>(rules: I, extraction: &Extraction) -> Self
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        let mut mapping = RuleMapping::new();
        mapping.add_relevant(rules, extraction);
        mapping
    }

    fn add_relevant<'a, I>(&mut self, rules: I, extraction: &Extraction)
    where
        I: IntoIterator<Item = &'a Rule>,
    {
        let rules: Vec<&Rule> = rules.into_iter().collect();
        let mut matched = 0usize;
        for rule in relevant_rules(rules, &extraction.selectors) {
            self.add(&rule.selector, &rule.body);
            matched += 1;
        }
        tracing::debug!(matched, "merged external rules");
    }

    /// Register a selector with an empty fragment.
    pub fn seed(&mut self, key: impl Into<String>) {
        self.rules.entry(key.into()).or_default().insert(String::new());
    }

    /// Add a fragment under `key`, creating the key if needed.
    pub fn add(&mut self, key: &str, fragment: &str) {
        self.rules
            .entry(key.to_string())
            .or_default()
            .insert(fragment.trim().to_string());
    }

    /// Copy the fragments of `base` under `derived`.
    ///
    /// Returns false, adding nothing, if `base` is not a key.
    pub fn inherit(&mut self, base: &str, derived: impl Into<String>) -> bool {
        let Some(fragments) = self.rules.get(base).cloned() else {
            return false;
        };
        self.rules.entry(derived.into()).or_default().extend(fragments);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rules.contains_key(key)
    }

    pub fn fragments(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.rules.get(key)
    }

    /// Join the non-empty fragments of `key` with `"; "`.
    ///
    /// `None` if the key is unknown; an empty string if it has only the seed.
    pub fn flatten(&self, key: &str) -> Option<String> {
        let fragments = self.rules.get(key)?;
        Some(
            fragments
                .iter()
                .filter(|f| !f.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
