//! Relevance test and pseudo-class discovery.
//!
//! A rule is relevant when one of its sub-selectors names, literally, a tag,
//! class or id used by the HTML. There are no specificity, combinator,
//! pseudo-class or attribute semantics: `nav a` matches nothing, and
//! `.card-title` does not match a class `card`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use html2css_extract::{SelectorKind, SelectorSet};
use regex::Regex;

use crate::ast::{Rule, Stylesheet};

static PSEUDO_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([.#]?[A-Za-z_][\w-]*):([A-Za-z_][\w-]*)").expect("pseudo-class pattern")
});

/// Literal match of one sub-selector against the extracted selectors.
pub fn is_selector_matching(selector: &str, selectors: &SelectorSet) -> bool {
    if let Some(class) = selector.strip_prefix('.') {
        selectors.contains(SelectorKind::Class, class)
    } else if let Some(id) = selector.strip_prefix('#') {
        selectors.contains(SelectorKind::Id, id)
    } else {
        selectors.contains(SelectorKind::Tag, selector)
    }
}

impl Rule {
    /// True if any sub-selector matches.
    pub fn is_relevant(&self, selectors: &SelectorSet) -> bool {
        self.sub_selectors()
            .any(|sub| is_selector_matching(sub, selectors))
    }
}

/// Keep the rules relevant to `selectors`, in source order.
pub fn relevant_rules<'a, I>(rules: I, selectors: &'a SelectorSet) -> impl Iterator<Item = &'a Rule>
where
    I: IntoIterator<Item = &'a Rule>,
    I::IntoIter: 'a,
{
    rules
        .into_iter()
        .filter(move |rule| rule.is_relevant(selectors))
}

/// A `base:pseudo` pair such as `a:hover` or `.btn:focus`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PseudoClass {
    pub base: String,
    pub pseudo: String,
}

impl PseudoClass {
    /// The rendered selector, `base:pseudo`.
    pub fn selector(&self) -> String {
        format!("{}:{}", self.base, self.pseudo)
    }
}

/// Every distinct `base:pseudo` token in the sheet's selectors.
///
/// Only selector text is scanned, so declarations such as `color:red` are
/// never mistaken for pseudo-classes. Pseudo-elements (`::before`) and
/// functional arguments are not recognised.
pub fn pseudo_classes(sheet: &Stylesheet) -> Vec<PseudoClass> {
    let found: BTreeSet<PseudoClass> = sheet
        .selectors()
        .flat_map(|selector| PSEUDO_CLASS.captures_iter(selector))
        .map(|caps| PseudoClass {
            base: caps[1].to_string(),
            pseudo: caps[2].to_string(),
        })
        .collect();
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn selectors() -> SelectorSet {
        let mut set = SelectorSet::new();
        set.insert(SelectorKind::Tag, "p");
        set.insert(SelectorKind::Tag, "a");
        set.insert(SelectorKind::Class, "card");
        set.insert(SelectorKind::Id, "main");
        set
    }

    // =========================================================================
    // Literal matching
    // =========================================================================

    #[test]
    fn test_match_each_kind() {
        let set = selectors();
        assert!(is_selector_matching("p", &set));
        assert!(is_selector_matching(".card", &set));
        assert!(is_selector_matching("#main", &set));
    }

    #[test]
    fn test_kinds_not_crossed() {
        let set = selectors();
        assert!(!is_selector_matching("card", &set));
        assert!(!is_selector_matching(".main", &set));
        assert!(!is_selector_matching("#p", &set));
    }

    #[test]
    fn test_exact_not_substring() {
        let set = selectors();
        assert!(!is_selector_matching(".card-title", &set));

        let mut titles = SelectorSet::new();
        titles.insert(SelectorKind::Class, "card-title");
        assert!(!is_selector_matching(".card", &titles));
    }

    #[test]
    fn test_compound_selectors_are_opaque() {
        let set = selectors();
        assert!(!is_selector_matching("p a", &set));
        assert!(!is_selector_matching("a:hover", &set));
        assert!(!is_selector_matching("p.card", &set));
    }

    // =========================================================================
    // Rule relevance
    // =========================================================================

    #[test]
    fn test_rule_relevant_if_any_part_matches() {
        let set = selectors();
        assert!(Rule::new(".unused, .card", "x: 1").is_relevant(&set));
        assert!(!Rule::new(".unused, nav a", "x: 1").is_relevant(&set));
    }

    #[test]
    fn test_relevant_rules_in_source_order() {
        let sheet = parse("#main { a: 1 } .unused { b: 2 } p { c: 3 } :root { --d: 4 }");
        let set = selectors();
        let kept: Vec<_> = relevant_rules(&sheet.rules, &set)
            .map(|r| r.selector.as_str())
            .collect();
        assert_eq!(kept, vec!["#main", "p"]);
    }

    // =========================================================================
    // Pseudo-classes
    // =========================================================================

    #[test]
    fn test_pseudo_classes_found_in_selectors() {
        let sheet = parse("a:hover { x: 1 } .card:focus, #main:target { y: 2 }");
        let found: Vec<_> = pseudo_classes(&sheet).iter().map(PseudoClass::selector).collect();
        assert_eq!(found, vec!["#main:target", ".card:focus", "a:hover"]);
    }

    #[test]
    fn test_pseudo_classes_ignore_declarations() {
        let sheet = parse("p { color:red; font:inherit }");
        assert!(pseudo_classes(&sheet).is_empty());
    }

    #[test]
    fn test_pseudo_elements_and_root_skipped() {
        let sheet = parse("p::before { content: '' } :root { --x: 1 }");
        assert!(pseudo_classes(&sheet).is_empty());
    }

    #[test]
    fn test_pseudo_classes_in_media_and_deduplicated() {
        let sheet = parse("a:hover { x: 1 } @media print { a:hover { x: 2 } li:first-child { y: 3 } }");
        let found: Vec<_> = pseudo_classes(&sheet).iter().map(PseudoClass::selector).collect();
        assert_eq!(found, vec!["a:hover", "li:first-child"]);
    }
}
