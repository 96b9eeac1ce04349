//! Rule alphabetizer for existing stylesheets.

use crate::parser::RULE;

/// Reorder the rules of a stylesheet alphabetically by selector text.
///
/// Each rule is emitted on its own line as `selector {body}`, with the body
/// kept verbatim. Text outside recognisable rules is dropped.
pub fn alphabetize(css: &str) -> String {
    let mut rules: Vec<(&str, &str)> = RULE
        .captures_iter(css)
        .filter_map(|caps| {
            let selector = caps.get(1)?.as_str().trim();
            let body = caps.get(2)?.as_str();
            Some((selector, body))
        })
        .collect();

    rules.sort_by(|a, b| a.0.cmp(b.0));

    rules
        .iter()
        .map(|(selector, body)| format!("{selector} {{{body}}}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        assert_eq!(alphabetize(""), "");
    }

    #[test]
    fn test_sorted_by_selector() {
        let css = "p { margin: 0; }\n.card { color: blue; }\nbody {padding: 0}\n";
        assert_eq!(
            alphabetize(css),
            ".card { color: blue; }\nbody {padding: 0}\np { margin: 0; }"
        );
    }

    #[test]
    fn test_equal_selectors_keep_source_order() {
        let css = "a { x: 2 } a { x: 1 }";
        assert_eq!(alphabetize(css), "a { x: 2 }\na { x: 1 }");
    }

    #[test]
    fn test_body_kept_verbatim() {
        let css = "h1 {\n  font-size: 2em;\n}";
        assert_eq!(alphabetize(css), "h1 {\n  font-size: 2em;\n}");
    }
}
