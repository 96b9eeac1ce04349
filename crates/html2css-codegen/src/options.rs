//! Render configuration.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::breakpoint::Breakpoint;

/// Rejected value for one of the configuration enums.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

/// Body written for a selector that has no declarations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placeholder {
    /// `/* Add your styles here */`
    #[default]
    Comment,
    /// Nothing between the braces.
    Empty,
}

/// Order of the non-`:root` rules in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// `html`, `body`, `header`, `footer` first, then other tags, then
    /// classes, then ids, each group alphabetical ignoring case.
    #[default]
    Grouped,
    /// One alphabetical list, compared without the leading `.` or `#`.
    Alphabetical,
}

/// What goes inside each breakpoint's `@media` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaPolicy {
    /// Filtered when an external stylesheet is available, otherwise stub.
    #[default]
    Auto,
    /// Only the external rules inside a matching `@media` block that are
    /// relevant to the HTML.
    Filtered,
    /// Every known selector with an empty body.
    Stub,
}

impl MediaPolicy {
    /// Settle `Auto` given whether external CSS is available.
    pub fn resolve(self, has_external: bool) -> MediaPolicy {
        match self {
            MediaPolicy::Auto if has_external => MediaPolicy::Filtered,
            MediaPolicy::Auto => MediaPolicy::Stub,
            other => other,
        }
    }
}

/// Options for turning a rule mapping into CSS text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub placeholder: Placeholder,
    pub order: SortOrder,
    pub media_policy: MediaPolicy,
    /// Breakpoints to emit `@media` blocks for, rendered mobile → tablet → tv.
    pub breakpoints: BTreeSet<Breakpoint>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_breakpoints<I>(mut self, breakpoints: I) -> Self
    where
        I: IntoIterator<Item = Breakpoint>,
    {
        self.breakpoints.extend(breakpoints);
        self
    }
}

impl FromStr for Placeholder {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comment" => Ok(Placeholder::Comment),
            "empty" => Ok(Placeholder::Empty),
            _ => Err(ParseOptionError {
                kind: "placeholder",
                value: s.to_string(),
                expected: "comment, empty",
            }),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grouped" => Ok(SortOrder::Grouped),
            "alphabetical" | "alpha" => Ok(SortOrder::Alphabetical),
            _ => Err(ParseOptionError {
                kind: "order",
                value: s.to_string(),
                expected: "grouped, alphabetical",
            }),
        }
    }
}

impl FromStr for MediaPolicy {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(MediaPolicy::Auto),
            "filtered" => Ok(MediaPolicy::Filtered),
            "stub" => Ok(MediaPolicy::Stub),
            _ => Err(ParseOptionError {
                kind: "media policy",
                value: s.to_string(),
                expected: "auto, filtered, stub",
            }),
        }
    }
}

impl fmt::Display for MediaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MediaPolicy::Auto => "auto",
            MediaPolicy::Filtered => "filtered",
            MediaPolicy::Stub => "stub",
        })
    }
}
