use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::options::ParseOptionError;

/// A responsive breakpoint and its media-feature expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Tv,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 3] = [Breakpoint::Mobile, Breakpoint::Tablet, Breakpoint::Tv];

    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "mobile",
            Breakpoint::Tablet => "tablet",
            Breakpoint::Tv => "tv",
        }
    }

    /// The expression written after `@media`.
    pub fn expression(self) -> &'static str {
        match self {
            Breakpoint::Mobile => "(max-width: 480px)",
            Breakpoint::Tablet => "(min-width: 481px) and (max-width: 767px)",
            Breakpoint::Tv => "(min-width: 1201px)",
        }
    }

    /// Features a media query must mention, whitespace-free and lowercase.
    fn features(self) -> &'static [&'static str] {
        match self {
            Breakpoint::Mobile => &["max-width:480px"],
            Breakpoint::Tablet => &["min-width:481px", "max-width:767px"],
            Breakpoint::Tv => &["min-width:1201px"],
        }
    }

    /// True if an external `@media` query falls within this breakpoint.
    ///
    /// Whitespace and case are ignored, and other terms in the query
    /// (`screen and`, `only`) do not matter.
    pub fn matches_query(self, query: &str) -> bool {
        let query: String = query
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        self.features().iter().all(|feature| query.contains(feature))
    }

    /// Suffix for the per-breakpoint output file, e.g. `_mobile`.
    pub fn file_suffix(self) -> String {
        format!("_{}", self.name())
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Breakpoint {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Breakpoint::Mobile),
            "tablet" => Ok(Breakpoint::Tablet),
            "tv" => Ok(Breakpoint::Tv),
            _ => Err(ParseOptionError {
                kind: "breakpoint",
                value: s.to_string(),
                expected: "mobile, tablet, tv",
            }),
        }
    }
}
