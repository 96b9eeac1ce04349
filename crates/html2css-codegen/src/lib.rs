//! html2css Code Generator
//!
//! Merges the selectors extracted from HTML with an external stylesheet and
//! renders the result: one base stylesheet plus one `@media` block per
//! requested breakpoint.
//!
//! ```text
//! Extraction + CSS text → compile() → CompilerOutput { base, media }
//! ```
//!
//! Media blocks follow one of two policies. *Filtered* re-runs the relevance
//! test over the external rules inside `@media` blocks matching the
//! breakpoint. *Stub* lists every known selector with an empty body. The
//! default picks filtered when external CSS is available and stub otherwise.

pub mod breakpoint;
pub mod css;
pub mod merge;
pub mod options;

pub use breakpoint::Breakpoint;
pub use merge::RuleMapping;
pub use options::{MediaPolicy, ParseOptionError, Placeholder, RenderOptions, SortOrder};

use html2css_extract::Extraction;
use html2css_stylesheet::Stylesheet;
use serde::Serialize;

/// The generated stylesheets for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilerOutput {
    pub base: String,
    /// One entry per requested breakpoint, mobile → tablet → tv.
    pub media: Vec<MediaOutput>,
}

/// A breakpoint's `@media` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaOutput {
    pub breakpoint: Breakpoint,
    pub css: String,
}

impl CompilerOutput {
    pub fn media_for(&self, breakpoint: Breakpoint) -> Option<&str> {
        self.media
            .iter()
            .find(|m| m.breakpoint == breakpoint)
            .map(|m| m.css.as_str())
    }
}

/// Generate the stylesheets for an extraction and external CSS text.
///
/// Pass an empty string when there is no external stylesheet.
pub fn compile(extraction: &Extraction, external_css: &str, options: &RenderOptions) -> CompilerOutput {
    let sheet = Stylesheet::parse(external_css);
    let mapping = RuleMapping::build(extraction, &sheet);
    let base = css::render_base(&mapping, options);

    let policy = options.media_policy.resolve(!sheet.is_empty());
    let media = options
        .breakpoints
        .iter()
        .map(|&breakpoint| {
            let css = match policy {
                MediaPolicy::Stub => css::render_media(breakpoint, &mapping, options, true),
                _ => {
                    let scoped = RuleMapping::from_rules(
                        sheet.media_rules(move |query| breakpoint.matches_query(query)),
                        extraction,
                    );
                    css::render_media(breakpoint, &scoped, options, false)
                }
            };
            tracing::debug!(%breakpoint, %policy, "rendered media block");
            MediaOutput { breakpoint, css }
        })
        .collect();

    CompilerOutput { base, media }
}
