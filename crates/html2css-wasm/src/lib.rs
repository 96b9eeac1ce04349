//! WASM bindings for html2css.
//!
//! Exposes `generate()` to JavaScript via wasm-bindgen.
//! Returns a JS object `{ base, media: [{ breakpoint, css }] }` or throws on error.

use html2css_codegen::{Breakpoint, CompilerOutput, RenderOptions};
use html2css_extract::{ExtractOptions, Scanner};
use wasm_bindgen::prelude::*;

/// Generate a scaffold stylesheet from HTML.
///
/// `external_css` may be empty. `breakpoints` is a comma-separated list of
/// `mobile`, `tablet`, `tv`. Throws a JS error on an unknown breakpoint.
#[wasm_bindgen]
pub fn generate(html: &str, external_css: &str, breakpoints: &str) -> Result<JsValue, JsError> {
    let output = native_generate(html, external_css, breakpoints)
        .map_err(|e| JsError::new(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&output).map_err(|e| JsError::new(&e.to_string()))
}

/// Get the generator version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Names accepted in the `breakpoints` argument of `generate()`.
#[wasm_bindgen]
pub fn breakpoints() -> js_sys::Array {
    Breakpoint::ALL
        .iter()
        .map(|bp| JsValue::from_str(bp.name()))
        .collect()
}

fn native_generate(
    html: &str,
    external_css: &str,
    breakpoints: &str,
) -> Result<CompilerOutput, html2css_codegen::ParseOptionError> {
    let breakpoints = breakpoints
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse::<Breakpoint>)
        .collect::<Result<Vec<_>, _>>()?;

    let extraction = Scanner::extract(html, &ExtractOptions::default());
    let options = RenderOptions::new().with_breakpoints(breakpoints);
    Ok(html2css_codegen::compile(&extraction, external_css, &options))
}
