use js_sys::Array;
use mdxblog_render::{HeadingEntry, RenderOptions, default_registry, render_mdx};
use mdxblog_site::{HistoryMode, SiteConfig, render_location, site_routes};
use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

// ============================================================================
// Config
// ============================================================================

/// Reads a `SiteConfig` from a JS object (camelCase keys, all optional).
fn parse_config(config: JsValue) -> Result<SiteConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(SiteConfig::default());
    }
    serde_wasm_bindgen::from_value(config).map_err(|e| JsError::new(&format!("Invalid config: {e}")))
}

// ============================================================================
// Page API
// ============================================================================

/// A rendered page as seen from JavaScript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// Full HTML document.
    pub html: String,
    /// Location that was rendered.
    pub location: String,
    /// Whether a route matched.
    pub matched: bool,
    /// Page title.
    pub title: Option<String>,
    /// Headings of the rendered article.
    pub headings: Vec<HeadingEntry>,
}

/// Renders the page for a location into a full HTML document.
///
/// # Arguments
///
/// * `location` - A path (`/blog/jeremy/`), or with hash history a URL or
///   fragment (`#/blog/jeremy/`)
/// * `config` - Optional site config object (`{ history: "hash", title: "..." }`)
///
/// # Example (JavaScript)
///
/// ```javascript
/// import { renderLocation } from './mdxblog_wasm';
///
/// const page = renderLocation(window.location.hash, { history: "hash" });
/// document.open();
/// document.write(page.html);
/// document.close();
/// ```
#[wasm_bindgen(js_name = renderLocation)]
pub fn render_location_js(location: &str, config: JsValue) -> Result<JsValue, JsError> {
    let config = parse_config(config)?;
    let (page, html) = render_location(location, &config).map_err(|e| JsError::new(&e.to_string()))?;

    let result = PageResult {
        html,
        matched: page.matched(),
        location: page.location,
        title: page.title,
        headings: page.headings,
    };
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

/// Returns the site's route paths, in navigation order.
#[wasm_bindgen(js_name = routePaths)]
pub fn route_paths() -> Result<Array, JsError> {
    let routes = site_routes().map_err(|e| JsError::new(&e.to_string()))?;
    Ok(routes.paths().into_iter().map(JsValue::from_str).collect())
}

/// Formats a link target for a history mode (`"memory"` or `"hash"`).
#[wasm_bindgen(js_name = resolveHref)]
pub fn resolve_href(path: &str, history: &str) -> Result<String, JsError> {
    let mode: HistoryMode = history.parse().map_err(|e: String| JsError::new(&e))?;
    Ok(mode.link_style().href(path))
}

// ============================================================================
// MDX API
// ============================================================================

/// Renders a standalone MDX document with the site's layout components.
///
/// Returns `{ html, headings }`. Unknown components are reported as errors
/// carrying their line and column.
#[wasm_bindgen(js_name = renderMdx)]
pub fn render_mdx_js(source: &str, opts: JsValue) -> Result<JsValue, JsError> {
    let options: RenderOptions = if opts.is_undefined() || opts.is_null() {
        RenderOptions::default()
    } else {
        serde_wasm_bindgen::from_value(opts)
            .map_err(|e| JsError::new(&format!("Invalid options: {e}")))?
    };

    let doc = render_mdx(source, &default_registry(), &options)
        .map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&doc)
        .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}
