//! Post-processing applied around the mdast renderer.
//!
//! - `highlight`: Prism-compatible syntax highlighting for fenced code.
//! - `links`: active-link marking and hash-history hrefs via lol_html.

/// Build-time syntax highlighting.
pub mod highlight;
/// Internal link rewriting.
pub mod links;
