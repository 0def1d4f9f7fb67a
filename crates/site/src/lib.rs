#![deny(missing_docs)]
//! The mdxblog site: route table, embedded articles, history strategies,
//! router, and the root layout shell.

/// Single-file export for hash history.
pub mod bundle;
/// Components scoped to single articles.
pub mod components;
/// Site configuration.
pub mod config;
mod error;
/// Navigation history strategies.
pub mod history;
/// The index page.
pub mod home;
/// Route matching and page rendering.
pub mod router;
/// The route table.
pub mod routes;
/// Root layout and document wrapper.
pub mod shell;

pub use bundle::render_hash_bundle;
pub use config::{DEFAULT_CONFIG_FILE, HistoryMode, SiteConfig};
pub use error::SiteError;
pub use history::{HashHistory, History, MemoryHistory, create_history, location_from_url};
pub use router::{Page, Router};
pub use routes::{RouteDef, RouteTable, Stylesheet, View, site_routes};
pub use shell::PRISM_CSS;

/// Renders the page at `location` as a full HTML document.
///
/// With hash history `location` may be a URL or fragment (`#/blog/jeremy/`);
/// with memory history it is the path itself.
///
/// ```
/// use mdxblog_site::{SiteConfig, render_location};
///
/// let (page, html) = render_location("/blog/jeremy", &SiteConfig::default()).unwrap();
/// assert!(page.matched());
/// assert!(html.contains("<title>Jeremy | mdxblog</title>"));
/// ```
pub fn render_location(location: &str, config: &SiteConfig) -> Result<(Page, String), SiteError> {
    let history = create_history(config.history, &[location.to_string()]);
    let router = Router::new(
        site_routes()?,
        history,
        mdxblog_render::default_registry(),
        config.render_options(),
    );
    router.render_document(config)
}
