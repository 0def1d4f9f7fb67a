//! Single-file site for hash history.
//!
//! Every route is rendered once into a `<template data-route>`, stylesheets
//! are inlined, and a small script mounts the template matching
//! `location.hash` whenever the fragment changes. The file works from any
//! directory, including `file://`.

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::history::HashHistory;
use crate::router::{Page, Router};
use crate::routes::{RouteTable, site_routes};
use crate::shell::{PRISM_CSS, document_title, open_body, open_document, root_layout};
use mdxblog_render::{LinkStyle, default_registry, normalize_path, rewrite_links};
use std::fmt::Write;

/// Script that switches views on `hashchange`.
pub const HASH_ROUTER_JS: &str = include_str!("../assets/hash-router.js");

/// Id of the element the current view is mounted into.
pub const APP_ID: &str = "app";

/// Location rendered for the not-found view.
const NOT_FOUND_LOCATION: &str = "/404/";

/// One pre-rendered view of the bundle.
struct BundledView {
    page: Page,
    title: String,
    body: String,
}

fn render_view(
    routes: &'static RouteTable,
    location: &str,
    config: &SiteConfig,
) -> Result<BundledView, SiteError> {
    let router = Router::new(
        routes,
        Box::new(HashHistory::from_url(location)),
        default_registry(),
        config.render_options(),
    );
    let page = router.render()?;
    let body = rewrite_links(&root_layout(&page.outlet), &page.location, LinkStyle::Hash)
        .map_err(|err| SiteError::render(page.location.clone(), err))?;
    let title = document_title(page.document_title(), &config.title);
    Ok(BundledView { page, title, body })
}

/// Renders the whole site as one HTML document driven by the URL fragment.
///
/// The first route is also rendered straight into `#app`, so the index shows
/// before the script runs.
pub fn render_hash_bundle(config: &SiteConfig) -> Result<String, SiteError> {
    let routes = site_routes()?;
    let views = routes
        .iter()
        .map(|route| render_view(routes, route.path, config))
        .collect::<Result<Vec<_>, _>>()?;
    let not_found = render_view(routes, NOT_FOUND_LOCATION, config)?;

    let initial = views.first().unwrap_or(&not_found);
    let mut html = String::with_capacity(views.iter().map(|v| v.body.len()).sum::<usize>() * 2);
    open_document(&mut html, &initial.title, config);
    let _ = writeln!(html, "<style>\n{}</style>", PRISM_CSS.contents);
    for view in &views {
        let path = normalize_path(&view.page.location);
        for sheet in view.page.stylesheets() {
            let _ = writeln!(
                html,
                "<style data-route=\"{}\" media=\"not all\">\n{}</style>",
                html_escape::encode_double_quoted_attribute(&path),
                sheet.contents
            );
        }
    }
    open_body(&mut html, config);

    let _ = writeln!(html, "<div id=\"{APP_ID}\">{}</div>", initial.body);
    for view in &views {
        let _ = writeln!(
            html,
            "<template data-route=\"{}\" data-title=\"{}\">{}</template>",
            html_escape::encode_double_quoted_attribute(&normalize_path(&view.page.location)),
            html_escape::encode_double_quoted_attribute(&view.title),
            view.body
        );
    }
    let _ = writeln!(
        html,
        "<template data-not-found data-title=\"{}\">{}</template>",
        html_escape::encode_double_quoted_attribute(&not_found.title),
        not_found.body
    );
    let _ = writeln!(html, "<script>\n{HASH_ROUTER_JS}</script>");
    html.push_str("</body>\n</html>\n");

    log::debug!("bundled {} views ({} bytes)", views.len() + 1, html.len());
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::NOT_FOUND;

    fn bundle() -> String {
        render_hash_bundle(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn every_route_has_a_template() {
        let html = bundle();
        for path in site_routes().unwrap().paths() {
            assert!(html.contains(&format!("<template data-route=\"{path}\"")), "{path}");
        }
        assert_eq!(html.matches("<template data-route=").count(), site_routes().unwrap().len());
    }

    #[test]
    fn templates_carry_titles_and_fragment_links() {
        let html = bundle();
        assert!(html.contains("<template data-route=\"/blog/jeremy/\" data-title=\"Jeremy | mdxblog\">"));
        assert!(html.contains("<template data-route=\"/\" data-title=\"mdxblog\">"));
        assert!(html.contains("href=\"#/blog/jeremy/\""));
        assert!(!html.contains("href=\"/blog/jeremy/\""));
    }

    #[test]
    fn not_found_view_is_embedded() {
        let html = bundle();
        let start = html.find("<template data-not-found").unwrap();
        assert!(html[start..].contains(NOT_FOUND));
        assert!(html[start..].contains("data-title=\"Not Found | mdxblog\""));
    }

    #[test]
    fn index_is_mounted_before_the_script_runs() {
        let html = bundle();
        let app = html.find("<div id=\"app\">").unwrap();
        let first_template = html.find("<template").unwrap();
        assert!(app < first_template);
        assert!(html[app..first_template].contains("<h4>Jeremy</h4>"));
        assert!(html[app..first_template].contains("aria-current=\"page\""));
    }

    #[test]
    fn stylesheets_are_inlined_and_route_scoped() {
        let html = bundle();
        assert!(!html.contains("<link rel=\"stylesheet\""));
        assert!(html.contains("<style data-route=\"/blog/jeremy/\" media=\"not all\">"));
        assert!(html.contains("addEventListener(\"hashchange\""));
        assert!(html.trim_end().ends_with("</script>\n</body>\n</html>"));
    }
}
