//! Root layout and the HTML document around it.

use crate::config::SiteConfig;
use crate::routes::Stylesheet;
use mdxblog_render::{LinkStyle, rewrite_links};
use mdxblog_core::MdxError;
use std::fmt::Write;

/// Outlet content when no route matches.
pub const NOT_FOUND: &str = "<p>Not Found</p>";

/// Where the shared Prism theme is served from.
pub const PRISM_CSS: Stylesheet = Stylesheet {
    href: "/prism.css",
    contents: include_str!("../assets/prism.css"),
};

/// Utility CSS runtime loaded when `tailwindCdn` is on.
pub const TAILWIND_CDN: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4";

/// Renders the root layout: navigation strip, rule, and the outlet.
///
/// The layout is the same for every route; only `outlet` changes.
pub fn root_layout(outlet: &str) -> String {
    format!(
        "<div class=\"flex flex-col h-full w-full\">\
         <div class=\"flex flex-row justify-center p2\"><div class=\"w-250 flex gap-2\">\
         <a href=\"/\" class=\"[&amp;.active]:font-bold\">Home</a>\
         </div></div>\
         <hr />\
         <div class=\"flex flex-col items-center grow\">\
         <div class=\"flex flex-col my-5 p-5 w-250 bg-[#00000050] grow rounded-xl\" data-outlet>{outlet}</div>\
         </div>\
         </div>"
    )
}

/// Everything the document wrapper needs to know about a page.
#[derive(Debug, Clone)]
pub struct DocumentParts<'a> {
    /// Location the page was rendered for; links to it are marked active.
    pub location: &'a str,
    /// Page title, or `None` for the site index.
    pub title: Option<&'a str>,
    /// Outlet HTML.
    pub outlet: &'a str,
    /// Route stylesheets, linked after the Prism theme.
    pub stylesheets: &'a [Stylesheet],
}

/// `<title>` text: `page | site`, or the site title alone.
pub fn document_title(page_title: Option<&str>, site_title: &str) -> String {
    match page_title {
        Some(title) if !title.is_empty() => format!("{title} | {site_title}"),
        _ => site_title.to_string(),
    }
}

/// Writes the doctype, `<html>` and the head up to and including `<title>`.
pub(crate) fn open_document(html: &mut String, title: &str, config: &SiteConfig) {
    html.push_str("<!doctype html>\n");
    let _ = writeln!(
        html,
        "<html lang=\"{}\">",
        html_escape::encode_double_quoted_attribute(&config.lang)
    );
    html.push_str("<head>\n<meta charset=\"utf-8\" />\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    let _ = writeln!(html, "<title>{}</title>", html_escape::encode_text(title));
}

/// Writes the CDN script (when enabled), closes the head and opens the body.
pub(crate) fn open_body(html: &mut String, config: &SiteConfig) {
    if config.tailwind_cdn {
        let _ = writeln!(html, "<script src=\"{TAILWIND_CDN}\"></script>");
    }
    html.push_str("</head>\n<body class=\"dark\">\n");
}

/// Renders a full HTML document around the root layout and rewrites its
/// internal links for `style`.
pub fn render_document(
    parts: &DocumentParts<'_>,
    config: &SiteConfig,
    style: LinkStyle,
) -> Result<String, MdxError> {
    let mut html = String::with_capacity(parts.outlet.len() + 1024);
    open_document(&mut html, &document_title(parts.title, &config.title), config);
    for sheet in std::iter::once(&PRISM_CSS).chain(parts.stylesheets) {
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\" />", sheet.href);
    }
    open_body(&mut html, config);
    html.push_str(&root_layout(parts.outlet));
    html.push_str("\n</body>\n</html>\n");

    rewrite_links(&html, parts.location, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts<'a>(location: &'a str, outlet: &'a str) -> DocumentParts<'a> {
        DocumentParts {
            location,
            title: None,
            outlet,
            stylesheets: &[],
        }
    }

    #[test]
    fn layout_keeps_navigation_around_any_outlet() {
        for outlet in ["", NOT_FOUND, "<h1>Jeremy</h1>"] {
            let html = root_layout(outlet);
            assert!(html.contains(">Home</a>"));
            assert!(html.contains("<hr />"));
            assert!(html.contains(&format!("data-outlet>{outlet}</div>")));
        }
    }

    #[test]
    fn titles() {
        assert_eq!(document_title(None, "Blog"), "Blog");
        assert_eq!(document_title(Some("Jeremy"), "Blog"), "Jeremy | Blog");
    }

    #[test]
    fn document_head_and_body() {
        let config = SiteConfig::default();
        let html = render_document(&parts("/", "<p>x</p>"), &config, LinkStyle::Path).unwrap();
        assert!(html.starts_with("<!doctype html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>mdxblog</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/prism.css\" />"));
        assert!(html.contains(TAILWIND_CDN));
        assert!(html.contains("<body class=\"dark\">"));
    }

    #[test]
    fn home_link_is_active_on_home_only() {
        let config = SiteConfig {
            tailwind_cdn: false,
            ..SiteConfig::default()
        };
        let home = render_document(&parts("/", ""), &config, LinkStyle::Path).unwrap();
        assert!(home.contains("aria-current=\"page\""));
        assert!(!home.contains("<script"));

        let other = render_document(&parts("/blog/jeremy/", ""), &config, LinkStyle::Path).unwrap();
        assert!(!other.contains("aria-current"));
    }

    #[test]
    fn hash_style_rewrites_the_nav_link() {
        let html = render_document(&parts("/x/", ""), &SiteConfig::default(), LinkStyle::Hash)
            .unwrap();
        assert!(html.contains("<a href=\"#/\""), "{html}");
    }
}
