//! Rewrites internal links in rendered HTML: active-link marking and hash hrefs.

use lol_html::{RewriteStrSettings, element, rewrite_str};
use mdxblog_core::MdxError;

/// How internal link targets are written into `href` attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    /// Plain paths (`/blog/jeremy/`).
    #[default]
    Path,
    /// Fragment paths (`#/blog/jeremy/`).
    Hash,
}

impl LinkStyle {
    /// Formats an internal path for this style. External targets pass through.
    ///
    /// ```
    /// use mdxblog_render::transform::links::LinkStyle;
    ///
    /// assert_eq!(LinkStyle::Hash.href("/blog/jeremy/"), "#/blog/jeremy/");
    /// assert_eq!(LinkStyle::Path.href("/blog/jeremy/"), "/blog/jeremy/");
    /// assert_eq!(LinkStyle::Hash.href("https://example.com"), "https://example.com");
    /// ```
    pub fn href(self, target: &str) -> String {
        match self {
            LinkStyle::Hash if is_internal(target) => format!("#{target}"),
            _ => target.to_string(),
        }
    }
}

/// True for root-relative paths (`/x`), false for protocol-relative (`//x`) and everything else.
pub fn is_internal(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

/// Canonical form of a location path: query and fragment dropped, trailing slash added.
///
/// ```
/// use mdxblog_render::transform::links::normalize_path;
///
/// assert_eq!(normalize_path("/blog/jeremy?x=1#top"), "/blog/jeremy/");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut out = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        out.push('/');
    }
    out.push_str(path);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

/// Rewrites every internal `<a href>` in `html`.
///
/// Links pointing at `current` (after normalization) get `class="active"`,
/// `aria-current="page"` and `data-status="active"`. With [`LinkStyle::Hash`]
/// internal hrefs are turned into fragment links.
pub fn rewrite_links(html: &str, current: &str, style: LinkStyle) -> Result<String, MdxError> {
    let current = normalize_path(current);
    let settings = RewriteStrSettings {
        element_content_handlers: vec![element!("a[href]", |el| {
            let Some(href) = el.get_attribute("href") else {
                return Ok(());
            };
            if !is_internal(&href) {
                return Ok(());
            }
            if normalize_path(&href) == current {
                let class = match el.get_attribute("class") {
                    Some(existing) if !existing.split_whitespace().any(|c| c == "active") => {
                        format!("{existing} active")
                    }
                    Some(existing) => existing,
                    None => "active".to_string(),
                };
                el.set_attribute("class", &class)?;
                el.set_attribute("aria-current", "page")?;
                el.set_attribute("data-status", "active")?;
            }
            if style == LinkStyle::Hash {
                el.set_attribute("href", &style.href(&href))?;
            }
            Ok(())
        })],
        ..RewriteStrSettings::new()
    };
    rewrite_str(html, settings).map_err(|err| MdxError::render_error(err.to_string(), 1, 1))
}
