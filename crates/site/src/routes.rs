//! The route table: which view renders at which path.

use crate::SiteError;
use crate::components::cool_things_components;
use mdxblog_render::{ComponentRegistry, normalize_path};
use once_cell::sync::OnceCell;

/// A stylesheet shipped with a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stylesheet {
    /// Absolute URL path the stylesheet is served from.
    pub href: &'static str,
    /// Stylesheet contents.
    pub contents: &'static str,
}

/// An MDX document embedded in the binary.
#[derive(Debug, Clone, Copy)]
pub struct MdxPage {
    /// File name, used in error locations.
    pub file: &'static str,
    /// MDX source.
    pub source: &'static str,
    /// Components the document imports itself, layered over the site registry.
    pub scoped: Option<fn() -> ComponentRegistry>,
    /// Class of a `<div>` wrapped around the rendered document.
    pub wrapper_class: Option<&'static str>,
    /// Stylesheets the page links to.
    pub stylesheets: &'static [Stylesheet],
}

/// What a route renders.
#[derive(Debug, Clone, Copy)]
pub enum View {
    /// The hand-written index page listing the articles.
    Home,
    /// An MDX article.
    Mdx(MdxPage),
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    /// Route path, with a trailing slash.
    pub path: &'static str,
    /// Human-readable label, used for links and page titles.
    pub label: &'static str,
    /// The view rendered at `path`.
    pub view: View,
}

impl RouteDef {
    /// Stylesheets linked by this route.
    pub fn stylesheets(&self) -> &'static [Stylesheet] {
        match self.view {
            View::Home => &[],
            View::Mdx(page) => page.stylesheets,
        }
    }
}

const JEREMY_CSS: Stylesheet = Stylesheet {
    href: "/blog/jeremy/jeremy.css",
    contents: include_str!("../content/jeremy.css"),
};

/// The site's routes, in navigation order.
pub fn definitions() -> Vec<RouteDef> {
    vec![
        RouteDef {
            path: "/",
            label: "Home",
            view: View::Home,
        },
        RouteDef {
            path: "/blog/themesAndStyles/",
            label: "Themes and Styles",
            view: View::Mdx(MdxPage {
                file: "themesAndStyles.mdx",
                source: include_str!("../content/themesAndStyles.mdx"),
                scoped: None,
                wrapper_class: None,
                stylesheets: &[],
            }),
        },
        RouteDef {
            path: "/blog/doingCoolThingsWithMarkdown/",
            label: "Doing Cool Things (with Markdown)",
            view: View::Mdx(MdxPage {
                file: "doingCoolThingsWithMarkdown.mdx",
                source: include_str!("../content/doingCoolThingsWithMarkdown.mdx"),
                scoped: Some(cool_things_components),
                wrapper_class: None,
                stylesheets: &[],
            }),
        },
        RouteDef {
            path: "/blog/doingCoolThingsWithMarkdown2/",
            label: "Doing Cool Things (with Markdown 2)",
            view: View::Mdx(MdxPage {
                file: "doingCoolThingsWithMarkdown2.mdx",
                source: include_str!("../content/doingCoolThingsWithMarkdown2.mdx"),
                scoped: None,
                wrapper_class: None,
                stylesheets: &[],
            }),
        },
        RouteDef {
            path: "/blog/jeremy/",
            label: "Jeremy",
            view: View::Mdx(MdxPage {
                file: "jeremy.mdx",
                source: include_str!("../content/jeremy.mdx"),
                scoped: None,
                wrapper_class: Some("flex flex-col jeremy"),
                stylesheets: &[JEREMY_CSS],
            }),
        },
    ]
}

/// An immutable set of routes, each path mapping to exactly one view.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    /// Builds a table, rejecting two definitions for the same (normalized) path.
    pub fn new(routes: Vec<RouteDef>) -> Result<Self, SiteError> {
        let mut seen = std::collections::HashSet::new();
        for route in &routes {
            let path = normalize_path(route.path);
            if !seen.insert(path.clone()) {
                return Err(SiteError::DuplicateRoute { path });
            }
        }
        Ok(Self { routes })
    }

    /// Finds the route for a location. A missing trailing slash, the query
    /// string and the fragment are ignored.
    pub fn find(&self, location: &str) -> Option<&RouteDef> {
        let wanted = normalize_path(location);
        self.routes
            .iter()
            .find(|route| normalize_path(route.path) == wanted)
    }

    /// Routes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteDef> {
        self.routes.iter()
    }

    /// Route paths in definition order.
    pub fn paths(&self) -> Vec<&'static str> {
        self.routes.iter().map(|route| route.path).collect()
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// True when the table holds no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

static SITE_ROUTES: OnceCell<RouteTable> = OnceCell::new();

/// The site's route table, built on first use.
pub fn site_routes() -> Result<&'static RouteTable, SiteError> {
    SITE_ROUTES.get_or_try_init(|| RouteTable::new(definitions()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_table_has_every_article() {
        let table = site_routes().unwrap();
        assert_eq!(
            table.paths(),
            [
                "/",
                "/blog/themesAndStyles/",
                "/blog/doingCoolThingsWithMarkdown/",
                "/blog/doingCoolThingsWithMarkdown2/",
                "/blog/jeremy/",
            ]
        );
    }

    #[test]
    fn matching_ignores_trailing_slash_query_and_fragment() {
        let table = site_routes().unwrap();
        for location in ["/blog/jeremy", "/blog/jeremy/", "/blog/jeremy?ref=home", "/blog/jeremy/#about"] {
            assert_eq!(table.find(location).map(|r| r.label), Some("Jeremy"), "{location}");
        }
        assert!(table.find("/blog/").is_none());
        assert!(table.find("/blog/Jeremy/").is_none());
    }

    #[test]
    fn duplicate_paths_are_rejected() {
        let mut routes = definitions();
        routes.push(RouteDef {
            path: "/blog/jeremy",
            label: "Again",
            view: View::Home,
        });
        let err = RouteTable::new(routes).unwrap_err();
        assert!(matches!(err, SiteError::DuplicateRoute { ref path } if path == "/blog/jeremy/"));
    }

    #[test]
    fn only_jeremy_ships_a_stylesheet() {
        let table = site_routes().unwrap();
        let styled: Vec<_> = table
            .iter()
            .filter(|route| !route.stylesheets().is_empty())
            .map(|route| route.path)
            .collect();
        assert_eq!(styled, ["/blog/jeremy/"]);
    }
}
