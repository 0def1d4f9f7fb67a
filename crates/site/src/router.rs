//! Matches the current history location against the route table and renders
//! the matched view into the root layout.

use crate::SiteError;
use crate::config::SiteConfig;
use crate::history::{History, create_history};
use crate::home::render_home;
use crate::routes::{MdxPage, RouteDef, RouteTable, Stylesheet, View, site_routes};
use crate::shell::{DocumentParts, NOT_FOUND, render_document};
use mdxblog_render::{
    ComponentRegistry, HeadingEntry, RenderOptions, default_registry, render_mdx,
};

/// A rendered page, before or after wrapping in the document shell.
#[derive(Debug, Clone)]
pub struct Page {
    /// Location the page was rendered for.
    pub location: String,
    /// The matched route, `None` when nothing matched.
    pub route: Option<&'static RouteDef>,
    /// Page title (frontmatter title, first `h1`, or route label).
    pub title: Option<String>,
    /// Outlet HTML.
    pub outlet: String,
    /// Headings of the rendered document.
    pub headings: Vec<HeadingEntry>,
}

impl Page {
    /// True when a route matched the location.
    pub fn matched(&self) -> bool {
        self.route.is_some()
    }

    /// Stylesheets the page links, besides the shared theme.
    pub fn stylesheets(&self) -> &'static [Stylesheet] {
        match self.route {
            Some(route) => route.stylesheets(),
            None => &[],
        }
    }

    /// Title used in `<title>`; the index page has none.
    pub fn document_title(&self) -> Option<&str> {
        match self.route {
            Some(route) if matches!(route.view, View::Home) => None,
            _ => self.title.as_deref(),
        }
    }
}

/// Router state: a route table, a history, and what is needed to render.
pub struct Router {
    routes: &'static RouteTable,
    history: Box<dyn History>,
    registry: ComponentRegistry,
    options: RenderOptions,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("location", &self.history.location())
            .field("routes", &self.routes.len())
            .field("registry", &self.registry)
            .finish()
    }
}

impl Router {
    /// Creates a router over `routes`, starting at `history`'s location.
    pub fn new(
        routes: &'static RouteTable,
        history: Box<dyn History>,
        registry: ComponentRegistry,
        options: RenderOptions,
    ) -> Self {
        Self {
            routes,
            history,
            registry,
            options,
        }
    }

    /// The site router for `config`: site routes, the configured history, and
    /// the default layout components.
    pub fn from_config(config: &SiteConfig) -> Result<Self, SiteError> {
        Ok(Self::new(
            site_routes()?,
            create_history(config.history, &config.initial_entries),
            default_registry(),
            config.render_options(),
        ))
    }

    /// Current location.
    pub fn location(&self) -> &str {
        self.history.location()
    }

    /// The history driving this router.
    pub fn history(&self) -> &dyn History {
        self.history.as_ref()
    }

    /// The route table.
    pub fn routes(&self) -> &'static RouteTable {
        self.routes
    }

    /// Navigates to `to`.
    pub fn navigate(&mut self, to: &str) {
        log::debug!("navigate {} -> {to}", self.history.location());
        self.history.push(to);
    }

    /// Goes back one entry; false at the start of the history.
    pub fn back(&mut self) -> bool {
        self.history.back()
    }

    /// Goes forward one entry; false at the end of the history.
    pub fn forward(&mut self) -> bool {
        self.history.forward()
    }

    /// The route matching the current location.
    pub fn current_route(&self) -> Option<&'static RouteDef> {
        self.routes.find(self.history.location())
    }

    /// Renders the current location's view.
    ///
    /// An unmatched location renders the not-found outlet rather than failing.
    pub fn render(&self) -> Result<Page, SiteError> {
        let location = self.history.location().to_string();
        let Some(route) = self.current_route() else {
            log::info!("no route matches {location}");
            return Ok(Page {
                location,
                route: None,
                title: Some("Not Found".to_string()),
                outlet: NOT_FOUND.to_string(),
                headings: Vec::new(),
            });
        };

        let page = match route.view {
            View::Home => Page {
                location,
                route: Some(route),
                title: Some(route.label.to_string()),
                outlet: render_home(self.routes),
                headings: Vec::new(),
            },
            View::Mdx(mdx) => {
                let (outlet, title, headings) = self.render_mdx_page(route, &mdx)?;
                Page {
                    location,
                    route: Some(route),
                    title: Some(title),
                    outlet,
                    headings,
                }
            }
        };
        Ok(page)
    }

    /// Renders the current location as a full HTML document.
    pub fn render_document(&self, config: &SiteConfig) -> Result<(Page, String), SiteError> {
        let page = self.render()?;
        let parts = DocumentParts {
            location: &page.location,
            title: page.document_title(),
            outlet: &page.outlet,
            stylesheets: page.stylesheets(),
        };
        let html = render_document(&parts, config, self.history.link_style())
            .map_err(|err| SiteError::render(page.location.clone(), err))?;
        Ok((page, html))
    }

    fn render_mdx_page(
        &self,
        route: &RouteDef,
        mdx: &MdxPage,
    ) -> Result<(String, String, Vec<HeadingEntry>), SiteError> {
        let registry = match mdx.scoped {
            Some(scoped) => self.registry.merged(&scoped()),
            None => self.registry.clone(),
        };
        let doc = render_mdx(mdx.source, &registry, &self.options)
            .map_err(|err| SiteError::render(route.path, err.with_file(mdx.file)))?;

        let title = doc.title().unwrap_or(route.label).to_string();
        let outlet = match mdx.wrapper_class {
            Some(class) => format!(
                "<div class=\"{}\">{}</div>",
                html_escape::encode_double_quoted_attribute(class),
                doc.html
            ),
            None => doc.html,
        };
        Ok((outlet, title, doc.headings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{HashHistory, MemoryHistory};

    fn router_at(location: &str) -> Router {
        Router::new(
            site_routes().unwrap(),
            Box::new(MemoryHistory::new([location])),
            default_registry(),
            RenderOptions::default(),
        )
    }

    #[test]
    fn every_route_renders() {
        let routes = site_routes().unwrap();
        for path in routes.paths() {
            let page = router_at(path).render().unwrap();
            assert!(page.matched(), "{path}");
            assert!(!page.outlet.is_empty(), "{path}");
        }
    }

    #[test]
    fn unmatched_location_is_not_found() {
        let page = router_at("/nowhere").render().unwrap();
        assert!(!page.matched());
        assert_eq!(page.outlet, NOT_FOUND);
        assert_eq!(page.document_title(), Some("Not Found"));
    }

    #[test]
    fn scoped_component_renders_on_its_article() {
        let page = router_at("/blog/doingCoolThingsWithMarkdown").render().unwrap();
        assert!(page.outlet.contains("<h3>A custom component</h3><p>Imported by this post only.</p>"));
    }

    #[test]
    fn scoped_component_is_unknown_elsewhere() {
        let mut routes = crate::routes::definitions();
        routes.retain(|r| r.path == "/");
        routes.push(RouteDef {
            path: "/x/",
            label: "X",
            view: View::Mdx(MdxPage {
                file: "x.mdx",
                source: "# X\n\n<MyCustomComponent name=\"a\" text=\"b\" />\n",
                scoped: None,
                wrapper_class: None,
                stylesheets: &[],
            }),
        });
        let table: &'static RouteTable = Box::leak(Box::new(RouteTable::new(routes).unwrap()));
        let router = Router::new(
            table,
            Box::new(MemoryHistory::new(["/x/"])),
            default_registry(),
            RenderOptions::default(),
        );
        let err = router.render().unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to render /x/: Unknown component at x.mdx:3:1: MyCustomComponent"
        );
    }

    #[test]
    fn jeremy_is_wrapped_and_styled() {
        let page = router_at("/blog/jeremy/").render().unwrap();
        assert!(page.outlet.starts_with("<div class=\"flex flex-col jeremy\"><h1"));
        assert_eq!(page.stylesheets()[0].href, "/blog/jeremy/jeremy.css");
        assert_eq!(page.title.as_deref(), Some("Jeremy"));
    }

    #[test]
    fn navigation_moves_through_history() {
        let mut router = router_at("/");
        assert_eq!(router.current_route().map(|r| r.label), Some("Home"));
        router.navigate("/blog/jeremy/");
        assert_eq!(router.current_route().map(|r| r.label), Some("Jeremy"));
        assert!(router.back());
        assert_eq!(router.location(), "/");
        assert!(!router.back());
        assert!(router.forward());
        assert_eq!(router.location(), "/blog/jeremy/");
    }

    #[test]
    fn hash_router_writes_fragment_links() {
        let router = Router::new(
            site_routes().unwrap(),
            Box::new(HashHistory::from_url("#/")),
            default_registry(),
            RenderOptions::default(),
        );
        let (page, html) = router.render_document(&SiteConfig::default()).unwrap();
        assert!(page.matched());
        assert!(html.contains("<a href=\"#/blog/jeremy/\"><h4>Jeremy</h4></a>"), "{html}");
        assert!(html.contains("<title>mdxblog</title>"));
    }

    #[test]
    fn article_document_title_includes_site_title() {
        let (_, html) = router_at("/blog/themesAndStyles/")
            .render_document(&SiteConfig::default())
            .unwrap();
        assert!(html.contains("<title>Themes and Styles | mdxblog</title>"));
    }
}
