use mdxblog_site::{HistoryMode, SiteConfig, render_location, site_routes};

fn hash_config() -> SiteConfig {
    SiteConfig {
        history: HistoryMode::Hash,
        ..SiteConfig::default()
    }
}

#[test]
fn every_route_renders_a_full_document() {
    let config = SiteConfig::default();
    for path in site_routes().unwrap().paths() {
        let (page, html) = render_location(path, &config).unwrap();
        assert!(page.matched(), "{path}");
        assert!(html.starts_with("<!doctype html>"), "{path}");
        assert!(html.contains("data-outlet>"), "{path}");
        assert!(html.contains(">Home</a>"), "{path}");
    }
}

#[test]
fn default_registry_components_appear_in_articles() {
    let (_, html) = render_location("/blog/themesAndStyles/", &SiteConfig::default()).unwrap();
    assert!(html.contains("data-component=\"row\""));
    assert!(html.contains("data-component=\"column\""));
    assert!(html.contains("data-component=\"frame\""));
    assert!(html.contains("<span class=\"token keyword\">export</span>"));
}

#[test]
fn not_found_keeps_the_layout() {
    let (page, html) = render_location("/missing/", &SiteConfig::default()).unwrap();
    assert!(!page.matched());
    assert!(html.contains("<p>Not Found</p>"));
    assert!(html.contains("<title>Not Found | mdxblog</title>"));
    assert!(html.contains(">Home</a>"));
}

#[test]
fn hash_location_comes_from_the_fragment() {
    let (page, html) = render_location("index.html#/blog/jeremy/", &hash_config()).unwrap();
    assert_eq!(page.route.map(|r| r.label), Some("Jeremy"));
    assert!(html.contains("<link rel=\"stylesheet\" href=\"/blog/jeremy/jeremy.css\" />"));
    assert!(html.contains("<a href=\"#/\""));

    let (page, _) = render_location("index.html", &hash_config()).unwrap();
    assert_eq!(page.route.map(|r| r.path), Some("/"));
}

#[test]
fn article_links_follow_the_history_mode() {
    let path = "/blog/doingCoolThingsWithMarkdown2/";
    let (_, memory) = render_location(path, &SiteConfig::default()).unwrap();
    assert!(memory.contains("<a href=\"/blog/themesAndStyles/\">Themes and Styles</a>"));

    let (_, hash) = render_location(&format!("#{path}"), &hash_config()).unwrap();
    assert!(hash.contains("<a href=\"#/blog/themesAndStyles/\">Themes and Styles</a>"));
}

#[test]
fn highlighting_follows_config() {
    let config = SiteConfig {
        highlight: false,
        ..SiteConfig::default()
    };
    let (_, html) = render_location("/blog/themesAndStyles/", &config).unwrap();
    assert!(!html.contains("code-highlight"));
    assert!(html.contains("<pre class=\"language-tsx\"><code class=\"language-tsx\">"));
}
