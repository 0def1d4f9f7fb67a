//! The index page.

use crate::routes::{RouteTable, View};
use std::fmt::Write;

/// Renders the Home view: a heading and one link per article.
///
/// Links are written as plain paths; the shell rewrites them for the
/// active history mode.
pub fn render_home(routes: &RouteTable) -> String {
    let mut html = String::from("<div class=\"flex flex-col\"><h1>Home</h1>");
    for route in routes.iter().filter(|r| matches!(r.view, View::Mdx(_))) {
        let _ = write!(
            html,
            "<a href=\"{}\"><h4>{}</h4></a>",
            html_escape::encode_double_quoted_attribute(route.path),
            html_escape::encode_text(route.label)
        );
    }
    html.push_str("</div>");
    html
}
