//! MDAST-based MDX to HTML renderer.
//!
//! The source is preprocessed (frontmatter split off, module statements
//! blanked), parsed with markdown-rs, walked into [`RenderBlock`]s, and the
//! blocks are finally joined into HTML with registry components resolved.
//!
//! # Module Structure
//!
//! - `types` - block and heading types
//! - `context` - rendering state during traversal
//! - `render` - AST node rendering functions
//! - `html` - block to HTML emission

mod context;
mod html;
pub mod render;
mod types;

pub use context::{Context, LinkTarget};
pub use html::blocks_to_html;
pub use types::{BlocksResult, HeadingEntry, RenderBlock, Scope};

use crate::registry::ComponentRegistry;
use mdxblog_core::{
    Frontmatter, MdxError, ParseOptions, ParserPipeline, split_frontmatter, strip_module_nodes,
    strip_module_statements,
};
use render::render_node;
use serde::{Deserialize, Serialize};

/// Rendering options for the mdast renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Wrap heading content in a link to the heading itself.
    #[serde(default)]
    pub enable_heading_autolinks: bool,
    /// Add `loading="lazy"` to images.
    #[serde(default)]
    pub enable_lazy_images: bool,
    /// Run fenced code through the syntax highlighter.
    #[serde(default = "default_highlighting")]
    pub enable_highlighting: bool,
}

fn default_highlighting() -> bool {
    true
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enable_heading_autolinks: false,
            enable_lazy_images: false,
            enable_highlighting: default_highlighting(),
        }
    }
}

/// A rendered MDX document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    /// Body HTML.
    pub html: String,
    /// Headings in document order.
    pub headings: Vec<HeadingEntry>,
    /// Frontmatter metadata.
    #[serde(skip)]
    pub frontmatter: Frontmatter,
}

impl RenderedDocument {
    /// Frontmatter title, falling back to the first level-one heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter.title().or_else(|| {
            self.headings
                .iter()
                .find(|h| h.depth == 1)
                .map(|h| h.text.as_str())
        })
    }
}

fn pipeline() -> ParserPipeline {
    ParserPipeline::new(ParseOptions::mdx())
        .with_text_transform(strip_module_statements)
        .with_ast_transform(strip_module_nodes)
}

/// Renders an MDX body (no frontmatter) to blocks.
///
/// # Examples
///
/// ```
/// use mdxblog_render::registry::default_registry;
/// use mdxblog_render::renderer::mdast::{to_blocks, Options, RenderBlock};
///
/// let result = to_blocks("<Row>\n\nHello\n\n</Row>\n", &default_registry(), &Options::default()).unwrap();
/// assert!(matches!(&result.blocks[0], RenderBlock::Component { name, .. } if name == "Row"));
/// ```
pub fn to_blocks(
    input: &str,
    registry: &ComponentRegistry,
    options: &Options,
) -> Result<BlocksResult, MdxError> {
    let tree = pipeline().parse(input)?;
    let mut ctx = Context::new(options, registry);
    ctx.collect_definitions(&tree);
    render_node(&tree, &mut ctx);
    ctx.finish()
}

/// Renders a full MDX document (frontmatter allowed) to HTML.
///
/// Errors carry the line and column of the offending construct in `source`.
pub fn render_mdx(
    source: &str,
    registry: &ComponentRegistry,
    options: &Options,
) -> Result<RenderedDocument, MdxError> {
    let (frontmatter, body) = split_frontmatter(source)?;
    // Keep line numbers aligned with the original source.
    let line_offset = source[..frontmatter.body_start].matches('\n').count();
    let padded = format!("{}{}", "\n".repeat(line_offset), body);

    let result = to_blocks(&padded, registry, options)?;
    let html = blocks_to_html(&result.blocks, registry, options)?;
    Ok(RenderedDocument {
        html,
        headings: result.headings,
        frontmatter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::default_registry;

    fn render(source: &str) -> RenderedDocument {
        render_mdx(source, &default_registry(), &Options::default()).expect("render")
    }

    #[test]
    fn plain_markdown() {
        let doc = render("# Hello\n\nSome *text* and `code`.\n");
        assert_eq!(
            doc.html,
            "<h1 id=\"hello\">Hello</h1><p>Some <em>text</em> and <code>code</code>.</p>"
        );
        assert_eq!(doc.title(), Some("Hello"));
    }

    #[test]
    fn layout_components_nest() {
        let doc = render("<Row>\n  <Col>\n    left\n  </Col>\n  <Col>\n    right\n  </Col>\n</Row>\n");
        assert!(doc.html.starts_with("<div class=\"flex flex-row"), "{}", doc.html);
        assert_eq!(doc.html.matches("data-component=\"column\"").count(), 2);
        assert!(doc.html.contains("<p>left</p>"), "{}", doc.html);
        assert!(doc.html.contains("<p>right</p>"), "{}", doc.html);
    }

    #[test]
    fn frame_title_from_attribute() {
        let doc = render("<Frame title=\"Example\">\n\nInside\n\n</Frame>\n");
        assert!(doc.html.contains(">Example</p><p>Inside</p></div>"), "{}", doc.html);
    }

    #[test]
    fn inline_component_inside_paragraph() {
        let doc = render("Before <Frame title=\"x\">in</Frame> after\n");
        assert!(doc.html.starts_with("<p>Before <div"), "{}", doc.html);
        assert!(doc.html.ends_with("in</div> after</p>"), "{}", doc.html);
    }

    #[test]
    fn unknown_component_fails_with_location() {
        let err = render_mdx(
            "---\ntitle: t\n---\n\n<Gallery />\n",
            &default_registry(),
            &Options::default(),
        )
        .unwrap_err();
        match err {
            MdxError::UnknownComponent { name, location } => {
                assert_eq!(name, "Gallery");
                assert_eq!(location.line, 5);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lowercase_tags_are_html() {
        let doc = render("<div className=\"jeremy\">\n\nhey\n\n</div>\n");
        assert_eq!(doc.html, "<div class=\"jeremy\"><p>hey</p></div>");
    }

    #[test]
    fn imports_vanish_and_braces_stay_literal() {
        let doc = render("import { Thing } from './thing'\n\n{1 + 1}\n\nText\n");
        assert_eq!(doc.html, "<p>{1 + 1}</p><p>Text</p>");
    }

    #[test]
    fn frontmatter_title_wins() {
        let doc = render("---\ntitle: Jeremy\n---\n# Something else\n");
        assert_eq!(doc.title(), Some("Jeremy"));
        assert_eq!(doc.headings.len(), 1);
    }

    #[test]
    fn custom_heading_ids_and_duplicates() {
        let doc = render("## Setup {#install}\n\n## Setup\n\n## Setup\n");
        let slugs: Vec<_> = doc.headings.iter().map(|h| h.slug.as_str()).collect();
        assert_eq!(slugs, ["install", "setup", "setup-1"]);
        assert!(doc.html.starts_with("<h2 id=\"install\">Setup</h2>"));
    }

    #[test]
    fn headings_inside_components_are_collected() {
        let doc = render("<Col>\n\n## Inner\n\n</Col>\n");
        assert_eq!(doc.headings[0].slug, "inner");
    }

    #[test]
    fn code_blocks_are_highlighted() {
        let doc = render("```js\nconst a = 1;\n```\n");
        assert!(
            doc.html
                .starts_with("<pre class=\"language-js\"><code class=\"language-js code-highlight\">"),
            "{}",
            doc.html
        );
        assert!(doc.html.contains("<span class=\"token keyword\">const</span>"));
    }

    #[test]
    fn gfm_tables_and_tasks() {
        let doc = render("| a | b |\n|:--|--:|\n| 1 | 2 |\n\n- [x] done\n- [ ] todo\n");
        assert!(doc.html.contains("<th align=\"left\">a</th><th align=\"right\">b</th>"));
        assert!(doc.html.contains("<tbody><tr><td align=\"left\">1</td>"));
        assert!(doc.html.contains("<input type=\"checkbox\" disabled checked /> done"));
    }

    #[test]
    fn footnotes_are_collected_at_the_end() {
        let doc = render("Text[^a].\n\n[^a]: The note.\n");
        assert!(doc.html.contains("data-footnote-ref"));
        assert!(doc.html.ends_with("</ol></section>"));
        assert!(doc.html.contains("<li id=\"user-content-fn-a\"><p>The note.</p>"));
    }

    #[test]
    fn reference_links_and_images_resolve_through_definitions() {
        let doc = render(
            "See [the docs][docs] and ![logo][img].\n\n[docs]: /blog/jeremy/\n[img]: /logo.png \"Logo\"\n",
        );
        assert_eq!(
            doc.html,
            "<p>See <a href=\"/blog/jeremy/\">the docs</a> and <img src=\"/logo.png\" alt=\"logo\" title=\"Logo\" />.</p>"
        );
    }

    #[test]
    fn collapsed_references_match_case_insensitively() {
        let doc = render("[Jeremy][] and [jeremy].\n\n[JEREMY]: /blog/jeremy/ \"About\"\n");
        assert_eq!(
            doc.html,
            "<p><a href=\"/blog/jeremy/\" title=\"About\">Jeremy</a> and <a href=\"/blog/jeremy/\" title=\"About\">jeremy</a>.</p>"
        );
    }

    #[test]
    fn references_inside_components_see_document_definitions() {
        let doc = render("<Col>\n\nRead [more][m].\n\n</Col>\n\n[m]: /blog/themesAndStyles/\n");
        assert!(
            doc.html.contains("<p>Read <a href=\"/blog/themesAndStyles/\">more</a>.</p></div>"),
            "{}",
            doc.html
        );
    }

    #[test]
    fn leading_rule_without_closing_fence_is_a_thematic_break() {
        let doc = render("---\n\nHello\n");
        assert_eq!(doc.html, "<hr /><p>Hello</p>");
        assert!(doc.frontmatter.is_empty());
    }
}
