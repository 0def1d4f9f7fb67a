//! Rendering context for the mdast renderer.

use super::Options;
use super::html::blocks_to_html;
use super::types::{BlocksResult, HeadingEntry, RenderBlock, Scope};
use crate::registry::{ComponentRegistry, Props};
use crate::transform::highlight::render_code_block;
use markdown::mdast::Node;
use mdxblog_core::{MdxError, Slugger};
use std::collections::HashMap;

/// Target of a link reference definition (`[id]: url "title"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Destination URL.
    pub url: String,
    /// Optional title.
    pub title: Option<String>,
}

/// Rendering state while walking an mdast tree.
///
/// Completed output accumulates in `blocks`; `current_html` holds HTML that
/// has not been sealed into a block yet.
pub struct Context<'a> {
    /// Completed rendering blocks.
    pub blocks: Vec<RenderBlock>,

    /// Current HTML buffer (not yet finalized into a block).
    pub current_html: String,

    /// Extracted heading metadata.
    pub headings: Vec<HeadingEntry>,

    slugger: Slugger,
    stack: Vec<Scope>,
    options: &'a Options,
    registry: &'a ComponentRegistry,

    /// Footnote identifiers in order of first reference.
    footnote_order: Vec<String>,
    /// Rendered footnote definitions keyed by identifier.
    footnote_bodies: Vec<(String, String)>,
    /// Link reference definitions keyed by normalized identifier.
    definitions: HashMap<String, LinkTarget>,

    /// First fatal error hit during the walk.
    error: Option<MdxError>,
}

impl<'a> Context<'a> {
    /// Creates a context rendering against `registry`.
    pub fn new(options: &'a Options, registry: &'a ComponentRegistry) -> Self {
        Self {
            blocks: Vec::new(),
            current_html: String::with_capacity(4096),
            headings: Vec::new(),
            slugger: Slugger::new(),
            stack: vec![Scope::Root],
            options,
            registry,
            footnote_order: Vec::new(),
            footnote_bodies: Vec::new(),
            definitions: HashMap::new(),
            error: None,
        }
    }

    /// Returns the component registry in scope.
    pub fn registry(&self) -> &'a ComponentRegistry {
        self.registry
    }

    /// Returns the rendering options.
    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Records a fatal error; only the first one is kept.
    pub fn fail(&mut self, error: MdxError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Returns true once an error has been recorded.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Writes a raw string to the current HTML buffer without escaping (for safe HTML tags).
    pub fn push_raw(&mut self, s: &str) {
        self.current_html.push_str(s);
    }

    /// Writes HTML-escaped text to the buffer.
    pub fn push_text(&mut self, s: &str) {
        html_escape::encode_text_to_string(s, &mut self.current_html);
    }

    /// Writes an escaped double-quoted attribute value to the buffer.
    pub fn push_attr_value(&mut self, s: &str) {
        html_escape::encode_double_quoted_attribute_to_string(s, &mut self.current_html);
    }

    /// Returns the innermost scope.
    pub fn current_scope(&self) -> Scope {
        self.stack.last().copied().unwrap_or(Scope::Root)
    }

    /// Returns true if any scope in the stack is a list.
    pub fn is_in_list(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::List { .. }))
    }

    /// Returns true if the innermost list is tight (no `<p>` around item content).
    pub fn is_in_tight_list(&self) -> bool {
        self.stack
            .iter()
            .rev()
            .find(|scope| matches!(scope, Scope::List { .. }))
            .is_some_and(|scope| matches!(scope, Scope::List { spread: false }))
    }

    /// Returns true inside any part of a table.
    pub fn is_in_table(&self) -> bool {
        self.stack
            .iter()
            .any(|scope| matches!(scope, Scope::Table | Scope::TableRow | Scope::TableCell))
    }

    /// Returns true inside a paragraph.
    pub fn is_in_paragraph(&self) -> bool {
        self.stack.contains(&Scope::Paragraph)
    }

    /// Returns true where a block boundary would break the surrounding HTML.
    pub fn is_inline_context(&self) -> bool {
        self.is_in_list() || self.is_in_table() || self.is_in_paragraph()
    }

    /// Enters a new scope by pushing it onto the stack.
    pub fn enter(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    /// Exits the current scope by popping from the stack.
    pub fn exit(&mut self) -> Option<Scope> {
        self.stack.pop()
    }

    /// Seals the current HTML buffer into an HTML block.
    pub fn flush_html(&mut self) {
        if !self.current_html.is_empty() {
            let content = std::mem::take(&mut self.current_html);
            self.blocks.push(RenderBlock::Html { content });
        }
    }

    /// Adds a component block after flushing pending HTML.
    pub fn push_component(&mut self, name: &str, props: Props, slot_children: Vec<RenderBlock>) {
        self.flush_html();
        self.blocks.push(RenderBlock::Component {
            name: name.to_string(),
            props,
            slot_children,
        });
    }

    /// Renders a component straight into the HTML buffer.
    ///
    /// Used inside paragraphs, lists and tables, where a separate block would
    /// split the surrounding element.
    pub fn push_component_inline(
        &mut self,
        name: &str,
        props: &Props,
        slot_children: &[RenderBlock],
    ) {
        let rendered = blocks_to_html(slot_children, self.registry, self.options)
            .and_then(|children| {
                self.registry
                    .render(name, props, &children)
                    .ok_or_else(|| {
                        MdxError::InternalError(format!("component `{name}` vanished from registry"))
                    })
            });
        match rendered {
            Ok(html) => self.current_html.push_str(&html),
            Err(err) => self.fail(err),
        }
    }

    /// Adds a fenced code block: a `Code` block at top level, inline HTML elsewhere.
    pub fn push_code(&mut self, code: &str, lang: Option<&str>, meta: Option<&str>) {
        if self.is_in_list() || self.is_in_table() {
            let html = render_code_block(code, lang, self.options.enable_highlighting);
            self.current_html.push_str(&html);
        } else {
            self.flush_html();
            self.blocks.push(RenderBlock::Code {
                code: code.to_string(),
                lang: lang.map(str::to_string),
                meta: meta.map(str::to_string),
            });
        }
    }

    /// Renders child nodes to blocks in a fresh context (for component children).
    ///
    /// Headings, footnotes and errors found in the children are carried over
    /// to this context. Slugs are shared so ids stay unique across the page.
    pub fn render_children_to_blocks(&mut self, children: &[Node]) -> Vec<RenderBlock> {
        use super::render::render_node;

        let mut child = Context::new(self.options, self.registry);
        child.slugger = std::mem::take(&mut self.slugger);
        child.footnote_order = std::mem::take(&mut self.footnote_order);
        child.definitions = std::mem::take(&mut self.definitions);
        for node in children {
            render_node(node, &mut child);
        }
        child.flush_html();

        self.slugger = std::mem::take(&mut child.slugger);
        self.footnote_order = std::mem::take(&mut child.footnote_order);
        self.definitions = std::mem::take(&mut child.definitions);
        self.headings.append(&mut child.headings);
        self.footnote_bodies.append(&mut child.footnote_bodies);
        if let Some(err) = child.error.take() {
            self.fail(err);
        }
        child.blocks
    }

    /// Renders child nodes straight to an HTML string.
    pub fn render_children_to_html(&mut self, children: &[Node]) -> String {
        let blocks = self.render_children_to_blocks(children);
        match blocks_to_html(&blocks, self.registry, self.options) {
            Ok(html) => html,
            Err(err) => {
                self.fail(err);
                String::new()
            }
        }
    }

    /// Records every link reference definition in `node`, wherever it sits.
    ///
    /// The first definition of an identifier wins.
    pub fn collect_definitions(&mut self, node: &Node) {
        if let Node::Definition(def) = node {
            self.definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| LinkTarget {
                    url: def.url.clone(),
                    title: def.title.clone(),
                });
        }
        for child in node.children().into_iter().flatten() {
            self.collect_definitions(child);
        }
    }

    /// Looks up a link reference definition.
    pub fn definition(&self, identifier: &str) -> Option<LinkTarget> {
        self.definitions.get(identifier).cloned()
    }

    /// Generates a unique slug for a heading.
    pub fn generate_slug(&mut self, text: &str) -> String {
        self.slugger.next_slug(text)
    }

    /// Reserves a slug so future auto-generated slugs won't collide with it.
    pub fn reserve_slug(&mut self, slug: &str) {
        self.slugger.reserve(slug);
    }

    /// Adds a heading entry.
    pub fn add_heading(&mut self, entry: HeadingEntry) {
        self.headings.push(entry);
    }

    /// Returns the 1-based ordinal of a footnote, assigning one on first reference.
    pub fn footnote_ordinal(&mut self, id: &str) -> usize {
        if let Some(pos) = self.footnote_order.iter().position(|seen| seen == id) {
            return pos + 1;
        }
        self.footnote_order.push(id.to_string());
        self.footnote_order.len()
    }

    /// Stores a rendered footnote definition body.
    pub fn push_footnote(&mut self, id: String, body_html: String) {
        self.footnote_bodies.push((id, body_html));
    }

    /// Consumes the context and returns the blocks, or the first recorded error.
    pub fn finish(mut self) -> Result<BlocksResult, MdxError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.flush_html();

        if !self.footnote_bodies.is_empty() {
            let mut bodies = std::mem::take(&mut self.footnote_bodies);
            // Referenced notes come first, in reference order; unreferenced ones keep source order.
            bodies.sort_by_key(|(id, _)| {
                self.footnote_order
                    .iter()
                    .position(|seen| seen == id)
                    .unwrap_or(usize::MAX)
            });

            let mut section = String::from(
                "<section data-footnotes class=\"footnotes\"><h2 class=\"sr-only\" id=\"footnote-label\">Footnotes</h2><ol>",
            );
            for (id, body) in &bodies {
                let safe_id = footnote_dom_id(id);
                section.push_str(&format!(
                    "<li id=\"user-content-fn-{safe_id}\">{body}<a href=\"#user-content-fnref-{safe_id}\" data-footnote-backref class=\"data-footnote-backref\" aria-label=\"Back to reference\">↩</a></li>"
                ));
            }
            section.push_str("</ol></section>");
            self.blocks.push(RenderBlock::Html { content: section });
        }

        Ok(BlocksResult {
            blocks: self.blocks,
            headings: self.headings,
        })
    }
}

/// Footnote identifier made safe for an `id` attribute.
pub(super) fn footnote_dom_id(id: &str) -> String {
    let mut counts = std::collections::HashMap::new();
    mdxblog_core::slugify(id, &mut counts)
}
