//! Rendering functions for the mdast renderer.

use super::context::{Context, footnote_dom_id};
use super::types::{HeadingEntry, Scope};
use crate::registry::{PropValue, Props};
use markdown::mdast::{AttributeContent, AttributeValue, Node};
use markdown::unist::Position;
use mdxblog_core::slug::extract_custom_id;
use mdxblog_core::{MdxError, SourceLocation};

/// HTML elements that never have children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Extracts plain text from a list of AST nodes (for heading text).
pub fn extract_text_from_nodes(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        extract_text_from_node(node, &mut text);
    }
    text.trim().to_string()
}

fn extract_text_from_node(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(t) => buffer.push_str(&t.value),
        Node::InlineCode(code) => buffer.push_str(&code.value),
        Node::Strong(n) => n.children.iter().for_each(|c| extract_text_from_node(c, buffer)),
        Node::Emphasis(n) => n.children.iter().for_each(|c| extract_text_from_node(c, buffer)),
        Node::Link(n) => n.children.iter().for_each(|c| extract_text_from_node(c, buffer)),
        Node::LinkReference(n) => n.children.iter().for_each(|c| extract_text_from_node(c, buffer)),
        Node::Delete(n) => n.children.iter().for_each(|c| extract_text_from_node(c, buffer)),
        Node::MdxJsxTextElement(n) => {
            n.children.iter().for_each(|c| extract_text_from_node(c, buffer))
        }
        _ => {}
    }
}

fn render_children(children: &[Node], ctx: &mut Context) {
    for child in children {
        render_node(child, ctx);
    }
}

fn render_wrapped(tag: &str, children: &[Node], ctx: &mut Context) {
    ctx.push_raw(&format!("<{tag}>"));
    render_children(children, ctx);
    ctx.push_raw(&format!("</{tag}>"));
}

fn render_list(list: &markdown::mdast::List, ctx: &mut Context) {
    let tag = if list.ordered { "ol" } else { "ul" };
    match list.start {
        Some(start) if list.ordered && start != 1 => {
            ctx.push_raw(&format!("<ol start=\"{start}\">"));
        }
        _ => ctx.push_raw(&format!("<{tag}>")),
    }
    ctx.enter(Scope::List {
        spread: list.spread,
    });
    render_children(&list.children, ctx);
    ctx.exit();
    ctx.push_raw(&format!("</{tag}>"));
}

/// Renders a list item; GFM task items get a disabled checkbox.
fn render_list_item(item: &markdown::mdast::ListItem, ctx: &mut Context) {
    match item.checked {
        Some(checked) => {
            ctx.push_raw("<li class=\"task-list-item\">");
            ctx.push_raw(if checked {
                "<input type=\"checkbox\" disabled checked /> "
            } else {
                "<input type=\"checkbox\" disabled /> "
            });
        }
        None => ctx.push_raw("<li>"),
    }
    render_children(&item.children, ctx);
    ctx.push_raw("</li>");
}

fn render_table(table: &markdown::mdast::Table, ctx: &mut Context) {
    ctx.enter(Scope::Table);
    ctx.push_raw("<table>");

    let mut rows = table.children.iter().filter_map(|row| match row {
        Node::TableRow(r) => Some(r),
        _ => None,
    });
    ctx.push_raw("<thead>");
    if let Some(header) = rows.next() {
        render_table_row(header, ctx, true, &table.align);
    }
    ctx.push_raw("</thead>");

    let mut body_open = false;
    for row in rows {
        if !body_open {
            ctx.push_raw("<tbody>");
            body_open = true;
        }
        render_table_row(row, ctx, false, &table.align);
    }
    if body_open {
        ctx.push_raw("</tbody>");
    }

    ctx.push_raw("</table>");
    ctx.exit();
}

fn render_table_row(
    row: &markdown::mdast::TableRow,
    ctx: &mut Context,
    is_header: bool,
    aligns: &[markdown::mdast::AlignKind],
) {
    use markdown::mdast::AlignKind;

    ctx.push_raw("<tr>");
    ctx.enter(Scope::TableRow);
    let tag = if is_header { "th" } else { "td" };

    for (i, cell) in row.children.iter().enumerate() {
        let Node::TableCell(cell) = cell else {
            continue;
        };
        let align = match aligns.get(i) {
            Some(AlignKind::Left) => " align=\"left\"",
            Some(AlignKind::Right) => " align=\"right\"",
            Some(AlignKind::Center) => " align=\"center\"",
            _ => "",
        };
        ctx.push_raw(&format!("<{tag}{align}>"));
        ctx.enter(Scope::TableCell);
        render_children(&cell.children, ctx);
        ctx.exit();
        ctx.push_raw(&format!("</{tag}>"));
    }

    ctx.exit();
    ctx.push_raw("</tr>");
}

/// Component tags start with an uppercase letter or use member syntax (`ui.Card`).
fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) || name.contains('.')
}

/// Collects JSX attributes into props. Bare attributes (`<Frame open>`) become `"true"`.
fn collect_props(attributes: &[AttributeContent]) -> Props {
    let mut props = Props::new();
    for attr in attributes {
        match attr {
            AttributeContent::Property(prop) => {
                let value = match &prop.value {
                    Some(AttributeValue::Literal(s)) => PropValue::literal(s.clone()),
                    Some(AttributeValue::Expression(expr)) => {
                        PropValue::expression(expr.value.clone())
                    }
                    None => PropValue::literal("true"),
                };
                props.insert(prop.name.clone(), value);
            }
            AttributeContent::Expression(expr) => {
                log::debug!("Ignoring spread attribute {{{}}}", expr.value);
            }
        }
    }
    props
}

/// Renders an MDX JSX element: fragments render their children, lowercase tags
/// are plain HTML, and capitalized tags resolve through the registry.
fn render_jsx(
    name: Option<&str>,
    attributes: &[AttributeContent],
    children: &[Node],
    position: Option<&Position>,
    ctx: &mut Context,
) {
    let Some(tag_name) = name else {
        render_children(children, ctx);
        return;
    };

    let props = collect_props(attributes);

    if !is_component_name(tag_name) {
        render_html_element(tag_name, &props, children, ctx);
        return;
    }

    if !ctx.registry().contains(tag_name) {
        ctx.fail(MdxError::unknown_component(
            tag_name,
            SourceLocation::from_position(position),
        ));
        return;
    }

    let slot_children = ctx.render_children_to_blocks(children);
    if ctx.is_inline_context() {
        ctx.push_component_inline(tag_name, &props, &slot_children);
    } else {
        ctx.push_component(tag_name, props, slot_children);
    }
}

/// Writes a lowercase JSX tag as a literal HTML element.
fn render_html_element(tag: &str, props: &Props, children: &[Node], ctx: &mut Context) {
    ctx.push_raw("<");
    ctx.push_raw(tag);
    for (key, value) in props {
        // JSX spells the HTML attribute `class` as `className`.
        let key = match key.as_str() {
            "className" => "class",
            "htmlFor" => "for",
            other => other,
        };
        ctx.push_raw(" ");
        ctx.push_raw(key);
        ctx.push_raw("=\"");
        ctx.push_attr_value(&value.as_text());
        ctx.push_raw("\"");
    }

    if children.is_empty() && VOID_ELEMENTS.contains(&tag) {
        ctx.push_raw(" />");
        return;
    }

    ctx.push_raw(">");
    render_children(children, ctx);
    ctx.push_raw(&format!("</{tag}>"));
}

/// Renders a paragraph node, suppressing `<p>` wrappers in tight lists.
fn render_paragraph(para: &markdown::mdast::Paragraph, ctx: &mut Context) {
    // A paragraph holding only components is really a block of components.
    let only_components = !para.children.is_empty()
        && para.children.iter().all(|child| match child {
            Node::MdxJsxTextElement(el) => el.name.as_deref().is_some_and(is_component_name),
            Node::Text(t) => t.value.trim().is_empty(),
            _ => false,
        });
    if only_components && !ctx.is_in_list() && !ctx.is_in_table() {
        render_children(&para.children, ctx);
        return;
    }

    let in_tight_list = ctx.is_in_tight_list();
    if !in_tight_list {
        ctx.push_raw("<p>");
        ctx.enter(Scope::Paragraph);
    }

    render_children(&para.children, ctx);

    if !in_tight_list {
        ctx.exit();
        ctx.push_raw("</p>");
    }
}

fn render_link(link: &markdown::mdast::Link, ctx: &mut Context) {
    render_anchor(&link.url, link.title.as_deref(), &link.children, ctx);
}

fn render_anchor(url: &str, title: Option<&str>, children: &[Node], ctx: &mut Context) {
    ctx.push_raw("<a href=\"");
    ctx.push_attr_value(url);
    ctx.push_raw("\"");
    if let Some(title) = title {
        ctx.push_raw(" title=\"");
        ctx.push_attr_value(title);
        ctx.push_raw("\"");
    }
    ctx.push_raw(">");
    render_children(children, ctx);
    ctx.push_raw("</a>");
}

/// Renders `[text][id]` through its definition; an undefined reference keeps its source text.
fn render_link_reference(link: &markdown::mdast::LinkReference, ctx: &mut Context) {
    match ctx.definition(&link.identifier) {
        Some(target) => render_anchor(&target.url, target.title.as_deref(), &link.children, ctx),
        None => {
            log::debug!("Undefined link reference [{}]", link.identifier);
            ctx.push_raw("[");
            render_children(&link.children, ctx);
            ctx.push_raw("]");
        }
    }
}

/// Finds a `{#custom-id}` in the last text node only, so inline code like `` `{#x}` `` is left alone.
fn find_custom_id_in_last_text_node(nodes: &[Node]) -> Option<&str> {
    match nodes.last()? {
        Node::Text(t) => extract_custom_id(&t.value).1,
        Node::Strong(s) => find_custom_id_in_last_text_node(&s.children),
        Node::Emphasis(e) => find_custom_id_in_last_text_node(&e.children),
        Node::Delete(d) => find_custom_id_in_last_text_node(&d.children),
        _ => None,
    }
}

fn contains_link(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Link(_) | Node::LinkReference(_) => true,
        Node::MdxJsxTextElement(el) => {
            el.name.as_deref() == Some("a") || contains_link(&el.children)
        }
        Node::Strong(n) => contains_link(&n.children),
        Node::Emphasis(n) => contains_link(&n.children),
        Node::Delete(n) => contains_link(&n.children),
        _ => false,
    })
}

/// Renders a heading with a slug id and records it.
///
/// A trailing `{#custom-id}` replaces the generated slug and is removed from the output.
fn render_heading(heading: &markdown::mdast::Heading, ctx: &mut Context) {
    let raw_text = extract_text_from_nodes(&heading.children);
    let custom_id = find_custom_id_in_last_text_node(&heading.children);
    let text = match custom_id {
        Some(_) => extract_custom_id(&raw_text).0,
        None => raw_text.as_str(),
    };

    let slug = match custom_id {
        Some(id) => {
            ctx.reserve_slug(id);
            id.to_string()
        }
        None => ctx.generate_slug(text),
    };

    ctx.add_heading(HeadingEntry {
        depth: heading.depth,
        slug: slug.clone(),
        text: text.to_string(),
    });

    let tag = format!("h{}", heading.depth);
    ctx.push_raw(&format!("<{tag} id=\""));
    ctx.push_attr_value(&slug);
    ctx.push_raw("\">");

    let autolink = ctx.options().enable_heading_autolinks && !contains_link(&heading.children);
    if autolink {
        ctx.push_raw("<a href=\"#");
        ctx.push_attr_value(&slug);
        ctx.push_raw("\">");
    }

    if custom_id.is_some() {
        render_stripping_custom_id(&heading.children, ctx);
    } else {
        render_children(&heading.children, ctx);
    }

    if autolink {
        ctx.push_raw("</a>");
    }
    ctx.push_raw(&format!("</{tag}>"));
}

/// Renders heading children with the trailing `{#...}` removed from the deepest last text node.
fn render_stripping_custom_id(children: &[Node], ctx: &mut Context) {
    let Some((last, rest)) = children.split_last() else {
        return;
    };
    render_children(rest, ctx);
    match last {
        Node::Text(text) => match text.value.rfind("{#") {
            Some(pos) => ctx.push_text(text.value[..pos].trim_end()),
            None => ctx.push_text(&text.value),
        },
        Node::Strong(n) => {
            ctx.push_raw("<strong>");
            render_stripping_custom_id(&n.children, ctx);
            ctx.push_raw("</strong>");
        }
        Node::Emphasis(n) => {
            ctx.push_raw("<em>");
            render_stripping_custom_id(&n.children, ctx);
            ctx.push_raw("</em>");
        }
        Node::Delete(n) => {
            ctx.push_raw("<del>");
            render_stripping_custom_id(&n.children, ctx);
            ctx.push_raw("</del>");
        }
        other => render_node(other, ctx),
    }
}

fn render_image(img: &markdown::mdast::Image, ctx: &mut Context) {
    render_img(&img.url, &img.alt, img.title.as_deref(), ctx);
}

fn render_img(url: &str, alt: &str, title: Option<&str>, ctx: &mut Context) {
    ctx.push_raw("<img src=\"");
    ctx.push_attr_value(url);
    ctx.push_raw("\" alt=\"");
    ctx.push_attr_value(alt);
    ctx.push_raw("\"");
    if let Some(title) = title {
        ctx.push_raw(" title=\"");
        ctx.push_attr_value(title);
        ctx.push_raw("\"");
    }
    if ctx.options().enable_lazy_images {
        ctx.push_raw(" loading=\"lazy\"");
    }
    ctx.push_raw(" />");
}

fn render_image_reference(img: &markdown::mdast::ImageReference, ctx: &mut Context) {
    match ctx.definition(&img.identifier) {
        Some(target) => render_img(&target.url, &img.alt, target.title.as_deref(), ctx),
        None => {
            log::debug!("Undefined image reference [{}]", img.identifier);
            ctx.push_text(&format!("![{}]", img.alt));
        }
    }
}

/// Renders a footnote reference as `<sup><a>n</a></sup>`, numbered by first reference.
fn render_footnote_reference(fnref: &markdown::mdast::FootnoteReference, ctx: &mut Context) {
    let ordinal = ctx.footnote_ordinal(&fnref.identifier);
    let safe_id = footnote_dom_id(&fnref.identifier);
    ctx.push_raw(&format!(
        "<sup><a href=\"#user-content-fn-{safe_id}\" id=\"user-content-fnref-{safe_id}\" data-footnote-ref aria-describedby=\"footnote-label\">{ordinal}</a></sup>"
    ));
}

fn render_footnote_definition(fndef: &markdown::mdast::FootnoteDefinition, ctx: &mut Context) {
    let body = ctx.render_children_to_html(&fndef.children);
    ctx.push_footnote(fndef.identifier.clone(), body);
}

/// Recursively renders an AST node, updating the context state.
pub fn render_node(node: &Node, ctx: &mut Context) {
    if ctx.has_failed() {
        return;
    }

    match node {
        Node::Root(root) => render_children(&root.children, ctx),
        Node::Text(text) => ctx.push_text(&text.value),
        Node::Paragraph(para) => render_paragraph(para, ctx),
        Node::Link(link) => render_link(link, ctx),
        Node::LinkReference(link) => render_link_reference(link, ctx),
        Node::Strong(strong) => render_wrapped("strong", &strong.children, ctx),
        Node::Emphasis(emphasis) => render_wrapped("em", &emphasis.children, ctx),
        Node::Delete(delete) => render_wrapped("del", &delete.children, ctx),
        Node::Blockquote(quote) => render_wrapped("blockquote", &quote.children, ctx),
        Node::InlineCode(code) => {
            ctx.push_raw("<code>");
            ctx.push_text(&code.value);
            ctx.push_raw("</code>");
        }
        Node::Break(_) => ctx.push_raw("<br />"),
        Node::Heading(heading) => render_heading(heading, ctx),
        Node::List(list) => render_list(list, ctx),
        Node::ListItem(item) => render_list_item(item, ctx),
        Node::Code(code) => ctx.push_code(&code.value, code.lang.as_deref(), code.meta.as_deref()),
        Node::Image(img) => render_image(img, ctx),
        Node::ImageReference(img) => render_image_reference(img, ctx),
        Node::ThematicBreak(_) => ctx.push_raw("<hr />"),
        Node::Html(html) => {
            log::debug!("Escaping raw HTML in MDX content: {}", html.value);
            ctx.push_text(&html.value);
        }
        Node::Table(table) => render_table(table, ctx),
        Node::TableRow(_) | Node::TableCell(_) => {}
        Node::MdxJsxFlowElement(elem) => render_jsx(
            elem.name.as_deref(),
            &elem.attributes,
            &elem.children,
            elem.position.as_ref(),
            ctx,
        ),
        Node::MdxJsxTextElement(elem) => render_jsx(
            elem.name.as_deref(),
            &elem.attributes,
            &elem.children,
            elem.position.as_ref(),
            ctx,
        ),
        Node::MdxFlowExpression(expr) => {
            log::debug!("Dropping MDX expression {{{}}}", expr.value);
        }
        Node::MdxTextExpression(expr) => {
            log::debug!("Dropping MDX expression {{{}}}", expr.value);
        }
        Node::MdxjsEsm(_) | Node::Yaml(_) | Node::Toml(_) | Node::Definition(_) => {}
        Node::FootnoteReference(fnref) => render_footnote_reference(fnref, ctx),
        Node::FootnoteDefinition(fndef) => render_footnote_definition(fndef, ctx),
        _ => {
            log::warn!("Unhandled markdown node type: {:?}", node);
        }
    }
}
