//! Final HTML emission: resolves component blocks and highlights code blocks.

use super::Options;
use super::types::RenderBlock;
use crate::registry::ComponentRegistry;
use crate::transform::highlight::render_code_block;
use mdxblog_core::{MdxError, SourceLocation};

/// Joins rendering blocks into one HTML string.
///
/// Component blocks are rendered depth-first: children first, then the
/// registry component wrapping them.
pub fn blocks_to_html(
    blocks: &[RenderBlock],
    registry: &ComponentRegistry,
    options: &Options,
) -> Result<String, MdxError> {
    let mut html = String::new();
    for block in blocks {
        match block {
            RenderBlock::Html { content } => html.push_str(content),
            RenderBlock::Code { code, lang, .. } => {
                html.push_str(&render_code_block(
                    code,
                    lang.as_deref(),
                    options.enable_highlighting,
                ));
            }
            RenderBlock::Component {
                name,
                props,
                slot_children,
            } => {
                let children = blocks_to_html(slot_children, registry, options)?;
                let rendered = registry.render(name, props, &children).ok_or_else(|| {
                    MdxError::unknown_component(name.as_str(), SourceLocation::new(1, 1))
                })?;
                html.push_str(&rendered);
            }
        }
    }
    Ok(html)
}
