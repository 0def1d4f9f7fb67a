#![deny(missing_docs)]
//! mdxblog rendering engine: mdast rendering, component registry, and HTML transforms.

/// Component registry and the built-in layout components.
pub mod registry;
/// Rendering layer (MDAST-based block renderer).
pub mod renderer;
/// Transforms (syntax highlighting, link rewriting).
pub mod transform;

pub use registry::{ComponentFn, ComponentRegistry, PropValue, Props, default_registry, prop_text};
pub use renderer::mdast::{
    BlocksResult, HeadingEntry, Options as RenderOptions, RenderBlock, RenderedDocument,
    render_mdx, to_blocks,
};
pub use transform::highlight::render_code_block;
pub use transform::links::{LinkStyle, normalize_path, rewrite_links};
