//! Rendering layer.

/// MDAST-based block renderer.
pub mod mdast;

pub use mdast::{
    BlocksResult, HeadingEntry, Options, RenderBlock, RenderedDocument, blocks_to_html, render_mdx,
    to_blocks,
};
