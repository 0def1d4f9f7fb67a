//! Type definitions for the mdast renderer.

use crate::registry::Props;
use serde::Serialize;

/// A rendering block produced while walking the tree.
///
/// Blocks are either finished HTML, a code block awaiting highlighting, or a
/// component invocation whose children are blocks themselves.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderBlock {
    /// Finished HTML.
    Html {
        /// The HTML content string.
        content: String,
    },

    /// A registry component invocation.
    Component {
        /// Component name as written in the tag (e.g. "Frame").
        name: String,
        /// Props from the tag's attributes.
        props: Props,
        /// Blocks rendered from the element's children.
        slot_children: Vec<RenderBlock>,
    },

    /// A fenced code block.
    Code {
        /// The code content.
        code: String,
        /// Optional language identifier.
        lang: Option<String>,
        /// Optional meta string after the language.
        meta: Option<String>,
    },
}

/// Heading metadata extracted during rendering.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HeadingEntry {
    /// Heading depth (1-6).
    pub depth: u8,
    /// Slugified identifier.
    pub slug: String,
    /// Visible heading text.
    pub text: String,
}

/// Result of rendering markdown to blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlocksResult {
    /// Rendering blocks.
    pub blocks: Vec<RenderBlock>,
    /// Extracted heading metadata.
    pub headings: Vec<HeadingEntry>,
}

/// The kind of element currently being rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scope {
    /// Document root.
    Root,
    /// Inside `<p>`.
    Paragraph,
    /// Inside `<ul>`/`<ol>`.
    List {
        /// Loose list: items wrap their content in `<p>`.
        spread: bool,
    },
    /// Inside `<table>`.
    Table,
    /// Inside `<tr>`.
    TableRow,
    /// Inside `<td>`/`<th>`.
    TableCell,
}
