#![deny(missing_docs)]
//! mdxblog core: MDX source preprocessing, frontmatter extraction, parsing and slugs.

/// Code fence tracking for line-based transforms.
pub mod code_fence;
/// Core error types.
pub mod error;
/// YAML frontmatter extraction helpers.
pub mod frontmatter;
/// Removal of `import`/`export` statements from MDX source.
pub mod module_statements;
/// Markdown parsing utilities and extension hooks.
pub mod parse;
/// Slug generation utilities.
pub mod slug;

pub use code_fence::{FenceState, FenceStep, advance_fence_state};
pub use error::{MdxError, SourceLocation};
pub use frontmatter::{Frontmatter, FrontmatterError, extract_frontmatter, split_frontmatter};
pub use module_statements::strip_module_statements;
pub use parse::{AstTransform, ParseOptions, ParserPipeline, TextTransform, strip_module_nodes};
pub use slug::{Slugger, extract_custom_id, slugify};
