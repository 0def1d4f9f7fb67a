//! Markdown parsing utilities and extension hooks.

use crate::{MdxError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};
use std::borrow::Cow;

/// Parser options for building markdown-rs parse options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enable MDX JSX constructs.
    ///
    /// Expressions stay off: braces are literal text, which keeps `{#custom-id}`
    /// heading suffixes and code-like prose working.
    pub mdx: bool,
    /// Enable GitHub Flavored Markdown constructs.
    pub gfm: bool,
    /// Enable YAML frontmatter parsing.
    pub frontmatter: bool,
    /// Enable indented code blocks.
    pub code_indented: bool,
}

impl ParseOptions {
    /// MDX defaults. Indented code is off so nested component children can be indented freely.
    pub const fn mdx() -> Self {
        Self {
            mdx: true,
            gfm: true,
            frontmatter: true,
            code_indented: false,
        }
    }

    /// Convert to markdown-rs `ParseOptions`.
    pub fn to_markdown(self) -> markdown::ParseOptions {
        let mut constructs = markdown::Constructs {
            frontmatter: self.frontmatter,
            code_indented: self.code_indented,
            ..Default::default()
        };

        if self.gfm {
            constructs.gfm_autolink_literal = true;
            constructs.gfm_footnote_definition = true;
            constructs.gfm_label_start_footnote = true;
            constructs.gfm_strikethrough = true;
            constructs.gfm_table = true;
            constructs.gfm_task_list_item = true;
        }

        if self.mdx {
            // MDX replaces raw HTML with JSX.
            constructs.html_flow = false;
            constructs.html_text = false;
            constructs.mdx_jsx_flow = true;
            constructs.mdx_jsx_text = true;
        }

        markdown::ParseOptions {
            constructs,
            ..markdown::ParseOptions::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::mdx()
    }
}

/// Trait for preprocessing raw markdown text before parsing.
pub trait TextTransform {
    /// Transform the input markdown text, returning an owned or borrowed string.
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str>;
}

impl<F> TextTransform for F
where
    F: for<'a> Fn(&'a str) -> Cow<'a, str>,
{
    fn transform<'a>(&self, input: &'a str) -> Cow<'a, str> {
        (self)(input)
    }
}

/// Trait for mutating the parsed MDAST after parsing.
pub trait AstTransform {
    /// Mutate the parsed markdown AST in place.
    fn transform(&self, root: &mut Node);
}

impl<F> AstTransform for F
where
    F: Fn(&mut Node),
{
    fn transform(&self, root: &mut Node) {
        (self)(root)
    }
}

/// Configurable parsing pipeline with optional transforms.
pub struct ParserPipeline {
    options: markdown::ParseOptions,
    text_transforms: Vec<Box<dyn TextTransform + Send + Sync>>,
    ast_transforms: Vec<Box<dyn AstTransform + Send + Sync>>,
}

impl ParserPipeline {
    /// Create a new pipeline from core parse options.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options: options.to_markdown(),
            text_transforms: Vec::new(),
            ast_transforms: Vec::new(),
        }
    }

    /// Add a text preprocessor transform.
    pub fn with_text_transform<T: TextTransform + Send + Sync + 'static>(
        mut self,
        transform: T,
    ) -> Self {
        self.text_transforms.push(Box::new(transform));
        self
    }

    /// Add an AST transform.
    pub fn with_ast_transform<T: AstTransform + Send + Sync + 'static>(
        mut self,
        transform: T,
    ) -> Self {
        self.ast_transforms.push(Box::new(transform));
        self
    }

    /// Parse markdown into MDAST using the configured pipeline.
    pub fn parse(&self, input: &str) -> Result<Node, MdxError> {
        let mut current = Cow::Borrowed(input);
        for transform in &self.text_transforms {
            let next = transform.transform(current.as_ref()).into_owned();
            current = Cow::Owned(next);
        }

        let mut root = parse_mdast_with_options(&current, &self.options)?;
        for transform in &self.ast_transforms {
            transform.transform(&mut root);
        }

        Ok(root)
    }
}

/// Removes module and metadata nodes (ESM, YAML, TOML) from the top level of a tree.
pub fn strip_module_nodes(root: &mut Node) {
    if let Node::Root(root) = root {
        root.children
            .retain(|child| !matches!(child, Node::MdxjsEsm(_) | Node::Yaml(_) | Node::Toml(_)));
    }
}

fn parse_mdast_with_options(
    input: &str,
    options: &markdown::ParseOptions,
) -> Result<Node, MdxError> {
    markdown::to_mdast(input, options).map_err(|err| MdxError::MarkdownAdapter {
        message: err.reason.clone(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mdx_options_enable_jsx_and_disable_indented_code() {
        let opts = ParseOptions::mdx().to_markdown();
        assert!(opts.constructs.mdx_jsx_flow);
        assert!(!opts.constructs.mdx_esm);
        assert!(!opts.constructs.mdx_expression_text);
        assert!(!opts.constructs.code_indented);
        assert!(!opts.constructs.html_flow);
        assert!(opts.constructs.gfm_table);
    }

    fn expand_title(input: &str) -> Cow<'_, str> {
        Cow::Owned(input.replace("TITLE", "# Hello"))
    }

    #[test]
    fn pipeline_strips_imports() {
        let pipeline = ParserPipeline::new(ParseOptions::mdx())
            .with_text_transform(crate::module_statements::strip_module_statements)
            .with_ast_transform(strip_module_nodes);
        let root = pipeline
            .parse("import { Row } from './Row'\n\n# Title\n")
            .expect("parse");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert_eq!(root.children.len(), 1);
        assert!(matches!(root.children[0], Node::Heading(_)));
    }

    #[test]
    fn text_transforms_run_before_parsing() {
        let pipeline = ParserPipeline::new(ParseOptions::mdx()).with_text_transform(expand_title);
        let root = pipeline.parse("TITLE\n").expect("parse");
        let Node::Root(root) = root else {
            panic!("expected root");
        };
        assert!(matches!(root.children[0], Node::Heading(_)));
    }

    #[test]
    fn unclosed_jsx_reports_location() {
        let err = ParserPipeline::new(ParseOptions::mdx())
            .parse("<Row>\n\ntext\n")
            .unwrap_err();
        assert!(matches!(err, MdxError::MarkdownAdapter { .. }), "{err:?}");
        assert!(err.location().is_some());
    }
}
