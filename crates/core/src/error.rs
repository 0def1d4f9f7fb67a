use crate::frontmatter::FrontmatterError;
use markdown::unist::Position;
use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Location of the start of an mdast node, or `1:1` when the node has no position.
    pub fn from_position(position: Option<&Position>) -> Self {
        match position {
            Some(pos) => Self::new(pos.start.line, pos.start.column),
            None => Self::new(1, 1),
        }
    }

    /// Attach a file name to this location.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while turning MDX into HTML.
#[derive(Debug, Error)]
pub enum MdxError {
    /// markdown-rs parser error surfaced through the adapter.
    #[error("Parse error at {location}: {message}")]
    MarkdownAdapter {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Rendering error while emitting HTML.
    #[error("Render error at {location}: {message}")]
    RenderError {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// A component tag that no registry in scope provides.
    #[error("Unknown component at {location}: {name}")]
    UnknownComponent {
        /// Component name
        name: String,
        /// Source location
        location: SourceLocation,
    },
    /// Frontmatter could not be extracted.
    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),
    /// Internal logic error (unexpected state).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl MdxError {
    /// Create a render error with location
    pub fn render_error(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::RenderError {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Create an unknown component error with location
    pub fn unknown_component(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::UnknownComponent {
            name: name.into(),
            location,
        }
    }

    /// Returns the source location carried by this error, if any.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::MarkdownAdapter { location, .. }
            | Self::RenderError { location, .. }
            | Self::UnknownComponent { location, .. } => Some(location),
            _ => None,
        }
    }

    /// Tag every located error with the file it came from.
    pub fn with_file(self, file: &str) -> Self {
        match self {
            Self::MarkdownAdapter { message, location } => Self::MarkdownAdapter {
                message,
                location: location.in_file(file),
            },
            Self::RenderError { message, location } => Self::RenderError {
                message,
                location: location.in_file(file),
            },
            Self::UnknownComponent { name, location } => Self::UnknownComponent {
                name,
                location: location.in_file(file),
            },
            other => other,
        }
    }
}
