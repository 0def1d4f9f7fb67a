use mdxblog_core::MdxError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling or rendering the site.
#[derive(Debug, Error)]
pub enum SiteError {
    /// Two route definitions normalize to the same path.
    #[error("duplicate route `{path}`")]
    DuplicateRoute {
        /// The normalized path defined twice.
        path: String,
    },
    /// A page failed to render.
    #[error("failed to render {path}: {source}")]
    Render {
        /// Route path of the page.
        path: String,
        /// Underlying renderer error.
        #[source]
        source: MdxError,
    },
    /// The configuration file is not valid YAML for [`crate::SiteConfig`].
    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),
    /// The configuration file exists but could not be read.
    #[error("cannot read config {}: {source}", path.display())]
    ConfigIo {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl SiteError {
    /// Wraps a renderer error with the route it happened on.
    pub fn render(path: impl Into<String>, source: MdxError) -> Self {
        Self::Render {
            path: path.into(),
            source,
        }
    }
}
