//! Error types for rendering and site generation

use std::path::PathBuf;

use thiserror::Error;

use crate::block::SpanKind;

/// Errors raised while turning markdown into an HTML tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// An inline delimiter appears an odd number of times in plain text
    #[error("invalid markdown syntax: unbalanced `{delimiter}` in {text:?}")]
    UnbalancedDelimiter { delimiter: String, text: String },

    /// A span carries a URL it should not have, or lacks one it needs
    #[error("invalid {kind:?} span {content:?}")]
    InvalidSpan { kind: SpanKind, content: String },

    /// The first line of the document is not a `# ` heading
    #[error("document must start with a `# ` title line")]
    MissingTitle,

    /// A leaf other than `img` has no content
    #[error("leaf node <{tag}> has no content")]
    EmptyLeaf { tag: String },

    /// A parent node has an empty tag
    #[error("parent node requires a tag")]
    MissingTag,

    /// A parent node has no children
    #[error("parent node <{tag}> must have at least one child")]
    EmptyChildren { tag: String },
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while building a site on disk
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to parse config file at {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid template {path}: {reason}")]
    Template { path: PathBuf, reason: String },

    #[error("failed to render {path}: {source}")]
    Render { path: PathBuf, source: RenderError },
}

impl SiteError {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SiteError::Io {
            action,
            path,
            source,
        }
    }
}
