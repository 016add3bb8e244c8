//! Error types for nodedocs.
//!
//! Library crates use [`NodeDocsError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all nodedocs operations.
#[derive(Debug, thiserror::Error)]
pub enum NodeDocsError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching the menu or an outline page.
    #[error("network error: {0}")]
    Network(String),

    /// Failure to clone a source repository.
    #[error("git error: {0}")]
    Git(String),

    /// HTML parsing error (bad selector, unparseable base URI, ...).
    #[error("parse error: {message}")]
    Parse { message: String },

    /// No candidate fragment path exists for an outline entry.
    ///
    /// The outline and the local content snapshot are out of sync; the run
    /// must not continue.
    #[error("content fragment not found: {} (url {url})", path.display())]
    ContentIntegrity { url: String, path: PathBuf },

    /// A single `{type}` annotation could not be turned into a link.
    #[error("unrecognized type annotation: {annotation}")]
    LinkResolution { annotation: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (serialization, malformed input, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, NodeDocsError>;

impl NodeDocsError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Report an outline URL whose fragment could not be found at `path`.
    pub fn content_integrity(url: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::ContentIntegrity {
            url: url.into(),
            path: path.into(),
        }
    }

    /// Report a type annotation the link converter does not know.
    pub fn link_resolution(annotation: impl Into<String>) -> Self {
        Self::LinkResolution {
            annotation: annotation.into(),
        }
    }
}
