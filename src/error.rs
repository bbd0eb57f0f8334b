//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for the application layers (config, loading, refresh).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Errors returned by the documentation index.
///
/// These are expected conditions for callers, never transient: the index does no I/O,
/// so nothing here is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Empty document id, empty or whitespace-only query, out-of-range heading level.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// No document is indexed under this id.
    #[error("document not found: {id}")]
    NotFound { id: String },
}

impl IndexError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

/// Error returned when reading a documentation page from disk fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read (missing, permissions, not UTF-8).
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Another file in the same pass already produced this id.
    #[error("skipping {}: document id '{id}' is already used by another file", path.display())]
    DuplicateId { path: PathBuf, id: String },
    /// The file extension has no extractor.
    #[error("unsupported document type: {}", path.display())]
    Unsupported { path: PathBuf },
}
