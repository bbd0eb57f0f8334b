//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `docs_site`: a small documentation tree on disk, loaded and indexed
//! - `nats_index`: the three-document in-memory index used by ranking tests
//!
//! [`TempWorkspace`] provides the temp directory abstraction the fixtures are
//! built on, for tests that need their own files.

use docsearch_mcp::config::{DEFAULT_LIMIT, DEFAULT_MAX_LIMIT};
use docsearch_mcp::{Config, DocSource, DocState, Document, DocumentationIndex, worker};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Base URL the fixture site is published under.
pub const BASE_URL: &str = "https://docs.example.io";

/// A temporary directory that is removed when dropped.
///
/// # Example
///
/// ```ignore
/// let workspace = TempWorkspace::new();
/// workspace.create_file("guide/intro.md", "# Intro");
/// assert!(workspace.path().join("guide/intro.md").exists());
/// ```
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content, creating parent directories.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    pub fn remove_file(&self, path: &str) {
        std::fs::remove_file(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to remove file '{}': {}", path, e));
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A documentation site on disk plus the server state indexed from it.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct DocsSite {
    pub workspace: TempWorkspace,
    pub source: DocSource,
    pub state: DocState,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl DocsSite {
    /// Writes the standard pages and indexes them.
    pub async fn new() -> Self {
        let workspace = TempWorkspace::new();
        workspace.create_file(
            "concepts/subjects.md",
            "# Subjects\n\n\
             Subjects are the addressing scheme of NATS messaging.\n\n\
             ## Wildcards\n\n\
             Use `*` to match a single token and `>` to match the tail.\n",
        );
        workspace.create_file(
            "concepts/jetstream.md",
            "---\ntitle: JetStream\n---\n\n\
             JetStream adds persistence to NATS.\n\n\
             ## Streams\n\n\
             Streams store messages. Streams can be replicated.\n\n\
             ## Consumers\n\n\
             Consumers read messages from streams.\n",
        );
        workspace.create_file(
            "using-nats/kv.md",
            "# Key Value Store\n\nBuckets built on top of streams.\n",
        );
        workspace.create_file("release-notes.txt", "Release Notes\n\nVersion 2.10 adds stream compression.\n");
        workspace.create_file("assets/logo.svg", "<svg></svg>");

        Self::index(workspace).await
    }

    /// Indexes whatever is already in `workspace`.
    pub async fn index(workspace: TempWorkspace) -> Self {
        let source = DocSource::new(workspace.path(), Some(BASE_URL.to_string()));
        let index = Arc::new(DocumentationIndex::new());
        worker::refresh(&index, &source)
            .await
            .expect("Failed to index fixture site");

        let config = Config {
            docs_dir: workspace.path().to_path_buf(),
            base_url: Some(BASE_URL.to_string()),
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            refresh_interval: None,
        };
        let state = DocState::new(index, config);

        Self {
            workspace,
            source,
            state,
        }
    }

    pub fn index_ref(&self) -> &DocumentationIndex {
        self.state.index()
    }
}

#[fixture]
pub async fn docs_site() -> DocsSite {
    DocsSite::new().await
}

/// doc1 and doc3 share "messaging system", doc1 and doc2 share "nats".
#[fixture]
pub fn nats_index() -> DocumentationIndex {
    let index = DocumentationIndex::new();
    for (id, content) in [
        ("doc1", "nats messaging system"),
        ("doc2", "nats jetstream persistence"),
        ("doc3", "kafka messaging system"),
    ] {
        index
            .index(Document::new(id).with_content(content))
            .expect("Failed to index fixture document");
    }
    index
}
