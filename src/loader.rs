//! Reads documentation pages from a local directory tree.

use crate::error::{LoadError, Result};
use crate::extract::{self, DocumentKind};
use crate::types::Document;
use ahash::AHashSet;
use anyhow::bail;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A directory of Markdown / text pages and the URL they are published under.
#[derive(Debug, Clone)]
pub struct DocSource {
    root: PathBuf,
    base_url: Option<String>,
}

/// Outcome of one pass over a [`DocSource`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub documents: Vec<Document>,
    /// Supported files that could not be read or whose id was taken
    pub skipped: usize,
}

impl DocSource {
    pub fn new(root: impl Into<PathBuf>, base_url: Option<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the directory and extracts every supported page.
    ///
    /// Honors `.gitignore` and skips hidden files. Files that fail to read are
    /// logged and counted in [`LoadReport::skipped`]; only an unusable root is an
    /// error. Pages come back sorted by path so ids are assigned deterministically.
    /// When two files map to the same id (`intro.md`, `intro.txt`) the first path
    /// wins and the others are skipped.
    pub fn load(&self) -> Result<LoadReport> {
        if !self.root.is_dir() {
            bail!("Documentation directory not found: {}", self.root.display());
        }

        let mut paths: Vec<PathBuf> = WalkBuilder::new(&self.root)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable directory entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .map(ignore::DirEntry::into_path)
            .filter(|path| DocumentKind::from_path(path).is_some())
            .collect();
        paths.sort();

        let mut report = LoadReport::default();
        let mut seen: AHashSet<String> = AHashSet::with_capacity(paths.len());
        for path in paths {
            let loaded = self.load_file(&path).and_then(|doc| {
                if seen.insert(doc.id.clone()) {
                    Ok(doc)
                } else {
                    Err(LoadError::DuplicateId { path: path.clone(), id: doc.id })
                }
            });
            match loaded {
                Ok(doc) => report.documents.push(doc),
                Err(e) => {
                    tracing::warn!("{}", e);
                    report.skipped += 1;
                }
            }
        }

        tracing::debug!(
            "Loaded {} documents from {} ({} skipped)",
            report.documents.len(),
            self.root.display(),
            report.skipped
        );

        Ok(report)
    }

    fn load_file(&self, path: &Path) -> std::result::Result<Document, LoadError> {
        let io_error = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let text = std::fs::read_to_string(path).map_err(io_error)?;
        let last_updated = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .unwrap_or_else(|_| SystemTime::now());

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let id = document_id(relative);
        let url = self.url_for(&id, relative);

        extract::extract(path, &id, &url, &text, last_updated)
    }

    fn url_for(&self, id: &str, relative: &Path) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base, id),
            None => slash_path(relative),
        }
    }
}

/// Converts a path relative to the source root into a document id:
/// `/`-separated, extension removed.
///
/// `concepts/jetstream.md` → `concepts/jetstream`
pub fn document_id(relative: &Path) -> String {
    slash_path(&relative.with_extension(""))
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
