//! Conversion of raw page text into indexable [`Document`]s.

pub mod markdown;

use crate::error::LoadError;
use crate::types::Document;
use std::path::Path;
use std::time::SystemTime;

/// Page formats with an extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Markdown,
    PlainText,
}

impl DocumentKind {
    /// Picks the extractor from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "md" | "markdown" | "mdx" => Some(Self::Markdown),
            "txt" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Extracts a document from the text of the file at `path`.
pub fn extract(
    path: &Path,
    id: &str,
    url: &str,
    text: &str,
    last_updated: SystemTime,
) -> Result<Document, LoadError> {
    match DocumentKind::from_path(path) {
        Some(DocumentKind::Markdown) => Ok(markdown::parse(id, url, text, last_updated)),
        Some(DocumentKind::PlainText) => Ok(plain_text(id, url, text, last_updated)),
        None => Err(LoadError::Unsupported {
            path: path.to_path_buf(),
        }),
    }
}

/// Unstructured text: the first non-empty line is the title, there are no sections.
pub fn plain_text(id: &str, url: &str, text: &str, last_updated: SystemTime) -> Document {
    let title = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map_or_else(|| markdown::fallback_title(id), str::to_string);

    Document::new(id)
        .with_title(title)
        .with_url(url)
        .with_content(text.trim())
        .with_last_updated(last_updated)
}
