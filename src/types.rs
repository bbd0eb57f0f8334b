//! Documentation page model shared by extraction, indexing and the tool layer.

use crate::error::IndexError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::SystemTime;

/// Markdown-style heading depth, always within `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Top-level heading (`#`).
    pub const H1: Self = Self(1);

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = IndexError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(IndexError::InvalidArgument(format!(
                "heading level must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                level
            )))
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

/// A titled block of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub content: String,
    pub level: HeadingLevel,
}

impl Section {
    pub fn new(heading: impl Into<String>, content: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
            level,
        }
    }
}

/// A page of documentation.
///
/// `id` is the only identity: indexing a document whose `id` is already known
/// replaces the previous version entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Caller-assigned key, typically a URL path like `concepts/jetstream`
    pub id: String,
    pub title: String,
    /// Display-only location of the page
    pub url: String,
    /// Full plain-text body
    pub content: String,
    pub sections: Vec<Section>,
    /// Informational only; never used for ranking
    pub last_updated: SystemTime,
}

impl Document {
    /// Create an empty document with the given id, stamped with the current time.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            url: String::new(),
            content: String::new(),
            sections: Vec::new(),
            last_updated: SystemTime::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_sections(mut self, sections: Vec<Section>) -> Self {
        self.sections = sections;
        self
    }

    pub fn with_last_updated(mut self, last_updated: SystemTime) -> Self {
        self.last_updated = last_updated;
        self
    }

    /// Text that gets indexed for this page: title, body, then every section
    /// heading and body. Headings count toward term frequency like body text.
    pub fn searchable_text(&self) -> String {
        let capacity = self.title.len()
            + self.content.len()
            + self
                .sections
                .iter()
                .map(|s| s.heading.len() + s.content.len() + 2)
                .sum::<usize>()
            + 2;

        let mut text = String::with_capacity(capacity);
        text.push_str(&self.title);
        text.push('\n');
        text.push_str(&self.content);
        for section in &self.sections {
            text.push('\n');
            text.push_str(&section.heading);
            text.push('\n');
            text.push_str(&section.content);
        }
        text
    }
}

/// One ranked hit produced by a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document_id: String,
    pub title: String,
    pub url: String,
    pub relevance: f64,
    /// Leading part of the page body, capped at
    /// [`SUMMARY_MAX_CHARS`](crate::search::SUMMARY_MAX_CHARS) characters
    pub summary: String,
}
