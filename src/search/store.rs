//! Canonical storage of indexed pages.

use crate::error::IndexError;
use crate::types::Document;
use ahash::AHashMap;
use std::sync::Arc;

/// Pages keyed by their id.
///
/// Documents are held behind `Arc` so a reader can keep the version it looked up
/// while a writer swaps in a replacement: lookups hand out either the old or the
/// new page, never a mix. The store itself is not locked; it lives inside
/// [`DocumentationIndex`](super::DocumentationIndex), whose lock covers it
/// together with the term statistics.
#[derive(Debug, Default)]
pub(crate) struct DocumentStore {
    documents: AHashMap<String, Arc<Document>>,
}

impl DocumentStore {
    /// Inserts or replaces the page under `doc.id`, returning the previous version.
    pub(crate) fn add(&mut self, doc: Document) -> Option<Arc<Document>> {
        self.documents.insert(doc.id.clone(), Arc::new(doc))
    }

    pub(crate) fn get(&self, id: &str) -> Result<Arc<Document>, IndexError> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| IndexError::not_found(id))
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}
