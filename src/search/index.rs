//! The documentation index: document store and term statistics behind one lock.

use crate::error::IndexError;
use crate::types::{Document, SearchResult};
use ahash::AHashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::scoring::{Scored, rank, summarize};
use super::store::DocumentStore;
use super::terms::TermStatistics;
use super::tokenize::tokenize;

/// Everything a single update has to change atomically.
#[derive(Debug, Default)]
struct IndexState {
    store: DocumentStore,
    terms: TermStatistics,
}

/// In-memory searchable index of documentation pages.
///
/// Reads ([`get`](Self::get), [`count`](Self::count), [`search`](Self::search))
/// share a read lock and run in parallel. [`index`](Self::index) takes the write
/// lock for its whole retract-then-add, so a reader sees a page either entirely
/// before or entirely after an update, and never a page present in the store
/// without statistics or the other way round.
///
/// Create one per process and share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct DocumentationIndex {
    state: RwLock<IndexState>,
}

impl DocumentationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the state half-updated:
    // `index` only mutates after every fallible step has passed.
    fn read(&self) -> RwLockReadGuard<'_, IndexState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds `doc`, or replaces the page already indexed under `doc.id`.
    ///
    /// The previous version's statistics are retracted before the new text is
    /// counted, so re-indexing leaves document frequencies and the document count
    /// exactly as if only the latest version had ever been indexed. A page with
    /// only a title is valid.
    pub fn index(&self, doc: Document) -> Result<(), IndexError> {
        if doc.id.trim().is_empty() {
            return Err(IndexError::invalid("document id must not be empty"));
        }

        let text = doc.searchable_text();

        let mut state = self.write();
        if state.store.contains(&doc.id) {
            state.terms.remove_document(&doc.id);
        }
        state.terms.add_document(&doc.id, &text);
        state.store.add(doc);

        Ok(())
    }

    /// Returns the most recently indexed version of the page.
    pub fn get(&self, id: &str) -> Result<Arc<Document>, IndexError> {
        self.read().store.get(id)
    }

    /// Number of distinct pages currently indexed.
    pub fn count(&self) -> usize {
        self.read().store.len()
    }

    /// Ranked pages matching `query`, best first, at most `limit` of them.
    ///
    /// Fails only for an empty or whitespace-only query. A query without any
    /// searchable terms (pure punctuation) matches nothing; pages sharing no term
    /// with the query are never returned. Equal scores are ordered by id.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, IndexError> {
        if query.trim().is_empty() {
            return Err(IndexError::invalid("search query must not be empty"));
        }

        let terms: AHashSet<String> = tokenize(query).into_iter().collect();
        if terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let state = self.read();
        let scored: Vec<Scored<'_>> = state
            .terms
            .document_ids()
            .map(|id| Scored {
                id,
                relevance: state.terms.relevance_of_terms(&terms, id),
            })
            .collect();

        let results = rank(scored, limit)
            .into_iter()
            .filter_map(|hit| {
                let doc = state.store.get(hit.id).ok()?;
                Some(SearchResult {
                    document_id: doc.id.clone(),
                    title: doc.title.clone(),
                    url: doc.url.clone(),
                    relevance: hit.relevance,
                    summary: summarize(&doc.content, &doc.title),
                })
            })
            .collect();

        Ok(results)
    }

    /// Sum of TF-IDF weights of the distinct terms of `query` for one page.
    pub fn relevance(&self, query: &str, id: &str) -> f64 {
        self.read().terms.relevance(query, id)
    }

    /// Occurrences of a normalized term in a page's searchable text.
    pub fn term_frequency(&self, id: &str, term: &str) -> usize {
        self.read().terms.term_frequency(id, term)
    }

    /// Number of pages containing a normalized term.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.read().terms.document_frequency(term)
    }

    /// TF-IDF weight of a normalized term in one page.
    pub fn tf_idf(&self, id: &str, term: &str) -> f64 {
        self.read().terms.tf_idf(id, term)
    }

    /// Number of distinct terms across all pages.
    pub fn term_count(&self) -> usize {
        self.read().terms.term_count()
    }

    /// Ids of all indexed pages, sorted.
    pub fn document_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().store.ids().map(str::to_string).collect();
        ids.sort_unstable();
        ids
    }

    /// Checks that the store and the statistics agree on the document count.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        let state = self.read();
        state.store.len() == state.terms.total_documents()
            && state.terms.document_ids().all(|id| state.store.contains(id))
    }
}
