//! Term and document frequency tables with TF-IDF scoring.

use ahash::{AHashMap, AHashSet};

use super::tokenize::tokenize;

/// Per-document term counts plus corpus-wide document frequencies.
///
/// Invariants maintained by [`add_document`](Self::add_document) and
/// [`remove_document`](Self::remove_document):
/// - `document_frequency[t]` equals the number of documents whose term map holds `t`
/// - no term is stored with a zero count, in either table
/// - `total_documents` equals the number of entries in `term_frequency`
#[derive(Debug, Default)]
pub(crate) struct TermStatistics {
    /// doc_id → term → occurrences in that document
    term_frequency: AHashMap<String, AHashMap<String, usize>>,
    /// term → number of documents containing it
    document_frequency: AHashMap<String, usize>,
    total_documents: usize,
}

impl TermStatistics {
    /// Counts every term of `text` against `doc_id`.
    ///
    /// Calling this again for a `doc_id` that was not removed first accumulates
    /// the new counts on top of the old ones; replacing a document means
    /// [`remove_document`](Self::remove_document) then `add_document`.
    pub(crate) fn add_document(&mut self, doc_id: &str, text: &str) {
        let words = tokenize(text);
        let mut occurrences: AHashMap<String, usize> = AHashMap::with_capacity(words.len());
        for word in words {
            *occurrences.entry(word).or_insert(0) += 1;
        }

        // A document without any terms still counts toward the corpus size.
        if !self.term_frequency.contains_key(doc_id) {
            self.total_documents += 1;
        }
        let counts = self.term_frequency.entry(doc_id.to_string()).or_default();

        for (term, occurrences) in occurrences {
            let count = counts.entry(term.clone()).or_insert(0);
            if *count == 0 {
                *self.document_frequency.entry(term).or_insert(0) += 1;
            }
            *count += occurrences;
        }
    }

    /// Retracts everything `doc_id` contributed. Unknown ids are ignored.
    pub(crate) fn remove_document(&mut self, doc_id: &str) {
        let Some(counts) = self.term_frequency.remove(doc_id) else {
            return;
        };

        for term in counts.keys() {
            if let Some(df) = self.document_frequency.get_mut(term) {
                *df = df.saturating_sub(1);
                if *df == 0 {
                    self.document_frequency.remove(term);
                }
            }
        }

        self.total_documents = self.total_documents.saturating_sub(1);
    }

    /// Raw occurrence count of `term` in `doc_id`, 0 when either is unknown.
    pub(crate) fn term_frequency(&self, doc_id: &str, term: &str) -> usize {
        self.term_frequency
            .get(doc_id)
            .and_then(|counts| counts.get(term))
            .copied()
            .unwrap_or(0)
    }

    /// Number of documents containing `term`, 0 when never seen.
    pub(crate) fn document_frequency(&self, term: &str) -> usize {
        self.document_frequency.get(term).copied().unwrap_or(0)
    }

    pub(crate) const fn total_documents(&self) -> usize {
        self.total_documents
    }

    /// Number of distinct terms across all documents.
    pub(crate) fn term_count(&self) -> usize {
        self.document_frequency.len()
    }

    /// Inverse document frequency: `ln(1 + N / df)`, or 0 for unseen terms.
    ///
    /// `N` is clamped to at least 1. The `1 +` keeps the weight positive for a
    /// term found in every document, so a match always scores above zero.
    pub(crate) fn idf(&self, term: &str) -> f64 {
        let df = self.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        let total = self.total_documents.max(1) as f64;
        (1.0 + total / df as f64).ln()
    }

    /// `tf(doc_id, term) * idf(term)`.
    pub(crate) fn tf_idf(&self, doc_id: &str, term: &str) -> f64 {
        let tf = self.term_frequency(doc_id, term);
        if tf == 0 {
            return 0.0;
        }
        tf as f64 * self.idf(term)
    }

    /// Sum of TF-IDF over the distinct terms of `query`.
    ///
    /// Repeating a word in the query does not weigh it twice.
    pub(crate) fn relevance(&self, query: &str, doc_id: &str) -> f64 {
        let terms: AHashSet<String> = tokenize(query).into_iter().collect();
        self.relevance_of_terms(&terms, doc_id)
    }

    /// [`relevance`](Self::relevance) for an already tokenized, deduplicated query.
    pub(crate) fn relevance_of_terms(&self, terms: &AHashSet<String>, doc_id: &str) -> f64 {
        let Some(counts) = self.term_frequency.get(doc_id) else {
            return 0.0;
        };

        terms
            .iter()
            .filter_map(|term| counts.get(term).map(|&tf| tf as f64 * self.idf(term)))
            .sum()
    }

    /// Ids of every document with statistics.
    pub(crate) fn document_ids(&self) -> impl Iterator<Item = &str> {
        self.term_frequency.keys().map(String::as_str)
    }
}
