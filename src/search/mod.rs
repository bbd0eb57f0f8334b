//! In-memory full-text search over documentation pages.
//!
//! This module provides TF-IDF ranked search: a shared tokenizer, a document
//! store, term/document frequency tables, and the [`DocumentationIndex`] facade
//! that keeps them consistent under concurrent access.

// Module declarations
pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod store;
pub(crate) mod terms;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use index::DocumentationIndex;
pub use scoring::SUMMARY_MAX_CHARS;
