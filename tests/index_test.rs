mod common;

use assert2::{check, let_assert};
use common::nats_index;
use docsearch_mcp::{Document, DocumentationIndex, IndexError, SUMMARY_MAX_CHARS};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn nats_scenario_ranks_by_overlap(nats_index: DocumentationIndex) {
    let_assert!(Ok(results) = nats_index.search("nats messaging", 10));
    let ids: Vec<&str> = results.iter().map(|r| r.document_id.as_str()).collect();

    check!(ids.len() == 3);
    check!(ids[0] == "doc1");
    check!(ids.contains(&"doc2"));
    check!(ids.contains(&"doc3"));
    for pair in results.windows(2) {
        check!(pair[0].relevance >= pair[1].relevance);
    }
}

#[rstest]
fn search_is_read_only(nats_index: DocumentationIndex) {
    let before = nats_index.document_frequency("nats");
    let first = nats_index.search("nats messaging", 10).unwrap();
    let second = nats_index.search("nats messaging", 10).unwrap();

    check!(first == second);
    check!(nats_index.document_frequency("nats") == before);
    check!(nats_index.count() == 3);
}

#[rstest]
#[case(0, 0)]
#[case(1, 1)]
#[case(2, 2)]
#[case(100, 3)]
fn result_count_is_capped(nats_index: DocumentationIndex, #[case] limit: usize, #[case] expected: usize) {
    let_assert!(Ok(results) = nats_index.search("nats messaging", limit));
    check!(results.len() == expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn blank_queries_are_rejected(nats_index: DocumentationIndex, #[case] query: &str) {
    for limit in [0, 1, 10] {
        let_assert!(Err(IndexError::InvalidArgument(_)) = nats_index.search(query, limit));
    }
}

#[rstest]
fn punctuation_only_query_matches_nothing(nats_index: DocumentationIndex) {
    let_assert!(Ok(results) = nats_index.search("?!", 10));
    check!(results.is_empty());
}

#[rstest]
fn no_false_positives(nats_index: DocumentationIndex) {
    let_assert!(Ok(results) = nats_index.search("kafka", 10));
    check!(results.len() == 1);
    check!(results[0].document_id == "doc3");
}

#[test]
fn title_only_document_is_searchable() {
    let index = DocumentationIndex::new();
    index
        .index(Document::new("empty").with_title("Empty Content Document"))
        .unwrap();

    let_assert!(Ok(results) = index.search("empty", 10));
    check!(results.len() == 1);
    check!(results[0].document_id == "empty");
    check!(results[0].relevance > 0.0);
}

#[test]
fn reindex_replaces_statistics() {
    let index = DocumentationIndex::new();
    index
        .index(Document::new("page").with_content("alpha alpha beta"))
        .unwrap();
    index
        .index(Document::new("other").with_content("beta"))
        .unwrap();
    let count = index.count();

    index
        .index(Document::new("page").with_content("gamma"))
        .unwrap();

    check!(index.count() == count);
    check!(index.document_frequency("alpha") == 0);
    check!(index.document_frequency("beta") == 1);
    check!(index.term_frequency("page", "gamma") == 1);
    check!(index.tf_idf("page", "alpha") == 0.0);

    let_assert!(Ok(doc) = index.get("page"));
    check!(doc.content == "gamma");
}

#[test]
fn reindex_matches_fresh_index() {
    let reindexed = DocumentationIndex::new();
    reindexed
        .index(Document::new("a").with_content("one two two"))
        .unwrap();
    reindexed
        .index(Document::new("b").with_content("two three"))
        .unwrap();
    reindexed
        .index(Document::new("a").with_content("three four"))
        .unwrap();

    let fresh = DocumentationIndex::new();
    fresh
        .index(Document::new("b").with_content("two three"))
        .unwrap();
    fresh
        .index(Document::new("a").with_content("three four"))
        .unwrap();

    for term in ["one", "two", "three", "four"] {
        check!(reindexed.document_frequency(term) == fresh.document_frequency(term));
        check!(reindexed.tf_idf("a", term) == fresh.tf_idf("a", term));
    }
    check!(reindexed.term_count() == fresh.term_count());
}

#[test]
fn relevance_grows_with_term_frequency() {
    let index = DocumentationIndex::new();
    index
        .index(Document::new("many").with_content("stream stream stream"))
        .unwrap();
    index
        .index(Document::new("one").with_content("stream"))
        .unwrap();
    index
        .index(Document::new("none").with_content("bucket"))
        .unwrap();

    check!(index.relevance("stream", "many") > index.relevance("stream", "one"));
    check!(index.relevance("stream", "none") == 0.0);
}

#[rstest]
#[case("hello")]
#[case("HELLO")]
#[case("Hello,")]
#[case("(hello)")]
fn tokenization_is_symmetric(#[case] query: &str) {
    let index = DocumentationIndex::new();
    index
        .index(Document::new("greeting").with_content("Hello, world!"))
        .unwrap();

    let_assert!(Ok(results) = index.search(query, 10));
    check!(results.len() == 1);
}

#[test]
fn summaries_are_bounded() {
    let index = DocumentationIndex::new();
    let long = "subjects ".repeat(400);
    index
        .index(Document::new("long").with_content(long))
        .unwrap();
    index
        .index(Document::new("short").with_content("subjects"))
        .unwrap();

    let_assert!(Ok(results) = index.search("subjects", 10));
    check!(results.len() == 2);
    for result in &results {
        check!(result.summary.chars().count() <= SUMMARY_MAX_CHARS);
    }
}

#[test]
fn get_unknown_id_is_not_found() {
    let index = DocumentationIndex::new();
    let_assert!(Err(IndexError::NotFound { id }) = index.get("missing"));
    check!(id == "missing");
}

#[test]
fn concurrent_reindex_keeps_index_consistent() {
    let index = Arc::new(DocumentationIndex::new());
    for i in 0..20 {
        index
            .index(Document::new(format!("page{i}")).with_content("shared words here"))
            .unwrap();
    }

    std::thread::scope(|scope| {
        for writer in 0..2 {
            let index = Arc::clone(&index);
            scope.spawn(move || {
                for round in 0..200 {
                    let id = format!("page{}", (round + writer) % 20);
                    let content = if round % 2 == 0 {
                        "shared words here"
                    } else {
                        "shared other text"
                    };
                    index
                        .index(Document::new(id).with_content(content))
                        .unwrap();
                }
            });
        }
        for _ in 0..4 {
            let index = Arc::clone(&index);
            scope.spawn(move || {
                for _ in 0..200 {
                    check!(index.count() == 20);
                    check!(index.document_frequency("shared") == 20);
                    let results = index.search("shared", 100).unwrap();
                    check!(results.len() == 20);
                }
            });
        }
    });

    check!(index.count() == 20);
    check!(index.document_frequency("words") + index.document_frequency("other") == 20);
}
