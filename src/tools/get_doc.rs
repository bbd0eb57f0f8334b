//! Retrieval of a single page by id.

use crate::error::IndexError;
use crate::server::DocState;
use crate::types::Document;
use rapidfuzz::distance::jaro_winkler;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Minimum Jaro-Winkler similarity for an id to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDocRequest {
    /// Page id as shown in search results, e.g. `concepts/subjects`
    pub id: String,
}

pub fn handle_get_doc(state: &DocState, request: GetDocRequest) -> Result<String, String> {
    let id = request.id.trim();
    match state.index().get(id) {
        Ok(doc) => Ok(format_document(&doc)),
        Err(IndexError::NotFound { id }) => {
            let mut msg = format!("Document '{}' not found.", id);
            let ids = state.index().document_ids();
            let suggestions = suggest_ids(&ids, &id);
            if !suggestions.is_empty() {
                msg.push_str(" Did you mean one of these?\n\n");
                for suggestion in suggestions {
                    let _ = writeln!(msg, "• `{}`", suggestion);
                }
            }
            Err(msg)
        }
        Err(e) => Err(e.to_string()),
    }
}

/// Known ids most similar to `id`, best first.
fn suggest_ids<'a>(ids: &'a [String], id: &str) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &str)> = ids
        .iter()
        .map(|candidate| {
            (
                jaro_winkler::similarity(candidate.chars(), id.chars()),
                candidate.as_str(),
            )
        })
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, candidate)| candidate)
        .collect()
}

fn format_document(doc: &Document) -> String {
    let title = if doc.title.is_empty() {
        doc.id.as_str()
    } else {
        doc.title.as_str()
    };

    let mut output = format!("# {}\n\n", title);
    let _ = writeln!(output, "ID: `{}`", doc.id);
    if !doc.url.is_empty() {
        let _ = writeln!(output, "URL: {}", doc.url);
    }

    if !doc.sections.is_empty() {
        output.push_str("\nSections:\n");
        for section in &doc.sections {
            let indent = "  ".repeat(usize::from(section.level.get() - 1));
            let _ = writeln!(output, "{}- {}", indent, section.heading);
        }
    }

    output.push('\n');
    if doc.content.is_empty() {
        output.push_str("(This page has no body text.)\n");
    } else {
        output.push_str(&doc.content);
        output.push('\n');
    }

    output
}
