//! Keyword search over the indexed documentation.

use crate::server::DocState;
use crate::types::SearchResult;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Keywords to search for
    pub query: String,
    /// Maximum number of results to return (default: server setting)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Run a ranked search and format the hits for display.
pub fn handle_search(state: &DocState, request: SearchRequest) -> Result<String, String> {
    let limit = state.config().effective_limit(request.limit);
    let results = state
        .index()
        .search(&request.query, limit)
        .map_err(|e| e.to_string())?;

    if results.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", request.query.trim());

        msg.push_str("Search tips:\n");
        msg.push_str("• Try fewer or more general keywords\n");
        msg.push_str("• Matching is exact per word: 'stream' does not match 'streams'\n");
        msg.push_str("• Punctuation and case are ignored\n");
        if limit == 0 {
            msg.push_str("• The requested limit was 0\n");
        }

        return Ok(msg);
    }

    Ok(format_search_results(
        &results,
        &request.query,
        state.index().count(),
    ))
}

/// Format search results into a readable string output.
fn format_search_results(results: &[SearchResult], query: &str, total_documents: usize) -> String {
    let mut output = format!(
        "Search results for '{}' ({} of {} documents):\n\n",
        query.trim(),
        results.len(),
        total_documents
    );

    for (idx, result) in results.iter().enumerate() {
        let title = if result.title.is_empty() {
            result.document_id.as_str()
        } else {
            result.title.as_str()
        };

        let _ = writeln!(
            output,
            "{}. **{}** (`{}`) - relevance: {:.2}",
            idx + 1,
            title,
            result.document_id,
            result.relevance
        );
        if !result.url.is_empty() {
            let _ = writeln!(output, "   URL: {}", result.url);
        }
        if !result.summary.is_empty() {
            let _ = writeln!(output, "   {}", result.summary);
        }
        output.push('\n');
    }

    output
}
