//! Result ordering and summary extraction.

use std::cmp::Ordering;

/// Upper bound on summary length, in characters.
pub const SUMMARY_MAX_CHARS: usize = 250;

/// Appended to summaries that were cut short; counted inside the cap.
const ELLIPSIS: &str = "...";

/// A document id paired with its relevance for one query.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Scored<'a> {
    pub(crate) id: &'a str,
    pub(crate) relevance: f64,
}

/// Orders by relevance descending, then id ascending so equal scores always
/// come back in the same order.
fn by_rank(a: &Scored<'_>, b: &Scored<'_>) -> Ordering {
    b.relevance
        .total_cmp(&a.relevance)
        .then_with(|| a.id.cmp(b.id))
}

/// Drops non-positive scores, sorts, and keeps at most `limit` entries.
pub(crate) fn rank(mut scored: Vec<Scored<'_>>, limit: usize) -> Vec<Scored<'_>> {
    if limit == 0 {
        return Vec::new();
    }
    scored.retain(|s| s.relevance > 0.0);
    scored.sort_by(by_rank);
    scored.truncate(limit);
    scored
}

/// Builds a short preview of `content`, falling back to `title` when the page
/// has no body.
///
/// Whitespace runs collapse to single spaces. Text longer than
/// [`SUMMARY_MAX_CHARS`] is cut at the last word boundary that leaves room for
/// `...`; a single overlong word is cut mid-word.
pub(crate) fn summarize(content: &str, title: &str) -> String {
    let source = if content.trim().is_empty() { title } else { content };
    let collapsed = source.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= SUMMARY_MAX_CHARS {
        return collapsed;
    }

    let budget = SUMMARY_MAX_CHARS - ELLIPSIS.len();
    // Byte offset of the first character past the budget
    let cut = collapsed
        .char_indices()
        .nth(budget)
        .map_or(collapsed.len(), |(offset, _)| offset);
    let head = &collapsed[..cut];

    // Prefer ending on a whole word when the next character starts a new one
    let head = if collapsed[cut..].starts_with(' ') {
        head
    } else {
        match head.rfind(' ') {
            Some(space) if space > 0 => &head[..space],
            _ => head,
        }
    };

    format!("{}{}", head.trim_end(), ELLIPSIS)
}
