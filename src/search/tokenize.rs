//! Text normalization shared by indexing and querying.
//!
//! Every term that enters the statistics tables and every term extracted from a
//! query goes through [`tokenize`]. Keeping a single entry point is what makes a
//! query for `"HELLO,"` find a page that says `hello`.

/// Splits text into normalized terms.
///
/// - Letters are lower-cased (Unicode-aware, so `"Straße"` stays one term)
/// - Every character that is not alphanumeric separates terms, which covers
///   whitespace as well as punctuation: `"Hello, world!"` → `["hello", "world"]`
/// - Empty fragments are discarded
///
/// Terms are returned in order of appearance, duplicates included, since the
/// caller counts occurrences.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_lowercase)
        .collect()
}
