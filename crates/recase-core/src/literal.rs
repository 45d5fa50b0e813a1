//! Literal string replacement
//!
//! Exact and case-insensitive whole-string replacement with match counting. Matches are
//! found left to right and the scan resumes after each match's end, so overlapping
//! candidates (`"aa"` in `"aaa"`) are never double counted.

use crate::fold::FoldedMatches;
use crate::span::{splice, MatchSpan, Replaced};
use std::iter::Map;
use std::str::MatchIndices;
use tracing::trace;

/// An empty search, or a search identical to its replacement, never substitutes anything
pub(crate) fn is_noop(search: &str, replace: &str) -> bool {
    search.is_empty() || search == replace
}

/// Exact, case-sensitive matches of `search` in `text`
#[allow(clippy::type_complexity)]
pub(crate) fn literal_matches<'t, 's>(
    text: &'t str,
    search: &'s str,
) -> Map<MatchIndices<'t, &'s str>, fn((usize, &'t str)) -> MatchSpan<'t>> {
    text.match_indices(search)
        .map(to_span as fn((usize, &'t str)) -> MatchSpan<'t>)
}

fn to_span<'t>((start, matched): (usize, &'t str)) -> MatchSpan<'t> {
    MatchSpan { start, matched }
}

/// Replace every exact occurrence of `search` with `replace`
///
/// # Examples
///
/// ```
/// use recase_core::literal::replace_literal;
///
/// let result = replace_literal("one", "two", "One one ONE");
/// assert_eq!(result.as_str(), "One two ONE");
/// assert_eq!(result.count, 1);
/// ```
pub fn replace_literal<'t>(search: &str, replace: &str, text: &'t str) -> Replaced<'t> {
    if is_noop(search, replace) {
        return Replaced::unchanged(text);
    }

    let result = splice(text, literal_matches(text, search), |_, out| out.push_str(replace));
    trace!(count = result.count, "literal replace");
    result
}

/// Replace every occurrence of `search`, compared without regard to case, with `replace`
///
/// The replacement is inserted exactly as given; the matched instance's case is dropped.
///
/// # Examples
///
/// ```
/// use recase_core::literal::replace_insensitive;
///
/// let result = replace_insensitive("one", "two", "One one ONE");
/// assert_eq!(result.as_str(), "two two two");
/// assert_eq!(result.count, 3);
/// ```
pub fn replace_insensitive<'t>(search: &str, replace: &str, text: &'t str) -> Replaced<'t> {
    if is_noop(search, replace) {
        return Replaced::unchanged(text);
    }

    let result = splice(text, FoldedMatches::new(text, search), |_, out| out.push_str(replace));
    trace!(count = result.count, "case-insensitive replace");
    result
}
