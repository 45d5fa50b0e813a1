//! Case-preserving literal replacement
//!
//! Occurrences of the search string are found without regard to case, and each one is
//! replaced by the replacement rendered in the case style of that particular instance.
//!
//! # Examples
//!
//! ```
//! use recase_core::preserve::replace_preserving_case;
//!
//! let result = replace_preserving_case("user-name", "account-id", "userName, USER_NAME, user-name");
//! assert_eq!(result.as_str(), "userName, USER_NAME, account-id");
//!
//! let result = replace_preserving_case("one", "two", "One one ONE");
//! assert_eq!(result.as_str(), "Two two TWO");
//! ```
//!
//! # Degrading to literal replacement
//!
//! When `search` or `replace` contains whitespace, a case style cannot be attributed to
//! a single token and the call behaves exactly like
//! [`replace_literal`](crate::literal::replace_literal): matching is case-sensitive and the
//! replacement is inserted verbatim.

use crate::case_style::detect_case_style;
use crate::fold::FoldedMatches;
use crate::literal::{is_noop, replace_literal};
use crate::span::{splice, Replaced};
use tracing::{debug, trace};

/// True when case styles can be attributed to matches of `search` replaced by `replace`
pub fn can_preserve(search: &str, replace: &str) -> bool {
    !search
        .chars()
        .chain(replace.chars())
        .any(char::is_whitespace)
}

/// Replace every case-insensitive occurrence of `search`, re-rendering `replace` in the
/// case style of each matched instance
///
/// A match whose style is unknown (say `HTTPServer`) receives `replace` unchanged.
pub fn replace_preserving_case<'t>(search: &str, replace: &str, text: &'t str) -> Replaced<'t> {
    if !can_preserve(search, replace) {
        debug!(search, replace, "whitespace in search or replacement, case not preserved");
        return replace_literal(search, replace, text);
    }
    if is_noop(search, replace) {
        return Replaced::unchanged(text);
    }

    let result = splice(text, FoldedMatches::new(text, search), |span, out| {
        out.push_str(&detect_case_style(span.matched).apply(replace));
    });
    trace!(count = result.count, "case-preserving replace");
    result
}
