//! Regular-expression substitution
//!
//! Regex analogs of the literal engines: whole-text replacement, line-scoped replacement,
//! and case-preserving replacement. Replacement strings use the regex crate's template
//! syntax, so `$1`, `${name}` and `$$` resolve against each match's captures.
//!
//! Patterns are compiled up front with [`compile_pattern`]; the substitution functions
//! take an already-compiled (or absent) pattern and never fail.

use crate::case_style::detect_case_style;
use crate::error::{RecaseError, RecaseResult};
use crate::preserve::can_preserve;
use crate::span::{splice, MatchSpan, Replaced};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use tracing::{debug, trace};

/// Compile a search pattern
///
/// # Errors
///
/// Returns [`RecaseError::InvalidPattern`] when the pattern is not a valid regular
/// expression or exceeds the regex crate's size limits.
pub fn compile_pattern(pattern: &str) -> RecaseResult<Regex> {
    Regex::new(pattern).map_err(|e| RecaseError::invalid_pattern(pattern, e.to_string()))
}

/// Compile a search pattern that matches without regard to case
///
/// # Errors
///
/// Same as [`compile_pattern`].
pub fn compile_pattern_insensitive(pattern: &str) -> RecaseResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| RecaseError::invalid_pattern(pattern, e.to_string()))
}

/// Replace every match of `pattern` in `text`, expanding capture references in `replace`
///
/// An absent pattern substitutes nothing.
///
/// # Examples
///
/// ```
/// use recase_core::pattern::{compile_pattern, replace_regex};
///
/// let pattern = compile_pattern(r"(\w+)_(\w+)").unwrap();
/// let result = replace_regex(Some(&pattern), "${2}_${1}", "user_name and item_count");
/// assert_eq!(result.as_str(), "name_user and count_item");
/// assert_eq!(result.count, 2);
/// ```
pub fn replace_regex<'t>(pattern: Option<&Regex>, replace: &str, text: &'t str) -> Replaced<'t> {
    let Some(regex) = pattern else {
        return Replaced::unchanged(text);
    };

    let result = expand_matches(regex, text, replace, |_, raw| raw);
    trace!(pattern = regex.as_str(), count = result.count, "regex replace");
    result
}

/// Replace matches of `pattern` one line at a time
///
/// Each line is matched on its own with its `\n` terminator attached, so a pattern can
/// never match across a line break. Line terminators are preserved exactly, including
/// the absence of one on the last line.
///
/// # Examples
///
/// ```
/// use recase_core::pattern::{compile_pattern, replace_regex, replace_regex_lines};
///
/// let pattern = compile_pattern(r"end\nstart").unwrap();
/// let text = "the end\nstart again";
/// assert_eq!(replace_regex(Some(&pattern), "|", text).count, 1);
/// assert_eq!(replace_regex_lines(Some(&pattern), "|", text).count, 0);
/// ```
pub fn replace_regex_lines<'t>(
    pattern: Option<&Regex>,
    replace: &str,
    text: &'t str,
) -> Replaced<'t> {
    let Some(regex) = pattern else {
        return Replaced::unchanged(text);
    };

    let mut out = String::with_capacity(text.len());
    let mut count = 0;
    for line in lines(text) {
        let replaced = replace_regex(Some(regex), replace, line);
        count += replaced.count;
        out.push_str(&replaced.text);
    }

    trace!(pattern = regex.as_str(), count, "regex line replace");
    if count == 0 {
        return Replaced::unchanged(text);
    }
    Replaced {
        text: Cow::Owned(out),
        count,
    }
}

/// The lines [`replace_regex_lines`] matches one at a time, terminators attached
///
/// A text that is empty or ends in `\n` also yields a final empty line, so patterns that
/// match the empty string see it.
pub(crate) fn lines(text: &str) -> impl Iterator<Item = &str> {
    let trailing = (text.is_empty() || text.ends_with('\n')).then_some("");
    text.split_inclusive('\n').chain(trailing)
}

/// Replace every match of `pattern`, rendering each expanded replacement in the case
/// style of the text it replaces
///
/// When the pattern source or `replace` contains whitespace the call degrades to
/// [`replace_regex`], the same gate the literal engine applies.
///
/// # Examples
///
/// ```
/// use recase_core::pattern::{compile_pattern_insensitive, replace_regex_preserving_case};
///
/// let pattern = compile_pattern_insensitive(r"user([-_]?)name").unwrap();
/// let result = replace_regex_preserving_case(
///     Some(&pattern),
///     "account${1}id",
///     "user_name, USER_NAME, user-name",
/// );
/// assert_eq!(result.as_str(), "account_id, ACCOUNT_ID, account-id");
/// ```
pub fn replace_regex_preserving_case<'t>(
    pattern: Option<&Regex>,
    replace: &str,
    text: &'t str,
) -> Replaced<'t> {
    let Some(regex) = pattern else {
        return Replaced::unchanged(text);
    };
    if !can_preserve(regex.as_str(), replace) {
        debug!(
            pattern = regex.as_str(),
            replace, "whitespace in pattern or replacement, case not preserved"
        );
        return replace_regex(Some(regex), replace, text);
    }

    let result = expand_matches(regex, text, replace, |span, raw| {
        detect_case_style(span.matched).apply(&raw)
    });
    trace!(pattern = regex.as_str(), count = result.count, "case-preserving regex replace");
    result
}

/// Splice in the capture-expanded replacement for every match, passed through `adjust`
fn expand_matches<'t, F>(regex: &Regex, text: &'t str, replace: &str, mut adjust: F) -> Replaced<'t>
where
    F: FnMut(&MatchSpan<'t>, String) -> String,
{
    let expanded = regex.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let mut raw = String::new();
        caps.expand(replace, &mut raw);
        Some((MatchSpan::new(text, whole.start(), whole.end()), raw))
    });

    splice(text, expanded, |(span, raw), out| out.push_str(&adjust(&span, raw)))
}
