//! A validated search/replace pair bound to one substitution engine

use crate::error::{RecaseError, RecaseResult};
use crate::fold::contains_folded;
use crate::literal::{replace_insensitive, replace_literal};
use crate::pattern::{
    compile_pattern, compile_pattern_insensitive, lines, replace_regex, replace_regex_lines,
    replace_regex_preserving_case,
};
use crate::preserve::replace_preserving_case;
use crate::span::Replaced;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which engine performs the substitution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceMode {
    /// Exact, case-sensitive literal
    #[default]
    Literal,
    /// Literal compared without regard to case, replacement inserted verbatim
    Insensitive,
    /// Literal compared without regard to case, replacement re-cased per match
    Preserve,
    /// Regular expression over the whole text
    Regex,
    /// Regular expression applied one line at a time
    RegexLines,
    /// Case-insensitive regular expression, replacement re-cased per match
    RegexPreserve,
}

impl ReplaceMode {
    pub const ALL: [ReplaceMode; 6] = [
        ReplaceMode::Literal,
        ReplaceMode::Insensitive,
        ReplaceMode::Preserve,
        ReplaceMode::Regex,
        ReplaceMode::RegexLines,
        ReplaceMode::RegexPreserve,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReplaceMode::Literal => "literal",
            ReplaceMode::Insensitive => "insensitive",
            ReplaceMode::Preserve => "preserve",
            ReplaceMode::Regex => "regex",
            ReplaceMode::RegexLines => "regex_lines",
            ReplaceMode::RegexPreserve => "regex_preserve",
        }
    }

    pub fn is_regex(self) -> bool {
        matches!(
            self,
            ReplaceMode::Regex | ReplaceMode::RegexLines | ReplaceMode::RegexPreserve
        )
    }
}

impl fmt::Display for ReplaceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplaceMode {
    type Err = RecaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ReplaceMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == normalized)
            .ok_or_else(|| RecaseError::unknown_mode(s))
    }
}

/// A search and replacement ready to be applied to any number of texts
///
/// Regex modes compile their pattern once, in [`Replacer::new`]. An empty search is
/// kept as an absent pattern, so every mode treats it as a no-op.
///
/// # Examples
///
/// ```
/// use recase_core::{ReplaceMode, Replacer};
///
/// let replacer = Replacer::new(ReplaceMode::Preserve, "one", "two").unwrap();
/// assert!(replacer.is_match("ONE"));
/// assert_eq!(replacer.apply("One one ONE").as_str(), "Two two TWO");
/// ```
#[derive(Debug, Clone)]
pub struct Replacer {
    mode: ReplaceMode,
    search: String,
    replacement: String,
    pattern: Option<Regex>,
}

impl Replacer {
    /// # Errors
    ///
    /// Returns [`RecaseError::InvalidPattern`] when a regex mode is given a search that
    /// does not compile.
    pub fn new(
        mode: ReplaceMode,
        search: impl Into<String>,
        replacement: impl Into<String>,
    ) -> RecaseResult<Self> {
        let search = search.into();
        let pattern = match mode {
            _ if search.is_empty() => None,
            ReplaceMode::Regex | ReplaceMode::RegexLines => Some(compile_pattern(&search)?),
            ReplaceMode::RegexPreserve => Some(compile_pattern_insensitive(&search)?),
            ReplaceMode::Literal | ReplaceMode::Insensitive | ReplaceMode::Preserve => None,
        };

        Ok(Self {
            mode,
            search,
            replacement: replacement.into(),
            pattern,
        })
    }

    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Run the substitution over `text`
    pub fn apply<'t>(&self, text: &'t str) -> Replaced<'t> {
        let (search, replace) = (self.search.as_str(), self.replacement.as_str());
        let pattern = self.pattern.as_ref();

        match self.mode {
            ReplaceMode::Literal => replace_literal(search, replace, text),
            ReplaceMode::Insensitive => replace_insensitive(search, replace, text),
            ReplaceMode::Preserve => replace_preserving_case(search, replace, text),
            ReplaceMode::Regex => replace_regex(pattern, replace, text),
            ReplaceMode::RegexLines => replace_regex_lines(pattern, replace, text),
            ReplaceMode::RegexPreserve => replace_regex_preserving_case(pattern, replace, text),
        }
    }

    /// True when [`apply`](Self::apply) would find at least one match in `text`
    ///
    /// Used to skip files without producing a substitution.
    pub fn is_match(&self, text: &str) -> bool {
        if self.search.is_empty() {
            return false;
        }

        match (self.mode, &self.pattern) {
            (ReplaceMode::Literal, _) => text.contains(self.search.as_str()),
            (ReplaceMode::Insensitive | ReplaceMode::Preserve, _) => {
                contains_folded(text, &self.search)
            }
            (ReplaceMode::RegexLines, Some(regex)) => {
                lines(text).any(|line| regex.is_match(line))
            }
            (ReplaceMode::Regex | ReplaceMode::RegexPreserve, Some(regex)) => regex.is_match(text),
            (_, None) => false,
        }
    }
}
