//! Core substitution engines for recase
//!
//! Everything in this crate is a pure function over in-memory text:
//! - [`case_style`]: detect a token's lexical case style and re-render text in a style
//! - [`literal`]: exact and case-insensitive literal replacement
//! - [`preserve`]: case-insensitive literal replacement that re-derives the replacement's
//!   case for every matched instance
//! - [`pattern`]: regular-expression counterparts (whole text, per line, case preserving)
//! - [`vars`]: `$name` / `${name}` variable expansion
//! - [`replacer`]: a validated search/replace pair dispatching to one of the engines
//!
//! The only fallible operation is compiling a search pattern. Substitution functions
//! never fail, and a call that substitutes nothing hands back the input text itself.

pub mod case_style;
pub mod error;
mod fold;
pub mod literal;
pub mod pattern;
pub mod preserve;
pub mod replacer;
pub mod span;
pub mod vars;

pub use case_style::{
    apply_case_style, detect_case_style, profile_case, split_words, CaseProfile, CaseStyle,
};
pub use error::{RecaseError, RecaseResult};
pub use literal::{replace_insensitive, replace_literal};
pub use pattern::{
    compile_pattern, compile_pattern_insensitive, replace_regex, replace_regex_lines,
    replace_regex_preserving_case,
};
pub use preserve::{can_preserve, replace_preserving_case};
pub use replacer::{ReplaceMode, Replacer};
pub use span::{MatchSpan, Replaced};
pub use vars::expand_vars;
