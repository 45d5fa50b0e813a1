//! Case style detection and rendering
//!
//! This module detects which lexical naming convention (case style) a token is written
//! in and re-renders arbitrary text in a chosen style. The case-preserving engines use
//! it to carry the casing of every matched instance over to its replacement.
//!
//! # Examples
//!
//! ```
//! use recase_core::case_style::{apply_case_style, detect_case_style, CaseStyle};
//!
//! assert_eq!(detect_case_style("user_name"), CaseStyle::Snake);
//! assert_eq!(detect_case_style("UserName"), CaseStyle::Camel);
//! assert_eq!(apply_case_style("account_id", CaseStyle::LowerCamel), "accountId");
//! ```
//!
//! # Detection is a fixed-point test
//!
//! A candidate style is only reported when rendering the input in that style reproduces
//! the input unchanged. `Some-Thing` contains a hyphen but is neither `some-thing` nor
//! `SOME-THING`, so it is [`CaseStyle::Unknown`] rather than a camel-case token.
//!
//! # Known Limitations
//!
//! - **Acronyms**: "HTTPServer" splits into "HTTP" + "Server", so it renders as
//!   "HttpServer" in camel case and is therefore not detected as camel case itself.
//! - **Numbers**: digit runs are their own words ("user2Name" → ["user", "2", "Name"]),
//!   so "v2_api" is not a fixed point of snake case and is detected as [`CaseStyle::Lower`].

use crate::error::RecaseError;
use std::fmt;
use std::str::FromStr;

/// Represents the detected case style of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseStyle {
    /// Cannot determine: multi-word phrase or no consistent convention
    #[default]
    Unknown,
    /// All lowercase: "username"
    Lower,
    /// All uppercase: "USERNAME"
    Upper,
    /// Capitalized words, no separator: "UserName"
    Camel,
    /// Like `Camel` with a lowercase first word: "userName"
    LowerCamel,
    /// Kebab case: "user-name"
    Kebab,
    /// Screaming kebab case: "USER-NAME"
    ScreamingKebab,
    /// Snake case: "user_name"
    Snake,
    /// Screaming snake case: "USER_NAME"
    ScreamingSnake,
}

impl CaseStyle {
    /// Every style other than [`CaseStyle::Unknown`]
    pub const ALL: [CaseStyle; 8] = [
        CaseStyle::Lower,
        CaseStyle::Upper,
        CaseStyle::Camel,
        CaseStyle::LowerCamel,
        CaseStyle::Kebab,
        CaseStyle::ScreamingKebab,
        CaseStyle::Snake,
        CaseStyle::ScreamingSnake,
    ];

    /// Detect the case style of `text`. See [`detect_case_style`].
    pub fn detect(text: &str) -> Self {
        detect_case_style(text)
    }

    /// Render `text` in this style. See [`apply_case_style`].
    pub fn apply(self, text: &str) -> String {
        apply_case_style(text, self)
    }

    /// The style's name written in the style itself
    pub fn name(self) -> &'static str {
        match self {
            CaseStyle::Unknown => "",
            CaseStyle::Lower => "lower",
            CaseStyle::Upper => "UPPER",
            CaseStyle::Camel => "CamelCase",
            CaseStyle::LowerCamel => "lowerCamelCase",
            CaseStyle::Kebab => "kebab-case",
            CaseStyle::ScreamingKebab => "SCREAMING-KEBAB-CASE",
            CaseStyle::Snake => "snake_case",
            CaseStyle::ScreamingSnake => "SCREAMING_SNAKE_CASE",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CaseStyle {
    type Err = RecaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "unknown" => Ok(CaseStyle::Unknown),
            "lower" | "lowercase" => Ok(CaseStyle::Lower),
            "upper" | "uppercase" => Ok(CaseStyle::Upper),
            "camel" | "camelcase" | "pascal" | "pascalcase" => Ok(CaseStyle::Camel),
            "lowercamel" | "lowercamelcase" => Ok(CaseStyle::LowerCamel),
            "kebab" | "kebabcase" => Ok(CaseStyle::Kebab),
            "screamingkebab" | "screamingkebabcase" => Ok(CaseStyle::ScreamingKebab),
            "snake" | "snakecase" => Ok(CaseStyle::Snake),
            "screamingsnake" | "screamingsnakecase" | "constant" => Ok(CaseStyle::ScreamingSnake),
            _ => Err(RecaseError::unknown_case_style(s)),
        }
    }
}

/// Lexical signals found in a token, used to pick a candidate style family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseProfile {
    pub has_lower: bool,
    pub has_upper: bool,
    pub has_space: bool,
    pub has_hyphen: bool,
    pub has_underscore: bool,
}

impl CaseProfile {
    fn is_complete(&self) -> bool {
        self.has_lower && self.has_upper && self.has_space && self.has_hyphen && self.has_underscore
    }
}

/// Scan `text` once, recording which of the five signals appear
pub fn profile_case(text: &str) -> CaseProfile {
    let mut profile = CaseProfile::default();

    for ch in text.chars() {
        if !profile.has_lower && ch.is_lowercase() {
            profile.has_lower = true;
        } else if !profile.has_upper && ch.is_uppercase() {
            profile.has_upper = true;
        } else if !profile.has_space && ch.is_whitespace() {
            profile.has_space = true;
        } else if !profile.has_hyphen && ch == '-' {
            profile.has_hyphen = true;
        } else if !profile.has_underscore && ch == '_' {
            profile.has_underscore = true;
        }

        if profile.is_complete() {
            break;
        }
    }

    profile
}

/// Detect the case style used in a token
///
/// # Algorithm
///
/// First match wins:
/// 1. Contains whitespace → Unknown
/// 2. Contains hyphen → Kebab or ScreamingKebab, if either is a fixed point
/// 3. Contains underscore → Snake or ScreamingSnake, if either is a fixed point
/// 4. Has both lower and upper letters → Camel or LowerCamel, if either is a fixed point
/// 5. Equal to its lowercase form → Lower; equal to its uppercase form → Upper
/// 6. Otherwise → Unknown
///
/// # Examples
///
/// ```
/// use recase_core::case_style::{detect_case_style, CaseStyle};
///
/// assert_eq!(detect_case_style("kebab-case"), CaseStyle::Kebab);
/// assert_eq!(detect_case_style("SCREAMING-SNAKE-CASE"), CaseStyle::ScreamingKebab);
/// assert_eq!(detect_case_style("lowerCamelCase"), CaseStyle::LowerCamel);
/// assert_eq!(detect_case_style("Some-Thing"), CaseStyle::Unknown);
/// ```
pub fn detect_case_style(text: &str) -> CaseStyle {
    let profile = profile_case(text);

    if profile.has_space {
        return CaseStyle::Unknown;
    }

    let candidates: &[CaseStyle] = if profile.has_hyphen {
        &[CaseStyle::Kebab, CaseStyle::ScreamingKebab]
    } else if profile.has_underscore {
        &[CaseStyle::Snake, CaseStyle::ScreamingSnake]
    } else if profile.has_lower && profile.has_upper {
        &[CaseStyle::Camel, CaseStyle::LowerCamel]
    } else {
        &[]
    };

    candidates
        .iter()
        .chain(&[CaseStyle::Lower, CaseStyle::Upper])
        .copied()
        .find(|style| apply_case_style(text, *style) == text)
        .unwrap_or(CaseStyle::Unknown)
}

/// Render `text` in the given case style
///
/// Lower and Upper change letter case only. The word-based styles split `text` with
/// [`split_words`] and rejoin the words with the style's casing and separator.
/// [`CaseStyle::Unknown`] returns the input unchanged.
///
/// # Examples
///
/// ```
/// use recase_core::case_style::{apply_case_style, CaseStyle};
///
/// assert_eq!(apply_case_style("kebab-thing", CaseStyle::Camel), "KebabThing");
/// assert_eq!(apply_case_style("CamelCase", CaseStyle::Kebab), "camel-case");
/// assert_eq!(apply_case_style("has space", CaseStyle::Unknown), "has space");
/// ```
pub fn apply_case_style(text: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Unknown => text.to_string(),
        CaseStyle::Lower => text.to_lowercase(),
        CaseStyle::Upper => text.to_uppercase(),
        CaseStyle::Camel => split_words(text).into_iter().map(capitalize).collect(),
        CaseStyle::LowerCamel => {
            let mut words = split_words(text).into_iter();
            let mut result = words.next().map(str::to_lowercase).unwrap_or_default();
            result.extend(words.map(capitalize));
            result
        }
        CaseStyle::Kebab => join_words(text, "-", str::to_lowercase),
        CaseStyle::ScreamingKebab => join_words(text, "-", str::to_uppercase),
        CaseStyle::Snake => join_words(text, "_", str::to_lowercase),
        CaseStyle::ScreamingSnake => join_words(text, "_", str::to_uppercase),
    }
}

/// Split text into words
///
/// Any character that is not alphanumeric is a delimiter. Within a run of alphanumerics
/// a new word starts at a lower→upper transition, at a letter/digit transition, and
/// before the last capital of an acronym that is followed by a lowercase letter.
///
/// # Examples
///
/// ```
/// use recase_core::case_style::split_words;
///
/// assert_eq!(split_words("user_name"), vec!["user", "name"]);
/// assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
/// assert_eq!(split_words("user2Name"), vec!["user", "2", "Name"]);
/// ```
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !ch.is_alphanumeric() {
            if let Some(s) = start.take() {
                words.push(&text[s..idx]);
            }
            prev = None;
            continue;
        }

        match (start, prev) {
            (Some(s), Some(p)) if is_word_break(p, ch, chars.peek().map(|&(_, c)| c)) => {
                words.push(&text[s..idx]);
                start = Some(idx);
            }
            (None, _) => start = Some(idx),
            _ => {}
        }
        prev = Some(ch);
    }

    if let Some(s) = start {
        words.push(&text[s..]);
    }

    words
}

fn is_word_break(prev: char, current: char, next: Option<char>) -> bool {
    if prev.is_numeric() != current.is_numeric() {
        return true;
    }
    if prev.is_lowercase() && current.is_uppercase() {
        return true;
    }
    // "HTTPServer": the 'S' starts a new word
    prev.is_uppercase() && current.is_uppercase() && next.is_some_and(char::is_lowercase)
}

fn join_words(text: &str, separator: &str, case: fn(&str) -> String) -> String {
    split_words(text)
        .into_iter()
        .map(case)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Uppercase the first character, lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ===== Profile Tests =====

    #[test]
    fn test_profile_all_signals() {
        let profile = profile_case("lU -_");
        assert!(profile.has_lower);
        assert!(profile.has_upper);
        assert!(profile.has_space);
        assert!(profile.has_hyphen);
        assert!(profile.has_underscore);
    }

    #[test]
    fn test_profile_no_signals() {
        assert_eq!(profile_case(r#"!.;'"/"#), CaseProfile::default());
    }

    // ===== Detection Tests =====

    #[test]
    fn test_detect_each_style() {
        assert_eq!(detect_case_style("has space"), CaseStyle::Unknown);
        assert_eq!(detect_case_style("lower"), CaseStyle::Lower);
        assert_eq!(detect_case_style("UPPER"), CaseStyle::Upper);
        assert_eq!(detect_case_style("CamelCase"), CaseStyle::Camel);
        assert_eq!(detect_case_style("lowerCamelCase"), CaseStyle::LowerCamel);
        assert_eq!(detect_case_style("kebab-case"), CaseStyle::Kebab);
        assert_eq!(detect_case_style("SCREAMING-SNAKE-CASE"), CaseStyle::ScreamingKebab);
        assert_eq!(detect_case_style("snake_case"), CaseStyle::Snake);
        assert_eq!(detect_case_style("SCREAMING_SNAKE_CASE"), CaseStyle::ScreamingSnake);
    }

    #[test]
    fn test_detect_single_words() {
        assert_eq!(detect_case_style("One"), CaseStyle::Camel);
        assert_eq!(detect_case_style("one"), CaseStyle::Lower);
        assert_eq!(detect_case_style("ONE"), CaseStyle::Upper);
        assert_eq!(detect_case_style("a"), CaseStyle::Lower);
        assert_eq!(detect_case_style("A"), CaseStyle::Upper);
    }

    #[test]
    fn test_punctuation_outranks_letter_mixing() {
        assert_eq!(detect_case_style("Some-Thing"), CaseStyle::Unknown);
        assert_eq!(detect_case_style("Some_Thing"), CaseStyle::Unknown);
    }

    #[test]
    fn test_detect_acronym_is_not_camel() {
        // Camel rendering of "HTTPServer" is "HttpServer"
        assert_eq!(detect_case_style("HTTPServer"), CaseStyle::Unknown);
        assert_eq!(detect_case_style("HttpServer"), CaseStyle::Camel);
    }

    #[test]
    fn test_detect_without_letters() {
        assert_eq!(detect_case_style(""), CaseStyle::Lower);
        assert_eq!(detect_case_style("1234"), CaseStyle::Lower);
        assert_eq!(detect_case_style("\t"), CaseStyle::Unknown);
    }

    #[test]
    fn test_detect_with_digits() {
        assert_eq!(detect_case_style("user_2_name"), CaseStyle::Snake);
        assert_eq!(detect_case_style("user2Name"), CaseStyle::LowerCamel);
        // not a snake fixed point, but still all lowercase
        assert_eq!(detect_case_style("v2_api"), CaseStyle::Lower);
    }

    // ===== Apply Tests =====

    #[test]
    fn test_apply_each_style() {
        assert_eq!(apply_case_style("has space", CaseStyle::Unknown), "has space");
        assert_eq!(apply_case_style("Lower", CaseStyle::Lower), "lower");
        assert_eq!(apply_case_style("uPPER", CaseStyle::Upper), "UPPER");
        assert_eq!(apply_case_style("camelCase", CaseStyle::Camel), "CamelCase");
        assert_eq!(apply_case_style("LowerCamelCase", CaseStyle::LowerCamel), "lowerCamelCase");
        assert_eq!(apply_case_style("kebab_case", CaseStyle::Kebab), "kebab-case");
        assert_eq!(
            apply_case_style("SCREAMING_KEBAB_CASE", CaseStyle::ScreamingKebab),
            "SCREAMING-KEBAB-CASE"
        );
        assert_eq!(apply_case_style("snake-case", CaseStyle::Snake), "snake_case");
        assert_eq!(
            apply_case_style("SCREAMING-SNAKE-CASE", CaseStyle::ScreamingSnake),
            "SCREAMING_SNAKE_CASE"
        );
    }

    #[test]
    fn test_apply_from_snake_to_all() {
        let words = "account_id";

        assert_eq!(apply_case_style(words, CaseStyle::Lower), "account_id");
        assert_eq!(apply_case_style(words, CaseStyle::Upper), "ACCOUNT_ID");
        assert_eq!(apply_case_style(words, CaseStyle::Camel), "AccountId");
        assert_eq!(apply_case_style(words, CaseStyle::LowerCamel), "accountId");
        assert_eq!(apply_case_style(words, CaseStyle::Kebab), "account-id");
        assert_eq!(apply_case_style(words, CaseStyle::ScreamingKebab), "ACCOUNT-ID");
        assert_eq!(apply_case_style(words, CaseStyle::Snake), "account_id");
        assert_eq!(apply_case_style(words, CaseStyle::ScreamingSnake), "ACCOUNT_ID");
    }

    #[test]
    fn test_apply_empty() {
        for style in CaseStyle::ALL {
            assert_eq!(apply_case_style("", style), "");
        }
    }

    #[test]
    fn test_round_trip_for_detected_styles() {
        let samples = [
            "lower",
            "UPPER",
            "CamelCase",
            "lowerCamelCase",
            "kebab-case",
            "SCREAMING-KEBAB",
            "snake_case",
            "SCREAMING_SNAKE",
            "user2Name",
        ];
        for sample in samples {
            let style = detect_case_style(sample);
            assert_ne!(style, CaseStyle::Unknown, "{sample}");
            assert_eq!(apply_case_style(sample, style), sample);
        }
    }

    // ===== Word Splitting Tests =====

    #[test]
    fn test_split_delimited() {
        assert_eq!(split_words("get_user_by_id"), vec!["get", "user", "by", "id"]);
        assert_eq!(split_words("get-user-by-id"), vec!["get", "user", "by", "id"]);
        assert_eq!(split_words("__leading..and  trailing--"), vec!["leading", "and", "trailing"]);
    }

    #[test]
    fn test_split_case_changes() {
        assert_eq!(split_words("getUserById"), vec!["get", "User", "By", "Id"]);
        assert_eq!(split_words("XMLParser"), vec!["XML", "Parser"]);
        assert_eq!(split_words("ALLCAPS"), vec!["ALLCAPS"]);
    }

    #[test]
    fn test_split_digits() {
        assert_eq!(split_words("base64Encode"), vec!["base", "64", "Encode"]);
        assert_eq!(split_words("numbers2and55with000"), vec!["numbers", "2", "and", "55", "with", "000"]);
    }

    // ===== Names =====

    #[test]
    fn test_style_names() {
        assert_eq!(CaseStyle::Unknown.to_string(), "");
        assert_eq!(CaseStyle::Lower.to_string(), "lower");
        assert_eq!(CaseStyle::Upper.to_string(), "UPPER");
        assert_eq!(CaseStyle::Camel.to_string(), "CamelCase");
        assert_eq!(CaseStyle::LowerCamel.to_string(), "lowerCamelCase");
        assert_eq!(CaseStyle::Kebab.to_string(), "kebab-case");
        assert_eq!(CaseStyle::ScreamingKebab.to_string(), "SCREAMING-KEBAB-CASE");
        assert_eq!(CaseStyle::Snake.to_string(), "snake_case");
        assert_eq!(CaseStyle::ScreamingSnake.to_string(), "SCREAMING_SNAKE_CASE");
    }

    #[test]
    fn test_names_parse_back() {
        for style in CaseStyle::ALL {
            assert_eq!(style.name().parse::<CaseStyle>().unwrap(), style);
        }
        assert_eq!("pascal".parse::<CaseStyle>().unwrap(), CaseStyle::Camel);
        assert_eq!("Screaming Snake".parse::<CaseStyle>().unwrap(), CaseStyle::ScreamingSnake);
        assert!("title".parse::<CaseStyle>().is_err());
    }
}
