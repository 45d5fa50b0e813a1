//! Case-insensitive literal matching
//!
//! Text is folded one character at a time with `char::to_lowercase`, keeping a map from
//! every folded byte back to the byte offset of the source character that produced it.
//! Matches are found in the folded text and translated back, so characters whose
//! lowercase form has a different UTF-8 length never shift the splice positions.

use crate::span::MatchSpan;
use memchr::memmem;

/// Lowercase `text` the same way [`FoldedText`] does
pub(crate) fn fold_str(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Lowercased copy of a text with an offset map back to the original
#[derive(Debug)]
pub(crate) struct FoldedText {
    folded: String,
    /// `origins[i]` is the source byte offset of the character that produced folded byte `i`
    origins: Vec<usize>,
    source_len: usize,
}

impl FoldedText {
    pub(crate) fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());

        for (offset, ch) in text.char_indices() {
            folded.extend(ch.to_lowercase());
            origins.resize(folded.len(), offset);
        }

        Self {
            folded,
            origins,
            source_len: text.len(),
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.folded.as_bytes()
    }

    /// True when `pos` falls between the expansions of two source characters
    fn is_boundary(&self, pos: usize) -> bool {
        pos == 0 || pos >= self.origins.len() || self.origins[pos] != self.origins[pos - 1]
    }

    fn source_offset(&self, pos: usize) -> usize {
        self.origins.get(pos).copied().unwrap_or(self.source_len)
    }
}

/// Lazy iterator over non-overlapping case-insensitive matches, left to right
///
/// The iterator is finite and cannot be restarted; each match resumes the scan at the
/// end of the previous one.
pub(crate) struct FoldedMatches<'t> {
    text: &'t str,
    folded: FoldedText,
    finder: memmem::Finder<'static>,
    needle_len: usize,
    cursor: usize,
}

impl<'t> FoldedMatches<'t> {
    pub(crate) fn new(text: &'t str, search: &str) -> Self {
        let needle = fold_str(search);
        Self {
            text,
            folded: FoldedText::new(text),
            needle_len: needle.len(),
            finder: memmem::Finder::new(needle.as_bytes()).into_owned(),
            cursor: 0,
        }
    }
}

impl<'t> Iterator for FoldedMatches<'t> {
    type Item = MatchSpan<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.needle_len == 0 {
            return None;
        }

        let haystack = self.folded.as_bytes();
        while self.cursor + self.needle_len <= haystack.len() {
            let start = self.cursor + self.finder.find(&haystack[self.cursor..])?;
            let end = start + self.needle_len;

            if self.folded.is_boundary(start) && self.folded.is_boundary(end) {
                self.cursor = end;
                let source_start = self.folded.source_offset(start);
                let source_end = self.folded.source_offset(end);
                return Some(MatchSpan::new(self.text, source_start, source_end));
            }

            // Landed inside a single character's folded expansion
            self.cursor = start + 1;
        }

        None
    }
}

/// True when `text` contains `search` ignoring case
pub(crate) fn contains_folded(text: &str, search: &str) -> bool {
    FoldedMatches::new(text, search).next().is_some()
}
