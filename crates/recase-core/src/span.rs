//! Match spans and substitution results
//!
//! Every engine has the same shape: scan the text for match spans, copy the unmatched
//! bytes between them verbatim, and splice a rendered replacement in at each span.
//! [`splice`] is that shared routine.

use std::borrow::Cow;
use std::fmt;

/// A single match found while scanning a text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan<'t> {
    /// Byte offset of the match in the scanned text
    pub start: usize,
    /// The matched text, borrowed from the scanned text
    pub matched: &'t str,
}

impl<'t> MatchSpan<'t> {
    pub fn new(text: &'t str, start: usize, end: usize) -> Self {
        Self {
            start,
            matched: &text[start..end],
        }
    }

    /// Byte offset one past the end of the match
    pub fn end(&self) -> usize {
        self.start + self.matched.len()
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Result of a substitution: the modified text and the number of substitutions
///
/// When nothing was substituted, `text` borrows the input unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced<'t> {
    pub text: Cow<'t, str>,
    pub count: usize,
}

impl<'t> Replaced<'t> {
    /// A result that hands the input back untouched
    pub fn unchanged(text: &'t str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            count: 0,
        }
    }

    pub fn is_modified(&self) -> bool {
        self.count > 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_owned(self) -> (String, usize) {
        (self.text.into_owned(), self.count)
    }
}

impl fmt::Display for Replaced<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Anything that knows which part of the scanned text it replaces
pub(crate) trait Spanned<'t> {
    fn span(&self) -> MatchSpan<'t>;
}

impl<'t> Spanned<'t> for MatchSpan<'t> {
    fn span(&self) -> MatchSpan<'t> {
        *self
    }
}

/// A span paired with data the renderer needs, such as an expanded capture template
impl<'t, P> Spanned<'t> for (MatchSpan<'t>, P) {
    fn span(&self) -> MatchSpan<'t> {
        self.0
    }
}

/// Rebuild `text` with every item's span replaced by what `render` writes for it
///
/// Spans must be non-overlapping and in ascending order. The output buffer is only
/// allocated once the first span arrives, so an empty sequence returns the input as-is.
pub(crate) fn splice<'t, T, I, F>(text: &'t str, items: I, mut render: F) -> Replaced<'t>
where
    T: Spanned<'t>,
    I: IntoIterator<Item = T>,
    F: FnMut(T, &mut String),
{
    let mut buffer: Option<String> = None;
    let mut cursor = 0;
    let mut count = 0;

    for item in items {
        let span = item.span();
        debug_assert!(span.start >= cursor, "spans must be ordered and disjoint");
        let out = buffer.get_or_insert_with(|| String::with_capacity(text.len()));
        out.push_str(&text[cursor..span.start]);
        render(item, out);
        cursor = span.end();
        count += 1;
    }

    match buffer {
        None => Replaced::unchanged(text),
        Some(mut out) => {
            out.push_str(&text[cursor..]);
            Replaced {
                text: Cow::Owned(out),
                count,
            }
        }
    }
}
