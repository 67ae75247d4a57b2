//! Code completion for the AOI editor.
//!
//! Two entry points share the text-before-cursor view of the buffer:
//!
//! - [`word_at_cursor`] finds the identifier-shaped word ending at the cursor,
//!   which is the span the host replaces when a suggestion is accepted.
//! - [`suggest`] ranks catalog entries whose label starts with the current
//!   word.
//!
//! Cursor offsets are byte offsets into the text and must fall on a character
//! boundary.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Upper bound on the number of suggestions returned by [`suggest`].
pub const MAX_SUGGESTIONS: usize = 10;

/// The kind of completion item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Keyword,
    Function,
    Operator,
    Snippet,
}

impl CompletionKind {
    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            CompletionKind::Keyword => "keyword",
            CompletionKind::Function => "function",
            CompletionKind::Operator => "operator",
            CompletionKind::Snippet => "snippet",
        }
    }

    /// Sort rank; lower ranks are suggested first.
    pub fn rank(self) -> u8 {
        match self {
            CompletionKind::Keyword => 0,
            CompletionKind::Function => 1,
            CompletionKind::Operator => 2,
            CompletionKind::Snippet => 3,
        }
    }
}

/// A single entry in the completion catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    /// Text inserted in place of the word at the cursor.
    pub insert_text: String,
    pub detail: String,
    pub kind: CompletionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The completion catalog, in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionCatalog {
    #[serde(default)]
    pub items: Vec<CompletionItem>,
}

impl CompletionCatalog {
    pub fn new(items: Vec<CompletionItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Rejected cursor offsets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("cursor {cursor} is past the end of the text (length {len})")]
    OutOfBounds { cursor: usize, len: usize },

    #[error("cursor {cursor} is not on a character boundary")]
    NotCharBoundary { cursor: usize },
}

/// The word ending at the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordAtCursor<'a> {
    /// Byte offset where the word starts.
    pub start: usize,
    /// The word itself; empty when the cursor does not follow a word.
    pub word: &'a str,
}

impl WordAtCursor<'_> {
    /// Byte range covered by the word; it always ends at the cursor.
    pub fn span(&self) -> Range<usize> {
        self.start..self.start + self.word.len()
    }

    /// Replace the word in `text` with `insert_text`, returning the new text.
    pub fn replace_in(&self, text: &str, insert_text: &str) -> String {
        let span = self.span();
        let mut out = String::with_capacity(text.len() + insert_text.len());
        out.push_str(&text[..span.start]);
        out.push_str(insert_text);
        out.push_str(&text[span.end..]);
        out
    }
}

fn text_before(text: &str, cursor: usize) -> Result<&str, CursorError> {
    if cursor > text.len() {
        return Err(CursorError::OutOfBounds {
            cursor,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(cursor) {
        return Err(CursorError::NotCharBoundary { cursor });
    }
    Ok(&text[..cursor])
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Find the longest `[a-zA-Z_][a-zA-Z0-9_-]*` run ending exactly at `cursor`.
///
/// Returns an empty word starting at the cursor when there is none.
pub fn word_at_cursor(text: &str, cursor: usize) -> Result<WordAtCursor<'_>, CursorError> {
    let before = text_before(text, cursor)?;
    let bytes = before.as_bytes();

    let mut run_start = bytes.len();
    while run_start > 0 && is_word_continue(bytes[run_start - 1]) {
        run_start -= 1;
    }
    // Digits and dashes may continue a word but not start one.
    let start = (run_start..bytes.len())
        .find(|&i| is_word_start(bytes[i]))
        .unwrap_or(bytes.len());

    Ok(WordAtCursor {
        start,
        word: &before[start..],
    })
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',' | '.')
}

/// The lower-cased last separator-delimited segment of `before_cursor`.
///
/// Unlike [`word_at_cursor`], this keeps operator characters, so `x=va`
/// yields `x=va`.
pub fn current_word(before_cursor: &str) -> String {
    before_cursor
        .rsplit(is_separator)
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Rank catalog entries for the word being typed at `cursor`.
///
/// Matches are items whose lower-cased label starts with the current word.
/// An exact label match sorts first, then items by kind rank, then by label.
/// At most [`MAX_SUGGESTIONS`] items are returned; an empty current word
/// returns nothing.
pub fn suggest<'c>(
    catalog: &'c CompletionCatalog,
    text: &str,
    cursor: usize,
) -> Result<Vec<&'c CompletionItem>, CursorError> {
    let word = current_word(text_before(text, cursor)?);
    if word.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches: Vec<(bool, &CompletionItem)> = catalog
        .items
        .iter()
        .filter_map(|item| {
            let label = item.label.to_lowercase();
            label
                .starts_with(&word)
                .then_some((label == word, item))
        })
        .collect();

    // Stable, so equal labels keep catalog order.
    matches.sort_by(|(a_exact, a), (b_exact, b)| {
        b_exact
            .cmp(a_exact)
            .then(a.kind.rank().cmp(&b.kind.rank()))
            .then_with(|| a.label.cmp(&b.label))
    });

    trace!(word = %word, matched = matches.len(), "completion candidates");

    Ok(matches
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, item)| item)
        .collect())
}
