#![deny(unsafe_code)]

//! Editor and help tooling for the AOI teaching language.
//!
//! The core operations are synchronous functions over immutable catalogs:
//! tokenizing and highlighting source, resolving the word under the cursor and
//! ranking completions, and matching help questions against a keyword FAQ.
//! The [`assistant`] module adds the async escalation path for questions the
//! FAQ cannot answer.

use std::future::Future;
use std::pin::Pin;

/// A type-erased, `Send`-safe, boxed future for object-safe async trait
/// methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Knowledge-first help assistant with a pluggable fallback service.
pub mod assistant;
/// Embedded and file-backed vocabulary, completion, and FAQ catalogs.
pub mod catalog;
/// Word-at-cursor resolution and ranked completion suggestions.
pub mod completion;
/// HTML rendering of token streams.
pub mod highlight;
/// Keyword FAQ matching.
pub mod knowledge;
/// Lossless tokenizer.
pub mod lexer;

pub use assistant::{Assistant, FallbackError, FallbackProvider, Reply};
pub use catalog::{CatalogError, Catalogs};
pub use completion::{
    CompletionCatalog, CompletionItem, CompletionKind, CursorError, WordAtCursor, suggest,
    word_at_cursor,
};
pub use highlight::{Theme, color_for, render_highlighted};
pub use knowledge::{FaqEntry, KnowledgeBase, find_answer};
pub use lexer::{Token, TokenKind, Vocabulary, tokenize};
