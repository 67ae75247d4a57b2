//! Keyword-based retrieval of predefined help answers.
//!
//! [`find_answer`] scans the FAQ catalog twice, in catalog order. The first
//! pass only considers multi-word phrases (keywords containing a space), so a
//! question about "insertion sort" reaches the insertion-sort entry even when
//! an earlier entry owns a single-word keyword that also matches. The second
//! pass accepts any keyword. Matching is case-insensitive substring
//! containment; there is no fuzzy matching.
//!
//! `None` is the signal for the host to escalate the question to the
//! fallback service (see [`crate::assistant`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A predefined question with its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    /// Phrases that select this entry, in priority order.
    pub keywords: Vec<String>,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_example: Option<String>,
}

impl FaqEntry {
    /// Keywords made of more than one word.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .filter(|k| k.contains(' '))
    }
}

/// The FAQ catalog, in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default)]
    pub entries: Vec<FaqEntry>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which scan produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPass {
    /// A multi-word phrase matched.
    Phrase,
    /// Any keyword matched.
    Keyword,
}

/// A knowledge-base hit together with the keyword that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnowledgeMatch<'a> {
    pub entry: &'a FaqEntry,
    pub keyword: &'a str,
    pub pass: MatchPass,
}

/// Find the entry answering `query`, reporting which keyword matched.
pub fn find_match<'k>(knowledge: &'k KnowledgeBase, query: &str) -> Option<KnowledgeMatch<'k>> {
    let query = query.to_lowercase();
    let contains = |keyword: &str| query.contains(&keyword.to_lowercase());

    let phrase_hit = knowledge.entries.iter().find_map(|entry| {
        entry
            .phrases()
            .find(|&k| contains(k))
            .map(|keyword| KnowledgeMatch {
                entry,
                keyword,
                pass: MatchPass::Phrase,
            })
    });

    let hit = phrase_hit.or_else(|| {
        knowledge.entries.iter().find_map(|entry| {
            entry
                .keywords
                .iter()
                .find(|k| contains(k))
                .map(|keyword| KnowledgeMatch {
                    entry,
                    keyword,
                    pass: MatchPass::Keyword,
                })
        })
    });

    match &hit {
        Some(m) => debug!(
            question = %m.entry.question,
            keyword = %m.keyword,
            pass = ?m.pass,
            "knowledge base hit"
        ),
        None => debug!("no predefined answer"),
    }
    hit
}

/// Find the entry answering `query`, or `None` when nothing matches.
pub fn find_answer<'k>(knowledge: &'k KnowledgeBase, query: &str) -> Option<&'k FaqEntry> {
    find_match(knowledge, query).map(|m| m.entry)
}
