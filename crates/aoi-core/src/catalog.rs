//! Embedded and file-backed catalogs.
//!
//! The vocabulary, completion catalog, and FAQ catalog ship inside the binary
//! as TOML documents. A configuration file may point any of them at a
//! replacement file, which is read once at startup.
//!
//! ## TOML Example
//!
//! ```toml
//! # vocabulary.toml
//! keywords = ["var", "fun", "if"]
//! builtins = ["write"]
//!
//! # completions.toml
//! [[items]]
//! label = "var"
//! insert_text = "var "
//! detail = "Variable declaration"
//! kind = "keyword"
//!
//! # knowledge.toml
//! [[entries]]
//! question = "How do I declare a variable?"
//! keywords = ["variable", "declare"]
//! answer = "Use the 'var' keyword."
//! ```

use std::path::{Path, PathBuf};

use aoi_config::CatalogConfig;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::completion::CompletionCatalog;
use crate::knowledge::KnowledgeBase;
use crate::lexer::Vocabulary;

const VOCABULARY_TOML: &str = include_str!("../data/vocabulary.toml");
const COMPLETIONS_TOML: &str = include_str!("../data/completions.toml");
const KNOWLEDGE_TOML: &str = include_str!("../data/knowledge.toml");

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {name} catalog: {source}")]
    Parse {
        name: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog: {0}")]
    Validation(String),
}

/// The three catalogs the core operations consult.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogs {
    pub vocabulary: Vocabulary,
    pub completions: CompletionCatalog,
    pub knowledge: KnowledgeBase,
}

impl Catalogs {
    /// Parse the catalogs embedded in the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        let catalogs = Self {
            vocabulary: parse_vocabulary(VOCABULARY_TOML)?,
            completions: parse_completions(COMPLETIONS_TOML)?,
            knowledge: parse_knowledge(KNOWLEDGE_TOML)?,
        };
        catalogs.validate()?;
        Ok(catalogs)
    }

    /// Load catalogs, reading any override files named in `config`.
    pub async fn load(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let vocabulary = match &config.vocabulary_path {
            Some(path) => parse_vocabulary(&read(path).await?)?,
            None => parse_vocabulary(VOCABULARY_TOML)?,
        };
        let completions = match &config.completions_path {
            Some(path) => parse_completions(&read(path).await?)?,
            None => parse_completions(COMPLETIONS_TOML)?,
        };
        let knowledge = match &config.knowledge_path {
            Some(path) => parse_knowledge(&read(path).await?)?,
            None => parse_knowledge(KNOWLEDGE_TOML)?,
        };

        let catalogs = Self {
            vocabulary,
            completions,
            knowledge,
        };
        catalogs.validate()?;

        info!(
            keywords = catalogs.vocabulary.keywords.len(),
            builtins = catalogs.vocabulary.builtins.len(),
            completions = catalogs.completions.len(),
            faq_entries = catalogs.knowledge.len(),
            "catalogs loaded"
        );
        Ok(catalogs)
    }

    /// Check the invariants the matching functions rely on.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let words = self
            .vocabulary
            .keywords
            .iter()
            .chain(self.vocabulary.builtins.iter());
        for word in words {
            if !is_identifier(word) {
                return Err(CatalogError::Validation(format!(
                    "vocabulary word {word:?} is not an identifier"
                )));
            }
        }

        for (i, item) in self.completions.items.iter().enumerate() {
            if item.label.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "completion item {i} has an empty label"
                )));
            }
        }

        for (i, entry) in self.knowledge.entries.iter().enumerate() {
            if entry.keywords.is_empty() {
                return Err(CatalogError::Validation(format!(
                    "FAQ entry {i} ({:?}) has no keywords",
                    entry.question
                )));
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(CatalogError::Validation(format!(
                    "FAQ entry {i} ({:?}) has an empty keyword",
                    entry.question
                )));
            }
        }

        Ok(())
    }
}

/// Parse a vocabulary document.
pub fn parse_vocabulary(content: &str) -> Result<Vocabulary, CatalogError> {
    parse("vocabulary", content)
}

/// Parse a completion catalog document.
pub fn parse_completions(content: &str) -> Result<CompletionCatalog, CatalogError> {
    parse("completion", content)
}

/// Parse an FAQ catalog document.
pub fn parse_knowledge(content: &str) -> Result<KnowledgeBase, CatalogError> {
    parse("knowledge", content)
}

fn parse<T: DeserializeOwned>(name: &'static str, content: &str) -> Result<T, CatalogError> {
    toml::from_str(content).map_err(|source| CatalogError::Parse { name, source })
}

async fn read(path: &str) -> Result<String, CatalogError> {
    debug!(path, "reading catalog override");
    tokio::fs::read_to_string(Path::new(path))
        .await
        .map_err(|source| CatalogError::Io {
            path: PathBuf::from(path),
            source,
        })
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionKind;
    use crate::lexer::TokenKind;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_builtin_catalogs() {
        let catalogs = Catalogs::builtin().unwrap();

        assert_eq!(catalogs.vocabulary.keywords.len(), 13);
        assert_eq!(catalogs.vocabulary.classify("while"), TokenKind::Keyword);
        assert_eq!(
            catalogs.vocabulary.classify("clock"),
            TokenKind::BuiltinFunction
        );

        assert_eq!(catalogs.completions.items[0].label, "var");
        assert_eq!(catalogs.completions.items[0].kind, CompletionKind::Keyword);
        assert!(
            catalogs
                .completions
                .items
                .iter()
                .any(|i| i.label == "bubble-sort" && i.kind == CompletionKind::Snippet)
        );

        assert_eq!(catalogs.knowledge.len(), 13);
        assert!(
            catalogs
                .knowledge
                .entries
                .iter()
                .all(|e| !e.keywords.is_empty())
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("var"));
        assert!(is_identifier("_tmp1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("two words"));
    }

    #[test]
    fn test_parse_error_names_catalog() {
        let err = parse_knowledge("[[entries]]\nquestion = 1").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { name: "knowledge", .. }));
    }

    #[test]
    fn test_validate_rejects_empty_faq_keyword() {
        let mut catalogs = Catalogs::builtin().unwrap();
        catalogs.knowledge.entries[0].keywords.push(String::new());
        let err = catalogs.validate().unwrap_err();
        assert!(err.to_string().contains("empty keyword"));
    }

    #[test]
    fn test_validate_rejects_entry_without_keywords() {
        let mut catalogs = Catalogs::builtin().unwrap();
        catalogs.knowledge.entries[2].keywords.clear();
        let err = catalogs.validate().unwrap_err();
        assert!(err.to_string().contains("no keywords"));
    }

    #[test]
    fn test_validate_rejects_bad_vocabulary_word() {
        let mut catalogs = Catalogs::builtin().unwrap();
        catalogs.vocabulary.builtins.insert("print line".to_string());
        assert!(matches!(
            catalogs.validate(),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_label() {
        let mut catalogs = Catalogs::builtin().unwrap();
        catalogs.completions.items[1].label.clear();
        let err = catalogs.validate().unwrap_err();
        assert!(err.to_string().contains("empty label"));
    }

    #[tokio::test]
    async fn test_load_defaults_match_builtin() {
        let loaded = Catalogs::load(&CatalogConfig::default()).await.unwrap();
        assert_eq!(loaded, Catalogs::builtin().unwrap());
    }

    #[tokio::test]
    async fn test_load_override_file() {
        let file = write_temp(
            r#"
[[entries]]
question = "Where is the manual?"
keywords = ["manual", "docs"]
answer = "Open the help panel."
"#,
        );
        let config = CatalogConfig {
            knowledge_path: Some(file.path().display().to_string()),
            ..Default::default()
        };

        let catalogs = Catalogs::load(&config).await.unwrap();
        assert_eq!(catalogs.knowledge.len(), 1);
        assert_eq!(catalogs.knowledge.entries[0].question, "Where is the manual?");
        assert_eq!(catalogs.knowledge.entries[0].code_example, None);
        // Unset paths still come from the embedded documents.
        assert_eq!(catalogs.vocabulary, Catalogs::builtin().unwrap().vocabulary);
    }

    #[tokio::test]
    async fn test_load_override_validated() {
        let file = write_temp("keywords = [\"var\", \"\"]\nbuiltins = []\n");
        let config = CatalogConfig {
            vocabulary_path: Some(file.path().display().to_string()),
            ..Default::default()
        };
        assert!(matches!(
            Catalogs::load(&config).await,
            Err(CatalogError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let config = CatalogConfig {
            completions_path: Some("/nonexistent/completions.toml".to_string()),
            ..Default::default()
        };
        let err = Catalogs::load(&config).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/completions.toml"));
    }
}
