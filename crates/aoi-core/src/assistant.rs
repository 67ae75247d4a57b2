//! Help assistant: predefined answers first, fallback service second.
//!
//! [`Assistant::respond`] consults the knowledge base and only calls the
//! attached [`FallbackProvider`] when no entry matches. The provider call is
//! bounded by a timeout.

use std::sync::Arc;
use std::time::Duration;

use aoi_config::AssistantConfig;
use tracing::{debug, info, warn};

use crate::BoxFuture;
use crate::knowledge::{FaqEntry, KnowledgeBase, find_match};

/// Default bound on a single fallback call.
pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from escalating a question.
#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("no fallback service is configured")]
    NotConfigured,

    #[error("fallback request failed: {0}")]
    Request(String),

    #[error("fallback returned an empty answer")]
    EmptyAnswer,

    #[error("fallback timed out after {0:?}")]
    Timeout(Duration),
}

/// A service that answers questions the knowledge base cannot.
///
/// Uses `BoxFuture` so the assistant can hold an `Arc<dyn FallbackProvider>`.
pub trait FallbackProvider: Send + Sync {
    /// Display name used in logs and replies.
    fn name(&self) -> &str;

    /// Produce an answer for `question`.
    fn generate<'a>(&'a self, question: &'a str) -> BoxFuture<'a, Result<String, FallbackError>>;
}

/// The assistant's answer to a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<'a> {
    /// The query was blank and nothing was done.
    Empty,
    /// A knowledge-base entry answered the query.
    Predefined(&'a FaqEntry),
    /// The fallback service answered the query.
    Generated { provider: String, text: String },
}

/// Routes questions to the knowledge base or the fallback service.
pub struct Assistant {
    knowledge: KnowledgeBase,
    fallback: Option<Arc<dyn FallbackProvider>>,
    escalate: bool,
    timeout: Duration,
}

impl Assistant {
    /// An assistant that answers from `knowledge` only.
    pub fn new(knowledge: KnowledgeBase) -> Self {
        Self {
            knowledge,
            fallback: None,
            escalate: true,
            timeout: DEFAULT_FALLBACK_TIMEOUT,
        }
    }

    /// Apply the `[assistant]` configuration section.
    pub fn from_config(knowledge: KnowledgeBase, config: &AssistantConfig) -> Self {
        Self {
            escalate: config.escalate,
            timeout: Duration::from_secs(config.fallback_timeout_secs),
            ..Self::new(knowledge)
        }
    }

    /// Attach the service used for unmatched questions.
    pub fn with_fallback(mut self, provider: Arc<dyn FallbackProvider>) -> Self {
        self.fallback = Some(provider);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Whether unmatched questions can be escalated.
    pub fn can_escalate(&self) -> bool {
        self.escalate && self.fallback.is_some()
    }

    /// Answer `query`.
    pub async fn respond(&self, query: &str) -> Result<Reply<'_>, FallbackError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Reply::Empty);
        }

        if let Some(hit) = find_match(&self.knowledge, query) {
            return Ok(Reply::Predefined(hit.entry));
        }

        let provider = match &self.fallback {
            Some(provider) if self.escalate => provider,
            _ => {
                debug!(escalate = self.escalate, "question not escalated");
                return Err(FallbackError::NotConfigured);
            }
        };

        info!(provider = provider.name(), "escalating question");
        let text = match tokio::time::timeout(self.timeout, provider.generate(query)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(provider = provider.name(), timeout = ?self.timeout, "fallback timed out");
                return Err(FallbackError::Timeout(self.timeout));
            }
        };

        if text.trim().is_empty() {
            return Err(FallbackError::EmptyAnswer);
        }

        Ok(Reply::Generated {
            provider: provider.name().to_string(),
            text,
        })
    }
}
