//! Fallback provider doubles.
//!
//! [`RecordingFallback`] answers every question with a fixed reply and keeps
//! the questions it was asked, so tests can assert whether escalation
//! happened. [`FailingFallback`] always errors.

use std::sync::Mutex;

use aoi_core::BoxFuture;
use aoi_core::assistant::{FallbackError, FallbackProvider};

/// A provider that returns a canned answer and records each question.
pub struct RecordingFallback {
    answer: String,
    questions: Mutex<Vec<String>>,
}

impl RecordingFallback {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions received so far, in call order.
    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().expect("poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.questions.lock().expect("poisoned").len()
    }
}

impl FallbackProvider for RecordingFallback {
    fn name(&self) -> &str {
        "recording"
    }

    fn generate<'a>(&'a self, question: &'a str) -> BoxFuture<'a, Result<String, FallbackError>> {
        Box::pin(async move {
            self.questions
                .lock()
                .expect("poisoned")
                .push(question.to_string());
            tracing::debug!(question, "recording fallback called");
            Ok(self.answer.clone())
        })
    }
}

/// A provider whose every call fails with [`FallbackError::Request`].
pub struct FailingFallback {
    message: String,
}

impl FailingFallback {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl FallbackProvider for FailingFallback {
    fn name(&self) -> &str {
        "failing"
    }

    fn generate<'a>(&'a self, _question: &'a str) -> BoxFuture<'a, Result<String, FallbackError>> {
        Box::pin(async move { Err(FallbackError::Request(self.message.clone())) })
    }
}
