//! Testing utilities.
//!
//! This module provides tools for integration testing:
//! - `MockCompleter` for deterministic sessions without network calls
//! - `TestHarness` for scripted generation scenarios
//!
//! The mock is cheaply cloneable; clones share the reply queue, the
//! recorded prompts, and the call counter, so a test can keep one clone
//! for assertions while the session owns another.

use crate::narrator::{Completions, DirectorDeck, Narrator};
use crate::request::GenerationRequest;
use crate::session::{SessionError, StorySession, Turn};
use async_trait::async_trait;
use openai_compat::{Error as ApiError, Request as ApiRequest};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A scripted stand-in for the chat-completion collaborator.
#[derive(Clone, Default)]
pub struct MockCompleter {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
    fail_with: Mutex<Option<String>>,
}

impl MockCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply; replies are returned in queue order.
    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.inner
            .replies
            .lock()
            .expect("mock lock poisoned")
            .push_back(reply.into());
    }

    /// Make every subsequent call fail with a network error.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.inner.fail_with.lock().expect("mock lock poisoned") = Some(message.into());
    }

    /// Number of completion calls received.
    pub fn call_count(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.inner
            .prompts
            .lock()
            .expect("mock lock poisoned")
            .clone()
    }

    /// The most recent prompt received.
    pub fn last_prompt(&self) -> Option<String> {
        self.inner
            .prompts
            .lock()
            .expect("mock lock poisoned")
            .last()
            .cloned()
    }
}

#[async_trait]
impl Completions for MockCompleter {
    async fn complete(&self, request: ApiRequest) -> Result<String, ApiError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);

        let prompt = request
            .messages
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();
        self.inner
            .prompts
            .lock()
            .expect("mock lock poisoned")
            .push(prompt);

        if let Some(message) = self
            .inner
            .fail_with
            .lock()
            .expect("mock lock poisoned")
            .clone()
        {
            return Err(ApiError::Network(message));
        }

        Ok(self
            .inner
            .replies
            .lock()
            .expect("mock lock poisoned")
            .pop_front()
            .unwrap_or_else(|| "The narrator has no more scripted replies.".to_string()))
    }
}

/// Test harness for running scripted generation scenarios.
///
/// The narrator runs with a silent director deck and a fixed seed, so
/// prompt content is fully deterministic.
pub struct TestHarness {
    pub session: StorySession,
    mock: MockCompleter,
}

impl TestHarness {
    pub fn new() -> Self {
        let mock = MockCompleter::new();
        let session = StorySession::with_narrator(
            Narrator::new(mock.clone())
                .with_deck(DirectorDeck::silent())
                .with_seed(0),
        );
        Self { session, mock }
    }

    /// Queue a scripted reply.
    pub fn expect_reply(&mut self, reply: impl Into<String>) -> &mut Self {
        self.mock.queue_reply(reply);
        self
    }

    /// Make subsequent calls fail.
    pub fn fail_calls(&mut self, message: impl Into<String>) -> &mut Self {
        self.mock.fail_with(message);
        self
    }

    /// Run one generation with default knobs and the given instruction.
    pub async fn direct(&mut self, instruction: &str) -> Result<Turn, SessionError> {
        self.session
            .generate(&GenerationRequest::new(instruction))
            .await
    }

    /// Run one generation with a fully specified request.
    pub async fn generate(&mut self, request: &GenerationRequest) -> Result<Turn, SessionError> {
        self.session.generate(request).await
    }

    pub fn call_count(&self) -> usize {
        self.mock.call_count()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.mock.last_prompt()
    }

    pub fn transcript(&self) -> &str {
        &self.session.state().transcript
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_scripted_replies_in_order() {
        let mock = MockCompleter::new();
        mock.queue_reply("one");
        mock.queue_reply("two");

        let a = mock.complete(ApiRequest::user("p1")).await.unwrap();
        let b = mock.complete(ApiRequest::user("p2")).await.unwrap();
        assert_eq!(a, "one");
        assert_eq!(b, "two");
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.prompts(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_mock_default_reply_after_script_exhausted() {
        let mock = MockCompleter::new();
        let reply = mock.complete(ApiRequest::user("p")).await.unwrap();
        assert!(reply.contains("no more scripted"));
    }

    #[tokio::test]
    async fn test_mock_failure_mode() {
        let mock = MockCompleter::new();
        mock.fail_with("connection refused");
        let result = mock.complete(ApiRequest::user("p")).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
        // The call still counts: the harness reached the collaborator.
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_harness_basic_flow() {
        let mut harness = TestHarness::new();
        harness.expect_reply("The tavern falls silent.");

        let turn = harness.direct("Hush the room.").await.unwrap();
        assert_eq!(turn.narrative, "The tavern falls silent.");
        assert_eq!(harness.call_count(), 1);
        assert!(harness.transcript().ends_with("The tavern falls silent."));
    }
}
