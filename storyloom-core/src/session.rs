//! StorySession — the primary public API.
//!
//! Wraps the narrator, the story state, and the undo snapshot into a
//! single interface for the surrounding application. `&mut self` on
//! [`StorySession::generate`] is what serializes calls per session: two
//! concurrent generations against one transcript would race on the undo
//! snapshot and the append.

use crate::narrator::{Completions, Narrator};
use crate::persist::{PersistError, Snapshot};
use crate::request::{GenerationRequest, SamplingParams};
use crate::story::StoryState;
use std::path::Path;
use thiserror::Error;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("instruction must not be empty")]
    EmptyInstruction,

    #[error("no transcript to chronicle")]
    EmptyTranscript,

    #[error("no style samples to analyze")]
    NoStyleSamples,

    #[error("no style DNA on file; run a style analysis first")]
    NoStyleDna,

    #[error("API error: {0}")]
    Api(#[from] openai_compat::Error),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),
}

/// The outcome of one generation turn.
#[derive(Debug, Clone)]
pub struct Turn {
    /// The transcript after the append.
    pub transcript: String,

    /// The transcript as it was immediately before the append; feeding it
    /// back through [`StorySession::undo`] restores that state.
    pub previous: String,

    /// The narrative continuation (or the inline error marker).
    pub narrative: String,

    /// The model's planning trace, a sentinel when absent, `"Error"` for
    /// an error turn.
    pub reasoning: String,
}

/// A writing session: one story, one narrator, one undo slot.
pub struct StorySession {
    narrator: Narrator,
    state: StoryState,
    undo_snapshot: Option<String>,
}

impl StorySession {
    /// Create a session with an empty story.
    pub fn new(client: impl Completions + 'static) -> Self {
        Self::with_narrator(Narrator::new(client))
    }

    /// Create a session around a pre-configured narrator.
    pub fn with_narrator(narrator: Narrator) -> Self {
        Self {
            narrator,
            state: StoryState::new(),
            undo_snapshot: None,
        }
    }

    /// Replace the story state (used when starting from loaded data).
    pub fn with_state(mut self, state: StoryState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &StoryState {
        &self.state
    }

    /// Direct access for author edits. Edits made here bypass the undo
    /// snapshot: the next undo restores to the last machine-generated
    /// state, not to the edited text.
    pub fn state_mut(&mut self) -> &mut StoryState {
        &mut self.state
    }

    /// Run one generation turn.
    ///
    /// An empty instruction fails before any collaborator call, leaving
    /// the transcript untouched. A collaborator failure does NOT fail the
    /// turn: the error text is appended inline so the author sees it in
    /// place, and the turn can be undone like any other.
    pub async fn generate(&mut self, request: &GenerationRequest) -> Result<Turn, SessionError> {
        if request.instruction.trim().is_empty() {
            return Err(SessionError::EmptyInstruction);
        }

        let previous = self.state.transcript.clone();
        let reply = self.narrator.narrate(&self.state, request).await;

        self.undo_snapshot = Some(previous.clone());
        self.state.append_narrative(&reply.narrative);

        Ok(Turn {
            transcript: self.state.transcript.clone(),
            previous,
            narrative: reply.narrative,
            reasoning: reply.reasoning,
        })
    }

    /// Restore the transcript captured before the most recent generation.
    /// One level only: the snapshot is overwritten on every generation,
    /// not stacked. Returns `None` when no generation has happened yet.
    pub fn undo(&mut self) -> Option<&str> {
        let snapshot = self.undo_snapshot.clone()?;
        self.state.transcript = snapshot;
        Some(self.state.transcript.as_str())
    }

    /// Update the running chronicle from the full transcript.
    pub async fn update_chronicle(
        &mut self,
        sampling: &SamplingParams,
    ) -> Result<&str, SessionError> {
        if self.state.transcript.trim().is_empty() {
            return Err(SessionError::EmptyTranscript);
        }
        self.state.chronicle = self.narrator.chronicle(&self.state, sampling).await?;
        Ok(&self.state.chronicle)
    }

    /// Distill the stored style samples into the style DNA.
    pub async fn analyze_style(
        &mut self,
        sampling: &SamplingParams,
    ) -> Result<&str, SessionError> {
        if self.state.style_samples.trim().is_empty() {
            return Err(SessionError::NoStyleSamples);
        }
        self.state.style_dna = self.narrator.analyze_style(&self.state, sampling).await?;
        Ok(&self.state.style_dna)
    }

    /// Rewrite a passage to match the stored style DNA. Does not touch the
    /// transcript.
    pub async fn rewrite_in_style(
        &self,
        text: &str,
        sampling: &SamplingParams,
    ) -> Result<String, SessionError> {
        if self.state.style_dna.trim().is_empty() {
            return Err(SessionError::NoStyleDna);
        }
        Ok(self
            .narrator
            .rewrite_in_style(&self.state, text, sampling)
            .await?)
    }

    /// Save the story to a snapshot file.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        Snapshot::from_state(&self.state).save_json(path).await?;
        Ok(())
    }

    /// Load a snapshot file, fully replacing the in-memory story. A file
    /// that fails to load leaves the current state unchanged.
    pub async fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let snapshot = Snapshot::load_json(path).await?;
        self.state = snapshot.into_state();
        self.undo_snapshot = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrator::DirectorDeck;
    use crate::testing::MockCompleter;

    fn session(mock: &MockCompleter) -> StorySession {
        StorySession::with_narrator(
            Narrator::new(mock.clone())
                .with_deck(DirectorDeck::silent())
                .with_seed(0),
        )
    }

    #[tokio::test]
    async fn test_undo_before_any_generation() {
        let mock = MockCompleter::new();
        let mut session = session(&mock);
        assert!(session.undo().is_none());
    }

    #[tokio::test]
    async fn test_undo_restores_pre_append_state() {
        let mock = MockCompleter::new();
        mock.queue_reply("The dragon woke.");
        let mut session = session(&mock);
        session.state_mut().transcript = "Once upon a time.".to_string();

        let turn = session
            .generate(&GenerationRequest::new("Wake the dragon."))
            .await
            .unwrap();
        assert_eq!(turn.previous, "Once upon a time.");
        assert_eq!(session.state().transcript, "Once upon a time.\n\nThe dragon woke.");

        assert_eq!(session.undo(), Some("Once upon a time."));
        assert_eq!(session.state().transcript, "Once upon a time.");
    }

    #[tokio::test]
    async fn test_undo_ignores_direct_edits() {
        let mock = MockCompleter::new();
        mock.queue_reply("First turn.");
        let mut session = session(&mock);

        session
            .generate(&GenerationRequest::new("Begin."))
            .await
            .unwrap();
        // Author edits the canvas directly; the snapshot is untouched.
        session.state_mut().transcript = "hand-edited text".to_string();

        assert_eq!(session.undo(), Some(""));
    }

    #[tokio::test]
    async fn test_chronicle_requires_transcript() {
        let mock = MockCompleter::new();
        let mut session = session(&mock);
        let result = session.update_chronicle(&SamplingParams::default()).await;
        assert!(matches!(result, Err(SessionError::EmptyTranscript)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_style_stores_dna() {
        let mock = MockCompleter::new();
        mock.queue_reply("Short declaratives; rain imagery.");
        let mut session = session(&mock);
        session.state_mut().style_samples = "It rained. It kept raining.".to_string();

        session.analyze_style(&SamplingParams::default()).await.unwrap();
        assert_eq!(session.state().style_dna, "Short declaratives; rain imagery.");
    }

    #[tokio::test]
    async fn test_rewrite_requires_dna() {
        let mock = MockCompleter::new();
        let session = session(&mock);
        let result = session
            .rewrite_in_style("some text", &SamplingParams::default())
            .await;
        assert!(matches!(result, Err(SessionError::NoStyleDna)));
    }
}
