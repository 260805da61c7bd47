//! Interactive fiction engine with an LLM narrator.
//!
//! This crate provides:
//! - Prompt assembly from accumulated story state (background, cast, lore,
//!   memory, chronicle, style DNA) and per-turn generation requests
//! - Context management: character-budget windowing, keyword-triggered
//!   lore injection, style and sensory resolution, director cuts
//! - Reply post-processing that separates narrative from reasoning
//! - Session orchestration with single-level undo and flat-file snapshots
//!
//! # Quick Start
//!
//! ```ignore
//! use openai_compat::Client;
//! use storyloom_core::{GenerationRequest, StorySession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = StorySession::new(Client::local());
//!     session.state_mut().background = "A drowned city lit by gas lamps.".to_string();
//!
//!     let turn = session
//!         .generate(&GenerationRequest::new("Open on the harbor at dawn."))
//!         .await?;
//!     println!("{}", turn.narrative);
//!
//!     session.save("my_story.json").await?;
//!     Ok(())
//! }
//! ```

pub mod narrator;
pub mod persist;
pub mod request;
pub mod session;
pub mod story;
pub mod testing;

// Primary public API
pub use narrator::{
    split_reply, Completions, DirectorDeck, ModelReply, Narrator, NarratorConfig, PromptBuilder,
    StyleCatalog, StyleId, ERROR_REASONING, NO_REASONING,
};
pub use persist::{snapshot_path, PersistError, Snapshot};
pub use request::{
    DialogueRatio, GenerationRequest, Intensity, LinguisticTexture, OutputLanguage,
    ParagraphDensity, Pacing, PointOfView, SamplingParams, SensoryChannel, SensoryWeights,
};
pub use session::{SessionError, StorySession, Turn};
pub use story::{Character, LoreEntry, StoryState};
pub use testing::{MockCompleter, TestHarness};
