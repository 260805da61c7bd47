//! The narration engine.
//!
//! Turns story state plus a generation request into one assembled prompt,
//! sends it to the completion collaborator, and splits the raw reply into
//! narrative and reasoning.

mod agent;
pub mod director;
pub mod lore;
pub mod prompt;
pub mod reply;
pub mod style;
pub mod window;

pub use agent::{Completions, Narrator, NarratorConfig};
pub use director::DirectorDeck;
pub use prompt::PromptBuilder;
pub use reply::{split_reply, ModelReply, ERROR_REASONING, NO_REASONING};
pub use style::{StyleCatalog, StyleId};
