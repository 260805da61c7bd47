//! Story state: the accumulated narrative world a session operates on.
//!
//! Everything the author has entered lives here — world background, the
//! cast, lore entries, long-term memory, and the growing transcript. The
//! transcript is append-only from the engine's point of view: generation
//! turns go through [`append`], and the full text is never truncated in
//! storage (only a derived window is budgeted for prompting).

use serde::{Deserialize, Serialize};

/// Complete session state for one story.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryState {
    /// World background and main settings.
    pub background: String,

    /// The cast, in the order the author entered it.
    pub characters: Vec<Character>,

    /// Lore entries, activated by keyword when relevant.
    pub lore: Vec<LoreEntry>,

    /// Long-term memory. Always included in full, exempt from windowing.
    pub memory: String,

    /// The full narrative log. Mutated only by [`append`] (and by direct
    /// author edits, which bypass the undo snapshot).
    pub transcript: String,

    /// Running summary of past events, maintained by chronicle updates.
    pub chronicle: String,

    /// Distilled description of the target prose style.
    pub style_dna: String,

    /// Raw reference passages the style DNA is distilled from.
    pub style_samples: String,
}

impl StoryState {
    /// Create an empty story.
    pub fn new() -> Self {
        Self::default()
    }

    /// Characters with a usable name. Rows that fail the name predicate
    /// are ignored at this boundary, never deeper in prompt assembly.
    pub fn valid_characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| c.is_valid())
    }

    /// Append a machine-generated narrative block to the transcript.
    pub fn append_narrative(&mut self, narrative: &str) {
        self.transcript = append(&self.transcript, narrative);
    }
}

/// One cast member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub background: String,

    #[serde(default)]
    pub personality: String,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        background: impl Into<String>,
        personality: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
            personality: personality.into(),
        }
    }

    /// A row counts as a character only if the name field holds something.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// One lore entry: a keyword and the detail injected when it triggers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    #[serde(default)]
    pub keyword: String,

    #[serde(default)]
    pub description: String,
}

impl LoreEntry {
    pub fn new(keyword: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            description: description.into(),
        }
    }
}

/// Transcript accumulator: joins with a two-newline seam, even when the
/// narrative is empty, so turn boundaries stay visible in the raw text.
pub fn append(transcript: &str, narrative: &str) -> String {
    format!("{transcript}\n\n{narrative}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_separator() {
        assert_eq!(append("One.", "Two."), "One.\n\nTwo.");
    }

    #[test]
    fn test_append_empty_narrative_keeps_seam() {
        assert_eq!(append("One.", ""), "One.\n\n");
    }

    #[test]
    fn test_append_narrative_mutates_transcript() {
        let mut state = StoryState::new();
        state.transcript = "Once upon a time.".to_string();
        state.append_narrative("The dragon woke.");
        assert_eq!(state.transcript, "Once upon a time.\n\nThe dragon woke.");
    }

    #[test]
    fn test_character_validity() {
        assert!(Character::new("Mira", "", "").is_valid());
        assert!(!Character::new("", "has background", "has temperament").is_valid());
        assert!(!Character::new("   ", "", "").is_valid());
    }

    #[test]
    fn test_valid_characters_filters_blank_rows() {
        let mut state = StoryState::new();
        state.characters = vec![
            Character::new("Mira", "herbalist", "nervous"),
            Character::new("", "", ""),
            Character::new("Aldric", "baron", "cold"),
        ];
        let names: Vec<_> = state.valid_characters().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Mira", "Aldric"]);
    }
}
