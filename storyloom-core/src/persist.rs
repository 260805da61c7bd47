//! Snapshot persistence for save/load.
//!
//! A snapshot is a full copy of the story state with a timestamp; loading
//! one fully replaces in-memory state. Every field tolerates absence, so
//! snapshots from older variants load with the missing parts empty.

use crate::story::{Character, LoreEntry, StoryState};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A saved story with all state needed to resume writing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub background: String,

    #[serde(default)]
    pub characters: Vec<Character>,

    #[serde(default)]
    pub lore: Vec<LoreEntry>,

    /// The full transcript, never truncated for storage.
    #[serde(default)]
    pub story: String,

    #[serde(default)]
    pub memory: String,

    #[serde(default)]
    pub style_dna: String,

    #[serde(default)]
    pub style_samples: String,

    #[serde(default)]
    pub chronicle: String,

    /// When the snapshot was taken, as unix seconds.
    #[serde(default)]
    pub timestamp: String,
}

impl Snapshot {
    /// Capture the current story state.
    pub fn from_state(state: &StoryState) -> Self {
        Self {
            background: state.background.clone(),
            characters: state.characters.clone(),
            lore: state.lore.clone(),
            story: state.transcript.clone(),
            memory: state.memory.clone(),
            style_dna: state.style_dna.clone(),
            style_samples: state.style_samples.clone(),
            chronicle: state.chronicle.clone(),
            timestamp: unix_now(),
        }
    }

    /// Rebuild a story state from this snapshot.
    pub fn into_state(self) -> StoryState {
        StoryState {
            background: self.background,
            characters: self.characters,
            lore: self.lore,
            memory: self.memory,
            transcript: self.story,
            chronicle: self.chronicle,
            style_dna: self.style_dna,
            style_samples: self.style_samples,
        }
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file. A malformed file is rejected whole; the
    /// caller's in-memory state stays as it was.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        match serde_json::from_str(&content) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "rejecting malformed snapshot");
                Err(PersistError::Json(e))
            }
        }
    }
}

/// Default file name for a new snapshot, stamped to the second.
pub fn snapshot_path(base_dir: impl AsRef<Path>) -> std::path::PathBuf {
    base_dir
        .as_ref()
        .join(format!("story_save_{}.json", unix_now()))
}

/// Current timestamp as unix seconds.
fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", now.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> StoryState {
        StoryState {
            background: "A drowned city.".to_string(),
            characters: vec![Character::new("Mira", "herbalist", "nervous")],
            lore: vec![LoreEntry::new("dragon", "a fire beast")],
            memory: "Mira owes the ferryman a favor.".to_string(),
            transcript: "Once upon a time.\n\nThe dragon woke.".to_string(),
            chronicle: "A dragon woke in the drowned city.".to_string(),
            style_dna: "short declaratives".to_string(),
            style_samples: "It rained. It kept raining.".to_string(),
        }
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let state = sample_state();
        let snapshot = Snapshot::from_state(&state);
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.into_state(), state);
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"story": "just a story"}"#).unwrap();
        let state = snapshot.into_state();
        assert_eq!(state.transcript, "just a story");
        assert_eq!(state.background, "");
        assert!(state.characters.is_empty());
        assert!(state.lore.is_empty());
    }

    #[test]
    fn test_character_rows_tolerate_missing_columns() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"characters": [{"name": "Mira"}]}"#).unwrap();
        assert_eq!(snapshot.characters[0].name, "Mira");
        assert_eq!(snapshot.characters[0].background, "");
    }

    #[test]
    fn test_snapshot_path_shape() {
        let path = snapshot_path("/saves");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("story_save_"));
        assert!(name.ends_with(".json"));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("story.json");

        let state = sample_state();
        Snapshot::from_state(&state)
            .save_json(&path)
            .await
            .expect("save should succeed");

        let loaded = Snapshot::load_json(&path).await.expect("load should succeed");
        assert_eq!(loaded.into_state(), state);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("corrupt.json");
        tokio::fs::write(&path, "{not json").await.expect("write");

        assert!(matches!(
            Snapshot::load_json(&path).await,
            Err(PersistError::Json(_))
        ));
    }
}
