//! Snapshot save/load round-trips through a real filesystem.

use storyloom_core::testing::TestHarness;
use storyloom_core::{Character, LoreEntry, Snapshot, StoryState};
use tempfile::TempDir;

fn sample_state() -> StoryState {
    StoryState {
        background: "A drowned city lit by gas lamps.".to_string(),
        characters: vec![
            Character::new("Mira", "herbalist", "nervous"),
            Character::new("Aldric", "baron", "cold"),
        ],
        lore: vec![
            LoreEntry::new("dragon", "a fire beast"),
            LoreEntry::new("Riverside", "a village under the falls"),
        ],
        memory: "Mira owes the ferryman a favor.".to_string(),
        transcript: "Once upon a time.\n\nThe dragon woke.".to_string(),
        chronicle: "A dragon woke in the drowned city.".to_string(),
        style_dna: "short declaratives; rain imagery".to_string(),
        style_samples: "It rained. It kept raining.".to_string(),
    }
}

#[tokio::test]
async fn session_save_and_load_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("story.json");

    let mut harness = TestHarness::new();
    *harness.session.state_mut() = sample_state();
    harness.session.save(&path).await.expect("save should succeed");

    let mut fresh = TestHarness::new();
    fresh.session.load(&path).await.expect("load should succeed");

    assert_eq!(*fresh.session.state(), sample_state());
}

#[tokio::test]
async fn load_replaces_state_wholesale() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("story.json");

    Snapshot::from_state(&sample_state())
        .save_json(&path)
        .await
        .expect("save");

    let mut harness = TestHarness::new();
    harness.session.state_mut().background = "stale background".to_string();
    harness.session.state_mut().transcript = "stale transcript".to_string();

    harness.session.load(&path).await.expect("load");
    assert_eq!(harness.session.state().background, "A drowned city lit by gas lamps.");
    assert_eq!(
        harness.session.state().transcript,
        "Once upon a time.\n\nThe dragon woke."
    );
}

#[tokio::test]
async fn corrupt_file_leaves_state_untouched() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("corrupt.json");
    tokio::fs::write(&path, "{this is not json")
        .await
        .expect("write");

    let mut harness = TestHarness::new();
    *harness.session.state_mut() = sample_state();

    assert!(harness.session.load(&path).await.is_err());
    assert_eq!(*harness.session.state(), sample_state());
}

#[tokio::test]
async fn old_variant_snapshot_loads_with_defaults() {
    // The earliest variant saved only background/roles/lore/story.
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("v1.json");
    tokio::fs::write(
        &path,
        r#"{
            "background": "bg",
            "characters": [{"name": "Mira", "background": "", "personality": ""}],
            "lore": [{"keyword": "dragon", "description": "a fire beast"}],
            "story": "Once upon a time.",
            "timestamp": "2024-01-01 00:00:00"
        }"#,
    )
    .await
    .expect("write");

    let snapshot = Snapshot::load_json(&path).await.expect("load");
    let state = snapshot.into_state();
    assert_eq!(state.background, "bg");
    assert_eq!(state.transcript, "Once upon a time.");
    assert_eq!(state.memory, "");
    assert_eq!(state.chronicle, "");
    assert_eq!(state.style_dna, "");
}

#[tokio::test]
async fn load_clears_undo_snapshot() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("story.json");
    Snapshot::from_state(&sample_state())
        .save_json(&path)
        .await
        .expect("save");

    let mut harness = TestHarness::new();
    harness.expect_reply("A turn.");
    harness.direct("Go.").await.expect("generate");

    harness.session.load(&path).await.expect("load");
    // The old snapshot belonged to the previous story; it must not be
    // replayable into the loaded one.
    assert!(harness.session.undo().is_none());
}
