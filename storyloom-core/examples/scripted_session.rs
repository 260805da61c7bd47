//! Quick scripted walkthrough of the core engine, no network needed.

use storyloom_core::testing::MockCompleter;
use storyloom_core::{
    Character, DirectorDeck, GenerationRequest, LoreEntry, Narrator, StorySession,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== storyloom scripted session ===\n");

    // A scripted collaborator instead of a live endpoint.
    let mock = MockCompleter::new();
    mock.queue_reply(
        "<think>Open on the harbor; let the dragon stay off-page.</think>\
         Smoke rose off the water long before anyone saw wings.",
    );

    let mut session = StorySession::with_narrator(
        Narrator::new(mock.clone())
            .with_deck(DirectorDeck::silent())
            .with_seed(0),
    );

    println!("1. Setting up the story...");
    let state = session.state_mut();
    state.background = "A drowned city lit by gas lamps.".to_string();
    state.characters = vec![Character::new("Mira", "herbalist", "nervous")];
    state.lore = vec![LoreEntry::new("dragon", "a fire beast older than the city")];
    state.transcript = "Once upon a time.".to_string();

    println!("\n2. Generating a turn...");
    let turn = session
        .generate(&GenerationRequest::new("The dragon appears."))
        .await?;
    println!("   narrative: {}", turn.narrative);
    println!("   reasoning: {}", turn.reasoning);

    let prompt = mock.last_prompt().unwrap_or_default();
    println!("\n3. The assembled prompt was {} chars;", prompt.chars().count());
    println!(
        "   lore triggered: {}",
        prompt.contains("【entry: dragon】")
    );

    println!("\n4. Undoing the turn...");
    let _ = session.undo();
    println!("   transcript: {}", session.state().transcript);

    println!("\n=== done ===");
    Ok(())
}
