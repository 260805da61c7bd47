//! Live integration tests against a real chat-completion endpoint.
//!
//! These are ignored by default; they need a reachable endpoint.
//!
//! Run with:
//! `OPENAI_BASE_URL=http://localhost:11434/v1 OPENAI_API_KEY=ollama \
//!  cargo test -p storyloom-core --test api_integration -- --ignored --nocapture`

use openai_compat::Client;
use storyloom_core::{GenerationRequest, StorySession};

/// Load environment variables from .env file.
fn setup() {
    let _ = dotenvy::dotenv();
}

/// Check if an endpoint is configured.
fn has_endpoint() -> bool {
    std::env::var("OPENAI_API_KEY").is_ok()
}

#[tokio::test]
#[ignore]
async fn test_live_generation_turn() {
    setup();
    if !has_endpoint() {
        eprintln!("Skipping test: OPENAI_API_KEY not set");
        return;
    }

    let client = Client::from_env().expect("client from env");
    let mut session = StorySession::new(client);
    session.state_mut().background = "A lighthouse on a cliff, off-season.".to_string();

    let turn = session
        .generate(&GenerationRequest::new(
            "The keeper finds a rowboat on the rocks at dawn.",
        ))
        .await
        .expect("generation should succeed");

    println!("narrative ({} chars):", turn.narrative.len());
    for line in turn.narrative.lines().take(10) {
        println!("  {line}");
    }
    println!("reasoning: {}", turn.reasoning);

    assert!(!turn.narrative.is_empty());
    assert!(session.state().transcript.contains(&turn.narrative));
}

#[tokio::test]
#[ignore]
async fn test_live_style_analysis() {
    setup();
    if !has_endpoint() {
        eprintln!("Skipping test: OPENAI_API_KEY not set");
        return;
    }

    let client = Client::from_env().expect("client from env");
    let mut session = StorySession::new(client);
    session.state_mut().style_samples =
        "The rain came in off the sea. It did not stop. Nobody expected it to.".to_string();

    let dna = session
        .analyze_style(&Default::default())
        .await
        .expect("analysis should succeed")
        .to_string();

    println!("style DNA: {dna}");
    assert!(!dna.is_empty());
}
