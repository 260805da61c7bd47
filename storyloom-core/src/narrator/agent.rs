//! The narrator agent.
//!
//! Owns the completion client, the style catalog, the director deck, and
//! the RNG, and turns story state plus a generation request into a finished
//! [`ModelReply`]. A failed call never escapes as an error: it becomes an
//! inline error turn, so the author sees the failure in the story rather
//! than losing the turn.

use super::director::DirectorDeck;
use super::lore;
use super::prompt::{self, build_prompt};
use super::reply::{split_reply, ModelReply, ERROR_REASONING};
use super::style::{self, StyleCatalog};
use super::window::window;
use crate::request::{GenerationRequest, SamplingParams};
use crate::story::StoryState;
use async_trait::async_trait;
use openai_compat::{Client, Error as ApiError, Request as ApiRequest};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// The chat-completion collaborator, as the narrator sees it: one prompt
/// in, one completion text out. Implemented by [`openai_compat::Client`]
/// and by the scripted mock in [`crate::testing`].
#[async_trait]
pub trait Completions: Send + Sync {
    async fn complete(&self, request: ApiRequest) -> Result<String, ApiError>;
}

#[async_trait]
impl Completions for Client {
    async fn complete(&self, request: ApiRequest) -> Result<String, ApiError> {
        let response = Client::complete(self, request).await?;
        Ok(response.text().trim().to_string())
    }
}

/// Configuration for the narrator.
#[derive(Debug, Clone, Default)]
pub struct NarratorConfig {
    /// Model override; `None` uses the client's default.
    pub model: Option<String>,

    /// Explicit reasoning-model capability flag, forwarded to the client.
    /// `None` leaves detection to the client's identifier heuristic.
    pub reasoning: Option<bool>,
}

/// Assembles prompts and talks to the model.
pub struct Narrator {
    client: Box<dyn Completions>,
    config: NarratorConfig,
    styles: StyleCatalog,
    deck: DirectorDeck,
    rng: StdRng,
}

impl Narrator {
    /// Create a narrator with the builtin catalogs and an entropy-seeded RNG.
    pub fn new(client: impl Completions + 'static) -> Self {
        Self {
            client: Box::new(client),
            config: NarratorConfig::default(),
            styles: StyleCatalog::builtin(),
            deck: DirectorDeck::builtin(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_config(mut self, config: NarratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Substitute the style catalog.
    pub fn with_styles(mut self, styles: StyleCatalog) -> Self {
        self.styles = styles;
        self
    }

    /// Substitute the director deck.
    pub fn with_deck(mut self, deck: DirectorDeck) -> Self {
        self.deck = deck;
        self
    }

    /// Seed the director RNG, for deterministic selection in tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Assemble the full prompt for one turn. Takes `&mut self` because the
    /// director draw advances the RNG.
    pub fn assemble_prompt(&mut self, state: &StoryState, request: &GenerationRequest) -> String {
        let windowed = window(&state.transcript, request.context_budget);
        let scan = format!("{windowed}{}", request.instruction);
        let activated = lore::activate(&state.lore, &scan);
        let lore_block = lore::render(&activated);
        let style_guide = self.styles.resolve(request.style, &request.custom_style_text);
        let sensory = style::sensory_phrase(&request.sensory_weights);
        let cut = self.deck.select(request.custom_director.as_deref(), &mut self.rng);

        tracing::debug!(
            lore_activations = activated.len(),
            director_cut = cut.is_some(),
            windowed_chars = windowed.chars().count(),
            "assembling prompt"
        );

        build_prompt(
            state,
            request,
            windowed,
            &lore_block,
            &style_guide,
            &sensory,
            cut.as_deref(),
        )
    }

    /// Run one generation turn: assemble, call the model, split the reply.
    /// A collaborator failure comes back as an inline error turn.
    pub async fn narrate(&mut self, state: &StoryState, request: &GenerationRequest) -> ModelReply {
        let prompt = self.assemble_prompt(state, request);
        match self
            .client
            .complete(self.chat_request(prompt, &request.sampling))
            .await
        {
            Ok(raw) => split_reply(&raw),
            Err(e) => {
                tracing::warn!(error = %e, "generation call failed");
                ModelReply {
                    narrative: format!("(generation error: {e})"),
                    reasoning: ERROR_REASONING.to_string(),
                }
            }
        }
    }

    /// Update the chronicle from the full (unwindowed) transcript.
    pub async fn chronicle(
        &self,
        state: &StoryState,
        sampling: &SamplingParams,
    ) -> Result<String, ApiError> {
        let prompt = prompt::build_chronicle_prompt(&state.transcript, &state.chronicle);
        let raw = self.client.complete(self.chat_request(prompt, sampling)).await?;
        Ok(split_reply(&raw).narrative)
    }

    /// Distill the stored style samples into a style DNA description.
    pub async fn analyze_style(
        &self,
        state: &StoryState,
        sampling: &SamplingParams,
    ) -> Result<String, ApiError> {
        let prompt = prompt::build_style_analysis_prompt(&state.style_samples);
        let raw = self.client.complete(self.chat_request(prompt, sampling)).await?;
        Ok(split_reply(&raw).narrative)
    }

    /// Rewrite a passage to match the stored style DNA.
    pub async fn rewrite_in_style(
        &self,
        state: &StoryState,
        text: &str,
        sampling: &SamplingParams,
    ) -> Result<String, ApiError> {
        let prompt = prompt::build_style_rewrite_prompt(&state.style_dna, text);
        let raw = self.client.complete(self.chat_request(prompt, sampling)).await?;
        Ok(split_reply(&raw).narrative)
    }

    fn chat_request(&self, prompt: String, sampling: &SamplingParams) -> ApiRequest {
        let mut request = ApiRequest::user(prompt)
            .with_temperature(sampling.temperature)
            .with_top_p(sampling.top_p)
            .with_frequency_penalty(sampling.frequency_penalty)
            .with_presence_penalty(sampling.presence_penalty)
            .with_max_tokens(sampling.max_tokens);
        if let Some(ref model) = self.config.model {
            request = request.with_model(model);
        }
        if let Some(reasoning) = self.config.reasoning {
            request = request.with_reasoning(reasoning);
        }
        request
    }
}
