//! Per-turn generation requests.
//!
//! A [`GenerationRequest`] carries everything the author chose for a single
//! continuation: the directorial instruction, the style selection, the
//! rendering knobs, and the sampling parameters. Requests are built fresh
//! for every call and never persisted.

use crate::narrator::style::StyleId;

/// Default character budget for the windowed transcript.
pub const DEFAULT_CONTEXT_BUDGET: usize = 3500;

/// Everything needed for one generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The author's instruction for this beat. Required, non-empty.
    pub instruction: String,

    /// Selected style preset, or [`StyleId::Custom`].
    pub style: StyleId,

    /// Free-text style guide, consulted only when `style` is `Custom`.
    pub custom_style_text: String,

    /// Per-channel sensory emphasis sliders.
    pub sensory_weights: SensoryWeights,

    pub texture: LinguisticTexture,
    pub pacing: Pacing,
    pub intensity: Intensity,
    pub point_of_view: PointOfView,
    pub output_language: OutputLanguage,
    pub paragraph_density: ParagraphDensity,
    pub dialogue_ratio: DialogueRatio,

    /// Words or motifs the continuation should work in.
    pub focus_words: String,

    /// Words or motifs to keep out of the continuation.
    pub avoid_words: String,

    /// Explicit director cut. When set (non-empty), it replaces the random
    /// draw from the deck.
    pub custom_director: Option<String>,

    /// Character budget for the windowed transcript.
    pub context_budget: usize,

    pub sampling: SamplingParams,
}

impl GenerationRequest {
    /// Create a request with the given instruction and default knobs.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            style: StyleId::default(),
            custom_style_text: String::new(),
            sensory_weights: SensoryWeights::default(),
            texture: LinguisticTexture::default(),
            pacing: Pacing::default(),
            intensity: Intensity::default(),
            point_of_view: PointOfView::default(),
            output_language: OutputLanguage::default(),
            paragraph_density: ParagraphDensity::default(),
            dialogue_ratio: DialogueRatio::default(),
            focus_words: String::new(),
            avoid_words: String::new(),
            custom_director: None,
            context_budget: DEFAULT_CONTEXT_BUDGET,
            sampling: SamplingParams::default(),
        }
    }

    pub fn with_style(mut self, style: StyleId) -> Self {
        self.style = style;
        self
    }

    pub fn with_custom_style(mut self, text: impl Into<String>) -> Self {
        self.style = StyleId::Custom;
        self.custom_style_text = text.into();
        self
    }

    pub fn with_sensory_weights(mut self, weights: SensoryWeights) -> Self {
        self.sensory_weights = weights;
        self
    }

    pub fn with_texture(mut self, texture: LinguisticTexture) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn with_point_of_view(mut self, pov: PointOfView) -> Self {
        self.point_of_view = pov;
        self
    }

    pub fn with_output_language(mut self, language: OutputLanguage) -> Self {
        self.output_language = language;
        self
    }

    pub fn with_paragraph_density(mut self, density: ParagraphDensity) -> Self {
        self.paragraph_density = density;
        self
    }

    pub fn with_dialogue_ratio(mut self, ratio: DialogueRatio) -> Self {
        self.dialogue_ratio = ratio;
        self
    }

    pub fn with_focus_words(mut self, words: impl Into<String>) -> Self {
        self.focus_words = words.into();
        self
    }

    pub fn with_avoid_words(mut self, words: impl Into<String>) -> Self {
        self.avoid_words = words.into();
        self
    }

    pub fn with_director_cut(mut self, cut: impl Into<String>) -> Self {
        self.custom_director = Some(cut.into());
        self
    }

    pub fn with_context_budget(mut self, budget: usize) -> Self {
        self.context_budget = budget;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }
}

/// Sampling parameters forwarded to the completion endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub max_tokens: usize,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 0.9,
            frequency_penalty: 0.6,
            presence_penalty: 0.4,
            max_tokens: 1200,
        }
    }
}

/// The five fixed sensory channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensoryChannel {
    Sight,
    Sound,
    Touch,
    Smell,
    Taste,
}

impl SensoryChannel {
    pub fn name(self) -> &'static str {
        match self {
            SensoryChannel::Sight => "sight",
            SensoryChannel::Sound => "sound",
            SensoryChannel::Touch => "touch",
            SensoryChannel::Smell => "smell",
            SensoryChannel::Taste => "taste",
        }
    }
}

/// Per-channel emphasis weights, each in [0.5, 1.5]. 1.0 is neutral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensoryWeights {
    pub sight: f32,
    pub sound: f32,
    pub touch: f32,
    pub smell: f32,
    pub taste: f32,
}

impl Default for SensoryWeights {
    fn default() -> Self {
        Self {
            sight: 1.0,
            sound: 1.0,
            touch: 1.0,
            smell: 1.0,
            taste: 1.0,
        }
    }
}

impl SensoryWeights {
    /// Set one channel, clamped into the slider range.
    pub fn with(mut self, channel: SensoryChannel, weight: f32) -> Self {
        let weight = weight.clamp(0.5, 1.5);
        match channel {
            SensoryChannel::Sight => self.sight = weight,
            SensoryChannel::Sound => self.sound = weight,
            SensoryChannel::Touch => self.touch = weight,
            SensoryChannel::Smell => self.smell = weight,
            SensoryChannel::Taste => self.taste = weight,
        }
        self
    }

    /// All channels in fixed order.
    pub fn channels(&self) -> [(SensoryChannel, f32); 5] {
        [
            (SensoryChannel::Sight, self.sight),
            (SensoryChannel::Sound, self.sound),
            (SensoryChannel::Touch, self.touch),
            (SensoryChannel::Smell, self.smell),
            (SensoryChannel::Taste, self.taste),
        ]
    }
}

/// Surface quality of the prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinguisticTexture {
    #[default]
    Plain,
    Lyrical,
    Gritty,
    Ornate,
}

impl LinguisticTexture {
    pub fn directive(self) -> &'static str {
        match self {
            LinguisticTexture::Plain => "clean, transparent prose that stays out of the story's way",
            LinguisticTexture::Lyrical => "musical, image-rich phrasing with room for metaphor",
            LinguisticTexture::Gritty => "coarse, concrete wording; plain nouns and hard verbs",
            LinguisticTexture::Ornate => "dense, deliberate sentences that savor their vocabulary",
        }
    }
}

/// How fast scenes move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pacing {
    Languid,
    #[default]
    Measured,
    Brisk,
    Breakneck,
}

impl Pacing {
    pub fn directive(self) -> &'static str {
        match self {
            Pacing::Languid => "unhurried; let scenes breathe and linger on transitions",
            Pacing::Measured => "steady forward motion with occasional pauses for detail",
            Pacing::Brisk => "short scenes, quick cuts between beats",
            Pacing::Breakneck => "relentless momentum; no scene lasts longer than it must",
        }
    }
}

/// Emotional pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intensity {
    Subdued,
    #[default]
    Moderate,
    Heightened,
    Feverish,
}

impl Intensity {
    pub fn directive(self) -> &'static str {
        match self {
            Intensity::Subdued => "keep emotion under the surface, implied rather than stated",
            Intensity::Moderate => "let feeling show where the scene earns it",
            Intensity::Heightened => "push the emotional stakes hard in every exchange",
            Intensity::Feverish => "everything at maximum pitch, raw nerves throughout",
        }
    }
}

/// Narrative camera position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointOfView {
    FirstPerson,
    SecondPerson,
    #[default]
    ThirdLimited,
    ThirdOmniscient,
}

impl PointOfView {
    pub fn directive(self) -> &'static str {
        match self {
            PointOfView::FirstPerson => "first person, inside the narrator's head",
            PointOfView::SecondPerson => "second person, addressing the protagonist as \"you\"",
            PointOfView::ThirdLimited => "close third person, limited to the viewpoint character",
            PointOfView::ThirdOmniscient => "omniscient third person, free to move between minds",
        }
    }
}

/// Language of the generated prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLanguage {
    #[default]
    English,
    TraditionalChinese,
    SimplifiedChinese,
    Japanese,
    Korean,
}

impl OutputLanguage {
    pub fn name(self) -> &'static str {
        match self {
            OutputLanguage::English => "English",
            OutputLanguage::TraditionalChinese => "Traditional Chinese",
            OutputLanguage::SimplifiedChinese => "Simplified Chinese",
            OutputLanguage::Japanese => "Japanese",
            OutputLanguage::Korean => "Korean",
        }
    }
}

/// Visual weight of paragraphs on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParagraphDensity {
    Airy,
    #[default]
    Balanced,
    Dense,
}

impl ParagraphDensity {
    pub fn directive(self) -> &'static str {
        match self {
            ParagraphDensity::Airy => "short paragraphs with plenty of white space",
            ParagraphDensity::Balanced => "a natural mix of paragraph lengths",
            ParagraphDensity::Dense => "long, immersive paragraphs with minimal breaks",
        }
    }
}

/// How much of the scene is carried by dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueRatio {
    Sparse,
    #[default]
    Balanced,
    Heavy,
}

impl DialogueRatio {
    pub fn directive(self) -> &'static str {
        match self {
            DialogueRatio::Sparse => "dialogue only where prose cannot carry the moment",
            DialogueRatio::Balanced => "an even blend of dialogue and narration",
            DialogueRatio::Heavy => "scene-driving dialogue, narration as connective tissue",
        }
    }
}
