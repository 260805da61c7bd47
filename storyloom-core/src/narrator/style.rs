//! Style presets and the sensory-emphasis resolver.

use crate::request::SensoryWeights;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Weight above which a channel gets the extreme-emphasis clause.
pub const EXTREME_EMPHASIS: f32 = 1.2;

/// Weight above which a channel gets the moderate-emphasis clause.
pub const MODERATE_EMPHASIS: f32 = 1.05;

/// Emitted when no channel clears either threshold.
pub const BALANCED_SENSES: &str = "keep the five senses in natural balance";

/// Identifier for a style preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StyleId {
    #[default]
    StandardNarrative,
    ImmersiveSensory,
    InnerMonologue,
    IntenseAction,
    DarkOppressive,
    StreamOfConsciousness,
    /// Author-supplied guide text instead of a preset.
    Custom,
}

impl StyleId {
    /// The built-in presets, in menu order.
    pub const PRESETS: [StyleId; 6] = [
        StyleId::StandardNarrative,
        StyleId::ImmersiveSensory,
        StyleId::InnerMonologue,
        StyleId::IntenseAction,
        StyleId::DarkOppressive,
        StyleId::StreamOfConsciousness,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            StyleId::StandardNarrative => "standard narrative",
            StyleId::ImmersiveSensory => "immersive sensory",
            StyleId::InnerMonologue => "inner monologue",
            StyleId::IntenseAction => "intense action",
            StyleId::DarkOppressive => "dark and oppressive",
            StyleId::StreamOfConsciousness => "stream of consciousness",
            StyleId::Custom => "custom",
        }
    }
}

lazy_static! {
    static ref BUILTIN_GUIDES: HashMap<StyleId, &'static str> = {
        let mut guides = HashMap::new();
        guides.insert(
            StyleId::StandardNarrative,
            "Balance dialogue and description; keep the plot moving above all.",
        );
        guides.insert(
            StyleId::ImmersiveSensory,
            "Dwell on sight, sound, touch, and smell, and on the body's reactions; slow the tempo.",
        );
        guides.insert(
            StyleId::InnerMonologue,
            "Go deep into the character's inner knots, desires, and contradictions; foreground mental activity.",
        );
        guides.insert(
            StyleId::IntenseAction,
            "Short sentences. Stress speed, impact, and the aesthetics of violence; cut back on introspection.",
        );
        guides.insert(
            StyleId::DarkOppressive,
            "Lean on gloom, despair, and creeping dread in the environment; choose shadowed, obscure wording.",
        );
        guides.insert(
            StyleId::StreamOfConsciousness,
            "Break the boundaries of logic: dreamlike, disordered, leaping thought.",
        );
        guides
    };
}

/// Immutable table of style guides, injected at construction so deployments
/// and tests can substitute their own without touching engine logic.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    guides: HashMap<StyleId, String>,
    default_id: StyleId,
}

impl StyleCatalog {
    /// Catalog with the built-in presets.
    pub fn builtin() -> Self {
        Self {
            guides: BUILTIN_GUIDES
                .iter()
                .map(|(id, guide)| (*id, (*guide).to_string()))
                .collect(),
            default_id: StyleId::StandardNarrative,
        }
    }

    /// Catalog from explicit entries. `default_id` is the fallback for
    /// lookups that miss.
    pub fn new(guides: HashMap<StyleId, String>, default_id: StyleId) -> Self {
        Self { guides, default_id }
    }

    /// Resolve a selection to guide text. `Custom` returns the custom text
    /// verbatim (possibly empty); an id missing from the catalog falls back
    /// to the designated default entry.
    pub fn resolve(&self, id: StyleId, custom_text: &str) -> String {
        if id == StyleId::Custom {
            return custom_text.to_string();
        }
        self.guides
            .get(&id)
            .or_else(|| self.guides.get(&self.default_id))
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Turn the sensory sliders into one emphasis phrase.
///
/// The 1.05 / 1.2 cut points are the only place the sliders affect output;
/// both comparisons are strict.
pub fn sensory_phrase(weights: &SensoryWeights) -> String {
    let mut clauses = Vec::new();
    for (channel, weight) in weights.channels() {
        if weight > EXTREME_EMPHASIS {
            clauses.push(format!("saturate the scene with {} detail", channel.name()));
        } else if weight > MODERATE_EMPHASIS {
            clauses.push(format!("give extra attention to {}", channel.name()));
        }
    }
    if clauses.is_empty() {
        BALANCED_SENSES.to_string()
    } else {
        clauses.join("; ")
    }
}
