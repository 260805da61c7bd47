//! Structured prompt assembly.
//!
//! The prompt is an ordered list of named sections rather than one format
//! string, so each section can be tested and reordered independently. The
//! section order is fixed: persona, output format, style, rendering
//! parameters, prohibitions, context blocks, the windowed story, the
//! directive, the planning checklist, and the output cue. The directive is
//! deliberately last-but-one and the most strongly marked, so explicit
//! direction always outranks the ambient knobs.

use crate::narrator::director::DIRECTIVE_BANNER;
use crate::request::GenerationRequest;
use crate::story::StoryState;

/// Placeholder for an empty optional field, so the model never sees a
/// dangling blank heading.
pub const UNSET: &str = "(none)";

/// One named section of the assembled prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading rendered as `【heading】`; `None` for bare preamble text.
    pub heading: Option<String>,
    pub body: String,
}

/// Ordered builder for the prompt document.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    sections: Vec<Section>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unheaded text, used for the persona line at the top.
    pub fn preamble(mut self, text: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: None,
            body: text.into(),
        });
        self
    }

    /// A headed section. An empty body renders as [`UNSET`].
    pub fn section(mut self, heading: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let body = if body.trim().is_empty() {
            UNSET.to_string()
        } else {
            body
        };
        self.sections.push(Section {
            heading: Some(heading.into()),
            body,
        });
        self
    }

    /// A bodiless heading, used for the closing output cue.
    pub fn cue(mut self, heading: impl Into<String>) -> Self {
        self.sections.push(Section {
            heading: Some(heading.into()),
            body: String::new(),
        });
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            match (&section.heading, section.body.is_empty()) {
                (None, _) => parts.push(section.body.clone()),
                (Some(heading), true) => parts.push(format!("【{heading}】")),
                (Some(heading), false) => parts.push(format!("【{heading}】\n{}", section.body)),
            }
        }
        parts.join("\n\n")
    }
}

/// Assemble the full generation prompt.
///
/// `windowed_story` must be the already-budgeted view of the transcript;
/// `lore_block`, `style_guide`, and `sensory` are the resolved component
/// outputs; `director_cut` is this turn's cut, if any.
pub fn build_prompt(
    state: &StoryState,
    request: &GenerationRequest,
    windowed_story: &str,
    lore_block: &str,
    style_guide: &str,
    sensory: &str,
    director_cut: Option<&str>,
) -> String {
    let persona = format!(
        "You are a master novelist, writing in the {} register. \
         Continue the story while strictly following the rules below.",
        request.style.display_name()
    );

    let output_format = format!(
        "Language: {}\nParagraphs: {}\nDialogue: {}\nPoint of view: {}\n\
         Target length: roughly {} tokens for this continuation.",
        request.output_language.name(),
        request.paragraph_density.directive(),
        request.dialogue_ratio.directive(),
        request.point_of_view.directive(),
        request.sampling.max_tokens,
    );

    let rendering = rendering_parameters(request, sensory, director_cut);

    let prohibitions = "\
1. Never close with a summary or a moral.\n\
2. No recycled adjectives; render through the senses (show, don't tell).\n\
3. Do not decide long-term developments for the author; write only the present beat.";

    let checklist = format!(
        "Plan inside a single {open}…{close} block before the story text:\n\
         1. Name the core point of conflict for this beat.\n\
         2. Check whether any lore entry triggered; if so, keep its details consistent.\n\
         3. Choose one distinctive sensory detail to land.\n\
         4. Confirm the rendering parameters are not overriding the directive.",
        open = super::reply::THINK_OPEN,
        close = super::reply::THINK_CLOSE,
    );

    PromptBuilder::new()
        .preamble(persona)
        .section("Output format", output_format)
        .section(
            format!("Style requirements: {}", request.style.display_name()),
            style_guide,
        )
        .section("Rendering parameters", rendering)
        .section("Writing prohibitions", prohibitions)
        .section("World background", &state.background)
        .section("Cast", cast_block(state))
        .section("Long-term memory", &state.memory)
        .section("Lore triggers", lore_block)
        .section("Style DNA", &state.style_dna)
        .section("Chronicle", &state.chronicle)
        .section("Recent story", recent_story_block(state, windowed_story))
        .section("Directive (highest priority)", &request.instruction)
        .section("Before you write", checklist)
        .cue("Story output")
        .render()
}

fn rendering_parameters(
    request: &GenerationRequest,
    sensory: &str,
    director_cut: Option<&str>,
) -> String {
    let mut lines = vec![
        format!("Texture: {}", request.texture.directive()),
        format!("Pacing: {}", request.pacing.directive()),
        format!("Intensity: {}", request.intensity.directive()),
        format!("Senses: {sensory}"),
    ];
    if let Some(cut) = director_cut {
        lines.push(format!("{DIRECTIVE_BANNER} {cut}"));
    }
    lines.push(format!("Focus words: {}", or_unset(&request.focus_words)));
    lines.push(format!("Avoid words: {}", or_unset(&request.avoid_words)));
    lines.push(
        "These parameters tune delivery only; they must never override the narrative \
         content of the directive below."
            .to_string(),
    );
    lines.join("\n")
}

fn cast_block(state: &StoryState) -> String {
    state
        .valid_characters()
        .map(|c| {
            format!(
                "- {}: background<{}>; temperament<{}>",
                c.name.trim(),
                c.background.trim(),
                c.personality.trim()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn recent_story_block(state: &StoryState, windowed_story: &str) -> String {
    if windowed_story.is_empty() {
        return String::new();
    }
    // An ellipsis marks that older story text was cut away.
    if windowed_story.len() < state.transcript.len() {
        format!("...\n{windowed_story}")
    } else {
        windowed_story.to_string()
    }
}

fn or_unset(value: &str) -> &str {
    if value.trim().is_empty() {
        UNSET
    } else {
        value
    }
}

// ============================================================================
// Auxiliary prompts
// ============================================================================

/// Prompt for compressing the transcript into the running chronicle.
pub fn build_chronicle_prompt(transcript: &str, prior_chronicle: &str) -> String {
    PromptBuilder::new()
        .preamble(
            "You maintain the chronicle of an ongoing story: a compact, factual record \
             of what has happened so far, in chronological order. Merge the prior \
             chronicle with the full story text into one updated chronicle. Keep names, \
             places, and unresolved threads; drop scene-level detail. Output only the \
             chronicle.",
        )
        .section("Prior chronicle", prior_chronicle)
        .section("Full story text", transcript)
        .cue("Updated chronicle")
        .render()
}

/// Prompt for distilling style samples into a reusable style DNA.
pub fn build_style_analysis_prompt(samples: &str) -> String {
    PromptBuilder::new()
        .preamble(
            "You are a prose analyst. Distill the writing samples below into a compact \
             style description another writer could imitate: sentence rhythm, diction, \
             imagery habits, dialogue handling, and tonal signature. Output only the \
             description.",
        )
        .section("Writing samples", samples)
        .cue("Style DNA")
        .render()
}

/// Prompt for rewriting a passage to match the stored style DNA.
pub fn build_style_rewrite_prompt(style_dna: &str, text: &str) -> String {
    PromptBuilder::new()
        .preamble(
            "Rewrite the passage below so it matches the style description exactly, \
             preserving every event, speaker, and detail. Output only the rewritten \
             passage.",
        )
        .section("Style description", style_dna)
        .section("Passage", text)
        .cue("Rewritten passage")
        .render()
}
