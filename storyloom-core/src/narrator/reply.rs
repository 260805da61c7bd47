//! Splitting raw model output into narrative and reasoning trace.

/// Opening delimiter of a reasoning block.
pub const THINK_OPEN: &str = "<think>";

/// Closing delimiter of a reasoning block.
pub const THINK_CLOSE: &str = "</think>";

/// Reasoning value when the reply carries no reasoning block.
pub const NO_REASONING: &str = "(no reasoning present)";

/// Reasoning value for an error turn.
pub const ERROR_REASONING: &str = "Error";

/// A model reply after splitting. Derived once per call, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelReply {
    /// The user-visible continuation.
    pub narrative: String,

    /// The planning trace, or [`NO_REASONING`].
    pub reasoning: String,
}

/// Extract the first well-formed reasoning block from a raw reply.
///
/// Only the first `<think>…</think>` pair is treated as reasoning; later
/// blocks and unterminated opening tags pass through as narrative text.
pub fn split_reply(raw: &str) -> ModelReply {
    let trimmed = raw.trim();
    if let Some(open) = trimmed.find(THINK_OPEN) {
        let inner_start = open + THINK_OPEN.len();
        if let Some(close) = trimmed[inner_start..].find(THINK_CLOSE) {
            let inner_end = inner_start + close;
            let reasoning = trimmed[inner_start..inner_end].trim().to_string();
            let mut narrative = String::with_capacity(trimmed.len());
            narrative.push_str(&trimmed[..open]);
            narrative.push_str(&trimmed[inner_end + THINK_CLOSE.len()..]);
            return ModelReply {
                narrative: narrative.trim().to_string(),
                reasoning,
            };
        }
    }
    ModelReply {
        narrative: trimmed.to_string(),
        reasoning: NO_REASONING.to_string(),
    }
}
