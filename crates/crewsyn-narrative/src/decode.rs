//! Defensive decoding of collaborator replies.
//!
//! The provider is instructed to return bare JSON, but replies arrive
//! as free text and may wrap the object in prose or code fences. Stage
//! one locates and decodes the embedded object; stage two is the fixed
//! fallback, applied by [`crate::report`] whenever stage one fails.

use crate::types::{DuoNarrative, TeamNarrative};

/// Slice out the outermost candidate JSON object: first `{` through
/// last `}`. Returns `None` when no such span exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    text.get(start..=end)
}

/// Decode and schema-check a team narrative. Any failure yields `None`;
/// the caller substitutes the fallback.
pub fn decode_team_narrative(text: &str) -> Option<TeamNarrative> {
    let raw = extract_json_object(text)?;
    let parsed: TeamNarrative = serde_json::from_str(raw).ok()?;
    let complete = !parsed.persona.trim().is_empty()
        && !parsed.strengths.is_empty()
        && !parsed.improvements.is_empty();
    complete.then_some(parsed)
}

/// Decode and schema-check a duo narrative.
pub fn decode_duo_narrative(text: &str) -> Option<DuoNarrative> {
    let raw = extract_json_object(text)?;
    let parsed: DuoNarrative = serde_json::from_str(raw).ok()?;
    let complete = !parsed.synergy_reason.trim().is_empty() && !parsed.mission.trim().is_empty();
    complete.then_some(parsed)
}
