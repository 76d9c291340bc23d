//! The two narrative operations, with mandatory graceful degradation.
//!
//! Both always return a complete payload: provider errors, timeouts,
//! and undecodable replies all collapse into the fixed fallbacks.

use crewsyn_core::{Member, TeamSummary};

use crate::decode::{decode_duo_narrative, decode_team_narrative};
use crate::prompt::{duo_prompt, team_prompt};
use crate::traits::NarrativeProvider;
use crate::types::{DuoNarrative, TeamNarrative};

pub async fn team_narrative(
    provider: &dyn NarrativeProvider,
    members: &[Member],
    summary: &TeamSummary,
) -> TeamNarrative {
    let prompt = team_prompt(members, summary);
    match provider.complete(prompt).await {
        Ok(text) => decode_team_narrative(&text).unwrap_or_else(TeamNarrative::fallback),
        Err(_) => TeamNarrative::fallback(),
    }
}

pub async fn duo_narrative(
    provider: &dyn NarrativeProvider,
    first: &Member,
    second: &Member,
) -> DuoNarrative {
    let prompt = duo_prompt(first, second);
    match provider.complete(prompt).await {
        Ok(text) => decode_duo_narrative(&text)
            .unwrap_or_else(|| DuoNarrative::fallback(&first.name, &second.name)),
        Err(_) => DuoNarrative::fallback(&first.name, &second.name),
    }
}
