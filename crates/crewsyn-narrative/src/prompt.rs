//! Prompt construction for the two narrative requests.
//!
//! The collaborator is instructed to answer with a bare JSON object;
//! decoding still treats the reply as free text and falls back on any
//! mismatch (see [`crate::decode`]).

use crewsyn_core::{Archetype, Dimension, Member, Role, TeamSummary};

use crate::types::NarrativePrompt;

const TEAM_SYSTEM_PROMPT: &str = r#"You are a witty, creative team synergy analyst. Every analysis you produce is fresh and specific to the team in front of you.

Rules:
1. The persona is an inventive nickname reflecting the team's character (e.g. "Dawn-Patrol Code Alchemists", "Pixel Guardians on a Sugar Rush").
2. Strengths must reference the actual composition and stats of the team.
3. Improvements must be practical advice the team could act on this week.
4. Keep a playful tone that fits a small product team.

Respond with ONLY this JSON format:
{
  "persona": "creative team nickname",
  "strengths": ["specific strength 1", "specific strength 2", "specific strength 3"],
  "improvements": ["practical improvement 1", "practical improvement 2"]
}"#;

const DUO_SYSTEM_PROMPT: &str = r#"You are a playful team-chemistry analyst. You explain why two specific people work well together and propose one icebreaker mission.

Rules:
1. The synergy explanation must reference both members' archetypes and roles, in 2-3 sentences.
2. The mission must be a concrete activity doable in 10-15 minutes, with a place and a method.
3. Vary the mission category: coffee run, quick game, photo hunt, snack share, short walk, quiz, hobby show-and-tell.

Respond with ONLY this JSON format:
{
  "synergy_reason": "specific, fun chemistry analysis",
  "mission": "concrete icebreaker mission with place, time, and method"
}"#;

/// Build the team-analysis request: roster, distributions, averages,
/// strongest/weakest axes, and the grade.
pub fn team_prompt(members: &[Member], summary: &TeamSummary) -> NarrativePrompt {
    let roster = members
        .iter()
        .map(|m| format!("- {}: {} ({})", m.name, m.archetype.label(), m.role.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let averages = Dimension::ALL
        .iter()
        .map(|d| format!("{}: {}", d.label(), summary.average.get(*d)))
        .collect::<Vec<_>>()
        .join(", ");

    let top = summary.average.top_dimension();
    let bottom = summary.average.bottom_dimension();

    let role_distribution = Role::ALL
        .iter()
        .filter_map(|role| {
            let count = members.iter().filter(|m| m.role == *role).count();
            (count > 0).then(|| format!("{} x{}", role.label(), count))
        })
        .collect::<Vec<_>>()
        .join(", ");

    let archetype_distribution = Archetype::ALL
        .iter()
        .filter_map(|archetype| {
            let count = members.iter().filter(|m| m.archetype == *archetype).count();
            (count > 0).then(|| format!("{} x{}", archetype.label(), count))
        })
        .collect::<Vec<_>>()
        .join(", ");

    let user = format!(
        r#"Team analysis request.

Members ({count}):
{roster}

Role distribution: {role_distribution}
Archetype distribution: {archetype_distribution}

Team average stats:
{averages}

Strongest axis: {top_label} ({top_value})
Weakest axis: {bottom_label} ({bottom_value})

Team grade: {grade}

Analyze what makes this particular team click."#,
        count = summary.team_size,
        top_label = top.label(),
        top_value = summary.average.get(top),
        bottom_label = bottom.label(),
        bottom_value = summary.average.get(bottom),
        grade = summary.grade,
    );

    NarrativePrompt {
        system: TEAM_SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// Build the duo-chemistry request for a specific pair.
pub fn duo_prompt(first: &Member, second: &Member) -> NarrativePrompt {
    NarrativePrompt {
        system: DUO_SYSTEM_PROMPT.to_string(),
        user: format!(
            r#"Best duo chemistry request.

First member:
{first}

Second member:
{second}

Analyze this pair's chemistry and suggest a mission they can start today."#,
            first = member_card(first),
            second = member_card(second),
        ),
    }
}

fn member_card(member: &Member) -> String {
    let top = member.stats.top_dimension();
    let stats = Dimension::ALL
        .iter()
        .map(|d| format!("{} {}", d.label(), member.stats.get(*d)))
        .collect::<Vec<_>>()
        .join(" | ");

    format!(
        "- Name: {}\n- Archetype: {}\n- Role: {}\n- Highest stat: {} ({})\n- Full stats: {}",
        member.name,
        member.archetype.label(),
        member.role.label(),
        top.label(),
        member.stats.get(top),
        stats,
    )
}
