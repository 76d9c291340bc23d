use serde::{Deserialize, Serialize};

/// Structured prompt handed to the collaborator: system instructions
/// plus user content, both plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativePrompt {
    pub system: String,
    pub user: String,
}

/// Team-level narrative payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNarrative {
    pub persona: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

impl TeamNarrative {
    /// Fixed payload used whenever the collaborator is unreachable or
    /// returns something undecodable.
    pub fn fallback() -> Self {
        Self {
            persona: "Synergy Explorers".to_string(),
            strengths: vec![
                "A balanced team with a wide spread of capabilities".to_string(),
                "Different perspectives open up creative problem solving".to_string(),
                "Flexible collaboration styles that adapt to the task".to_string(),
            ],
            improvements: vec![
                "Clarify ownership and role boundaries within the team".to_string(),
                "Reserve a recurring slot for team-wide communication".to_string(),
            ],
        }
    }
}

/// Duo-level narrative payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuoNarrative {
    #[serde(alias = "synergyReason")]
    pub synergy_reason: String,
    pub mission: String,
}

impl DuoNarrative {
    /// Fixed payload referencing both members by name.
    pub fn fallback(first_name: &str, second_name: &str) -> Self {
        Self {
            synergy_reason: format!(
                "{first_name} and {second_name} cover each other's weak axes and make a strong complementary pair."
            ),
            mission: "Grab a coffee together and spend 15 minutes sharing a hobby the other person doesn't know about yet.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duo_fallback_references_both_names() {
        let fallback = DuoNarrative::fallback("Jin", "Mira");
        assert!(fallback.synergy_reason.contains("Jin"));
        assert!(fallback.synergy_reason.contains("Mira"));
        assert!(!fallback.mission.is_empty());
    }

    #[test]
    fn team_fallback_is_fully_populated() {
        let fallback = TeamNarrative::fallback();
        assert!(!fallback.persona.is_empty());
        assert_eq!(fallback.strengths.len(), 3);
        assert_eq!(fallback.improvements.len(), 2);
    }

    #[test]
    fn duo_narrative_accepts_camel_case_alias() {
        let parsed: DuoNarrative = serde_json::from_str(
            r#"{"synergyReason":"great chemistry","mission":"take a walk"}"#,
        )
        .expect("parse alias");
        assert_eq!(parsed.synergy_reason, "great chemistry");
    }
}
