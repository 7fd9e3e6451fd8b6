use serde::{Deserialize, Serialize};

/// Closed enumeration of the card kinds the agent recognizes.
///
/// The rollout heuristics index their damage and weight tables by kind, so an
/// unrecognized card is represented as [`CardKind::Other`] and falls through
/// to the tables' default entries instead of being matched by name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Strike,
    Defend,
    Bash,
    PommelStrike,
    SearingBlow,
    Bludgeon,
    Thunderclap,
    Anger,
    Offering,
    Other,
}

impl CardKind {
    /// Display name of the card
    pub fn name(&self) -> &'static str {
        match self {
            CardKind::Strike => "Strike",
            CardKind::Defend => "Defend",
            CardKind::Bash => "Bash",
            CardKind::PommelStrike => "PommelStrike",
            CardKind::SearingBlow => "SearingBlow",
            CardKind::Bludgeon => "Bludgeon",
            CardKind::Thunderclap => "Thunderclap",
            CardKind::Anger => "Anger",
            CardKind::Offering => "Offering",
            CardKind::Other => "Other",
        }
    }

    /// Energy cost when played by the in-crate battle engine
    pub fn cost(&self) -> i32 {
        match self {
            CardKind::Strike => 1,
            CardKind::Defend => 1,
            CardKind::Bash => 2,
            CardKind::PommelStrike => 1,
            CardKind::SearingBlow => 2,
            CardKind::Bludgeon => 3,
            CardKind::Thunderclap => 1,
            CardKind::Anger => 0,
            CardKind::Offering => 0,
            CardKind::Other => 1,
        }
    }

    /// Recovery cards trade health for resources and drive the scenario
    /// classification of the rollout policy.
    pub fn is_recovery(&self) -> bool {
        matches!(self, CardKind::Offering)
    }

    /// Defensive cards gain block instead of dealing damage
    pub fn is_defensive(&self) -> bool {
        matches!(self, CardKind::Defend)
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_classification() {
        assert!(CardKind::Offering.is_recovery());
        assert!(!CardKind::Strike.is_recovery());
        assert!(!CardKind::Defend.is_recovery());
    }

    #[test]
    fn test_defensive_classification() {
        assert!(CardKind::Defend.is_defensive());
        assert!(!CardKind::Offering.is_defensive());
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(CardKind::PommelStrike.to_string(), "PommelStrike");
        assert_eq!(CardKind::Offering.to_string(), CardKind::Offering.name());
    }
}
