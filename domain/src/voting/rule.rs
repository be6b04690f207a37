//! Social-choice rules for resolving a vote
//!
//! This module defines the rules used to turn a set of ballots into a winner.

use serde::{Deserialize, Serialize};

/// Rule for aggregating votes into a winning proposal
///
/// - `Majority`: one choice per agent, most votes wins (default)
/// - `Unanimity`: one choice per agent, all must agree; otherwise majority decides
/// - `Rated`: each agent rates every proposal 1-5, highest total wins
/// - `Ranked`: each agent ranks every proposal, Borda count decides
///
/// # Example
///
/// ```
/// use roundtable_domain::VotingRule;
///
/// let rule: VotingRule = "borda".parse().unwrap();
/// assert_eq!(rule, VotingRule::Ranked);
/// assert_eq!(VotingRule::default(), VotingRule::Majority);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VotingRule {
    /// Most first-choice votes wins
    #[default]
    Majority,

    /// Everyone must pick the same proposal
    Unanimity,

    /// Sum of 1-5 ratings
    Rated,

    /// Borda count over full rankings
    Ranked,
}

impl VotingRule {
    /// Every supported rule, in display order
    pub const ALL: [VotingRule; 4] = [
        VotingRule::Majority,
        VotingRule::Unanimity,
        VotingRule::Rated,
        VotingRule::Ranked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VotingRule::Majority => "majority",
            VotingRule::Unanimity => "unanimity",
            VotingRule::Rated => "rated",
            VotingRule::Ranked => "ranked",
        }
    }

    /// Get a human-readable description of this rule
    pub fn description(&self) -> &'static str {
        match self {
            VotingRule::Majority => "majority (most first-choice votes)",
            VotingRule::Unanimity => "unanimity (all agree, else majority)",
            VotingRule::Rated => "rated (highest total 1-5 rating)",
            VotingRule::Ranked => "ranked (Borda count)",
        }
    }
}

impl std::fmt::Display for VotingRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VotingRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "majority" => Ok(VotingRule::Majority),
            "unanimity" | "unanimous" => Ok(VotingRule::Unanimity),
            "rated" | "rating" | "score" => Ok(VotingRule::Rated),
            "ranked" | "ranking" | "borda" => Ok(VotingRule::Ranked),
            other => Err(format!(
                "Unknown voting rule: {}. Valid: majority, unanimity, rated, ranked",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rule() {
        assert_eq!("majority".parse::<VotingRule>().ok(), Some(VotingRule::Majority));
        assert_eq!("Unanimous".parse::<VotingRule>().ok(), Some(VotingRule::Unanimity));
        assert_eq!("unanimity".parse::<VotingRule>().ok(), Some(VotingRule::Unanimity));
        assert_eq!("rated".parse::<VotingRule>().ok(), Some(VotingRule::Rated));
        assert_eq!(" RANKED ".parse::<VotingRule>().ok(), Some(VotingRule::Ranked));
        assert_eq!("borda".parse::<VotingRule>().ok(), Some(VotingRule::Ranked));
    }

    #[test]
    fn test_parse_unknown_rule() {
        let err = "plurality-runoff".parse::<VotingRule>().unwrap_err();
        assert!(err.contains("plurality-runoff"));
    }

    #[test]
    fn test_display_round_trips() {
        for rule in VotingRule::ALL {
            assert_eq!(rule.to_string().parse::<VotingRule>().ok(), Some(rule));
        }
    }

    #[test]
    fn test_default() {
        assert_eq!(VotingRule::default(), VotingRule::Majority);
    }
}
