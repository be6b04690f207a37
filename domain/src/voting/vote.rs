//! Vote types for deliberation voting
//!
//! A [`Vote`] always names a primary proposal; the [`Ballot`] carries the
//! rule-specific detail (ratings or a ranking) the aggregator works from.

use serde::{Deserialize, Serialize};

/// Highest allowed rating
pub const MAX_RATING: u8 = 5;

/// Why a vote had to be defaulted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The response did not contain a usable vote
    ParseFailure,
    /// The provider call failed or timed out
    ProviderFailure,
}

impl FallbackReason {
    /// Justification recorded on the defaulted vote
    pub fn justification(&self) -> &'static str {
        match self {
            FallbackReason::ParseFailure => "Default vote due to parsing issue",
            FallbackReason::ProviderFailure => "Technical difficulties prevented voting",
        }
    }
}

/// One agent's rating of one proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRating {
    pub proposal_id: String,
    pub rating: u8,
}

impl ProposalRating {
    /// Create a rating (clamped to `0..=MAX_RATING`)
    pub fn new(proposal_id: impl Into<String>, rating: u8) -> Self {
        Self {
            proposal_id: proposal_id.into(),
            rating: rating.min(MAX_RATING),
        }
    }
}

/// Rule-shaped detail of a vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ballot {
    /// Single choice (majority / unanimity)
    Choice,
    /// Ratings for each proposal the agent scored
    Rated { ratings: Vec<ProposalRating> },
    /// Proposal ids from most to least preferred
    Ranked { ranking: Vec<String> },
    /// Substituted vote for the first proposal
    Default { reason: FallbackReason },
}

/// A single agent's vote
///
/// # Example
///
/// ```
/// use roundtable_domain::voting::{ProposalRating, Vote};
///
/// let vote = Vote::rated(
///     "a1",
///     vec![ProposalRating::new("p1", 3), ProposalRating::new("p2", 5)],
///     "p2 is more concrete",
/// )
/// .unwrap();
/// assert_eq!(vote.proposal_id, "p2");
/// assert_eq!(vote.rating(), Some(5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub agent_id: String,
    /// Primary choice
    pub proposal_id: String,
    pub ballot: Ballot,
    pub justification: String,
}

impl Vote {
    /// A single-choice vote
    pub fn choice(
        agent_id: impl Into<String>,
        proposal_id: impl Into<String>,
        justification: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            proposal_id: proposal_id.into(),
            ballot: Ballot::Choice,
            justification: justification.into(),
        }
    }

    /// A rated vote; the highest rating (first on ties) is the primary choice.
    ///
    /// Returns `None` when there are no ratings.
    pub fn rated(
        agent_id: impl Into<String>,
        ratings: Vec<ProposalRating>,
        justification: impl Into<String>,
    ) -> Option<Self> {
        let mut best: Option<&ProposalRating> = None;
        for rating in &ratings {
            if best.is_none_or(|b| rating.rating > b.rating) {
                best = Some(rating);
            }
        }
        let proposal_id = best?.proposal_id.clone();
        Some(Self {
            agent_id: agent_id.into(),
            proposal_id,
            ballot: Ballot::Rated { ratings },
            justification: justification.into(),
        })
    }

    /// A ranked vote; the first entry is the primary choice.
    ///
    /// Returns `None` for an empty ranking.
    pub fn ranked(
        agent_id: impl Into<String>,
        ranking: Vec<String>,
        justification: impl Into<String>,
    ) -> Option<Self> {
        let proposal_id = ranking.first()?.clone();
        Some(Self {
            agent_id: agent_id.into(),
            proposal_id,
            ballot: Ballot::Ranked { ranking },
            justification: justification.into(),
        })
    }

    /// A defaulted vote for `proposal_id`
    pub fn fallback(
        agent_id: impl Into<String>,
        proposal_id: impl Into<String>,
        reason: FallbackReason,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            proposal_id: proposal_id.into(),
            ballot: Ballot::Default { reason },
            justification: reason.justification().to_string(),
        }
    }

    /// Rating of the primary choice (rated ballots only)
    pub fn rating(&self) -> Option<u8> {
        match &self.ballot {
            Ballot::Rated { ratings } => ratings
                .iter()
                .find(|r| r.proposal_id == self.proposal_id)
                .map(|r| r.rating),
            _ => None,
        }
    }

    pub fn ratings(&self) -> &[ProposalRating] {
        match &self.ballot {
            Ballot::Rated { ratings } => ratings,
            _ => &[],
        }
    }

    pub fn ranking(&self) -> &[String] {
        match &self.ballot {
            Ballot::Ranked { ranking } => ranking,
            _ => &[],
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.ballot, Ballot::Default { .. })
    }

    /// Every proposal id this vote mentions
    pub fn referenced_ids(&self) -> Vec<&str> {
        let mut ids = vec![self.proposal_id.as_str()];
        ids.extend(self.ratings().iter().map(|r| r.proposal_id.as_str()));
        ids.extend(self.ranking().iter().map(String::as_str));
        ids
    }
}
