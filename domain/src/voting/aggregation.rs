//! Vote aggregation
//!
//! Four deterministic, pure algorithms that turn votes into a winner:
//!
//! | Rule | Score per proposal | consensus_score |
//! |------|--------------------|-----------------|
//! | majority | number of primary choices | `max / votes` |
//! | unanimity | same as majority; all-agree wins outright, else majority result | `1.0` or majority's |
//! | rated | sum of 1-5 ratings | `max / (votes * 5)` |
//! | ranked | Borda: position `i` earns `n - i` | `max / (votes * n)` |
//!
//! Ties always go to the earliest proposal in `proposals` order and set
//! `tie_breaker`. Ids that do not belong to `proposals` are ignored.

use super::rule::VotingRule;
use super::vote::{Ballot, MAX_RATING, Vote};
use crate::core::error::DomainError;
use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of aggregating a vote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteAggregation {
    pub winner: Proposal,
    /// Score per proposal id (every proposal is present)
    pub scores: BTreeMap<String, f64>,
    /// Agreement strength behind the winner, in `[0, 1]`
    pub consensus_score: f64,
    /// Whether the winner was chosen by array order among equal scores
    pub tie_breaker: bool,
}

impl VoteAggregation {
    pub fn score_of(&self, proposal_id: &str) -> f64 {
        self.scores.get(proposal_id).copied().unwrap_or(0.0)
    }
}

/// Aggregate `votes` with the given rule
///
/// # Example
///
/// ```
/// use roundtable_domain::{Proposal, Vote, VotingRule, aggregate_votes};
///
/// let proposals = vec![
///     Proposal::new("a1", "One", "").with_id("p1"),
///     Proposal::new("a2", "Two", "").with_id("p2"),
/// ];
/// let votes = vec![
///     Vote::choice("a1", "p2", ""),
///     Vote::choice("a2", "p2", ""),
/// ];
/// let result = aggregate_votes(VotingRule::Unanimity, &votes, &proposals).unwrap();
/// assert_eq!(result.winner.id, "p2");
/// assert_eq!(result.consensus_score, 1.0);
/// ```
pub fn aggregate_votes(
    rule: VotingRule,
    votes: &[Vote],
    proposals: &[Proposal],
) -> Result<VoteAggregation, DomainError> {
    match rule {
        VotingRule::Majority => aggregate_majority(votes, proposals),
        VotingRule::Unanimity => aggregate_unanimity(votes, proposals),
        VotingRule::Rated => aggregate_rated(votes, proposals),
        VotingRule::Ranked => aggregate_ranked(votes, proposals),
    }
}

/// Raw per-proposal scores for `rule`, in `proposals` order.
///
/// Unanimity tallies the same counts as majority.
pub fn tally(rule: VotingRule, votes: &[Vote], proposals: &[Proposal]) -> Vec<f64> {
    let mut scores = vec![0.0; proposals.len()];
    let index_of = |id: &str| proposals.iter().position(|p| p.id == id);
    let n = proposals.len();

    for vote in votes {
        match rule {
            VotingRule::Majority | VotingRule::Unanimity => {
                if let Some(i) = index_of(&vote.proposal_id) {
                    scores[i] += 1.0;
                }
            }
            VotingRule::Rated => {
                if let Ballot::Rated { ratings } = &vote.ballot {
                    for rating in ratings {
                        if let Some(i) = index_of(&rating.proposal_id) {
                            scores[i] += f64::from(rating.rating);
                        }
                    }
                }
            }
            VotingRule::Ranked => {
                if let Ballot::Ranked { ranking } = &vote.ballot {
                    for (position, id) in ranking.iter().enumerate() {
                        if let Some(i) = index_of(id) {
                            scores[i] += n.saturating_sub(position) as f64;
                        }
                    }
                }
            }
        }
    }

    scores
}

pub fn aggregate_majority(
    votes: &[Vote],
    proposals: &[Proposal],
) -> Result<VoteAggregation, DomainError> {
    let scores = tally(VotingRule::Majority, votes, proposals);
    build(proposals, scores, votes.len() as f64)
}

/// Unanimity: a proposal chosen by every voter wins with full consensus;
/// anything less is decided by [`aggregate_majority`].
pub fn aggregate_unanimity(
    votes: &[Vote],
    proposals: &[Proposal],
) -> Result<VoteAggregation, DomainError> {
    let scores = tally(VotingRule::Unanimity, votes, proposals);
    let total = votes.len() as f64;

    if !votes.is_empty()
        && let Some(index) = scores.iter().position(|&count| count == total)
    {
        return Ok(VoteAggregation {
            winner: proposals[index].clone(),
            scores: score_map(proposals, &scores),
            consensus_score: 1.0,
            tie_breaker: false,
        });
    }

    aggregate_majority(votes, proposals)
}

pub fn aggregate_rated(
    votes: &[Vote],
    proposals: &[Proposal],
) -> Result<VoteAggregation, DomainError> {
    let scores = tally(VotingRule::Rated, votes, proposals);
    build(proposals, scores, votes.len() as f64 * f64::from(MAX_RATING))
}

/// Borda count over each vote's ranking
pub fn aggregate_ranked(
    votes: &[Vote],
    proposals: &[Proposal],
) -> Result<VoteAggregation, DomainError> {
    let scores = tally(VotingRule::Ranked, votes, proposals);
    build(
        proposals,
        scores,
        votes.len() as f64 * proposals.len() as f64,
    )
}

/// Pick the first maximum and normalise it by `max_possible`
fn build(
    proposals: &[Proposal],
    scores: Vec<f64>,
    max_possible: f64,
) -> Result<VoteAggregation, DomainError> {
    if proposals.is_empty() {
        return Err(DomainError::NoProposals);
    }

    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    let best_score = scores[best];
    let tied = scores.iter().filter(|&&s| s == best_score).count() > 1;

    let consensus_score = if max_possible > 0.0 {
        (best_score / max_possible).clamp(0.0, 1.0)
    } else {
        0.0
    };

    Ok(VoteAggregation {
        winner: proposals[best].clone(),
        scores: score_map(proposals, &scores),
        consensus_score,
        tie_breaker: tied,
    })
}

fn score_map(proposals: &[Proposal], scores: &[f64]) -> BTreeMap<String, f64> {
    proposals
        .iter()
        .zip(scores)
        .map(|(p, &s)| (p.id.clone(), s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::vote::{FallbackReason, ProposalRating};

    fn proposals(n: usize) -> Vec<Proposal> {
        (1..=n)
            .map(|i| Proposal::new(format!("a{}", i), format!("Proposal {}", i), "").with_id(format!("P{}", i)))
            .collect()
    }

    fn choices(ids: &[&str]) -> Vec<Vote> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| Vote::choice(format!("a{}", i), *id, ""))
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== Majority ====================

    #[test]
    fn test_majority_clear_winner() {
        let result = aggregate_majority(&choices(&["P1", "P1", "P2"]), &proposals(3)).unwrap();
        assert_eq!(result.winner.id, "P1");
        assert!(approx(result.consensus_score, 2.0 / 3.0));
        assert!(!result.tie_breaker);
        assert_eq!(result.score_of("P1"), 2.0);
        assert_eq!(result.score_of("P2"), 1.0);
        assert_eq!(result.score_of("P3"), 0.0);
    }

    #[test]
    fn test_majority_tie_goes_to_first_proposal() {
        let result = aggregate_majority(&choices(&["P1", "P2"]), &proposals(3)).unwrap();
        assert_eq!(result.winner.id, "P1");
        assert!(result.tie_breaker);
        assert!(approx(result.consensus_score, 0.5));
    }

    #[test]
    fn test_majority_tie_uses_proposal_order_not_vote_order() {
        let result = aggregate_majority(&choices(&["P3", "P2"]), &proposals(3)).unwrap();
        assert_eq!(result.winner.id, "P2");
        assert!(result.tie_breaker);
    }

    #[test]
    fn test_majority_counts_default_votes() {
        let mut votes = choices(&["P2"]);
        votes.push(Vote::fallback("x", "P1", FallbackReason::ProviderFailure));
        votes.push(Vote::fallback("y", "P1", FallbackReason::ParseFailure));
        let result = aggregate_majority(&votes, &proposals(2)).unwrap();
        assert_eq!(result.winner.id, "P1");
    }

    #[test]
    fn test_majority_ignores_unknown_ids() {
        let result = aggregate_majority(&choices(&["nope", "P2"]), &proposals(2)).unwrap();
        assert_eq!(result.winner.id, "P2");
        assert!(approx(result.consensus_score, 0.5));
    }

    #[test]
    fn test_no_votes() {
        let result = aggregate_majority(&[], &proposals(2)).unwrap();
        assert_eq!(result.winner.id, "P1");
        assert_eq!(result.consensus_score, 0.0);
        assert!(result.tie_breaker);
    }

    #[test]
    fn test_no_proposals_is_an_error() {
        for rule in VotingRule::ALL {
            assert_eq!(
                aggregate_votes(rule, &choices(&["P1"]), &[]).unwrap_err(),
                DomainError::NoProposals
            );
        }
    }

    // ==================== Unanimity ====================

    #[test]
    fn test_unanimity_reached() {
        let result = aggregate_unanimity(&choices(&["P2", "P2", "P2"]), &proposals(3)).unwrap();
        assert_eq!(result.winner.id, "P2");
        assert_eq!(result.consensus_score, 1.0);
        assert!(!result.tie_breaker);
    }

    #[test]
    fn test_unanimity_not_reached_matches_majority() {
        let votes = choices(&["P1", "P1", "P2"]);
        let props = proposals(3);
        let unanimity = aggregate_unanimity(&votes, &props).unwrap();
        let majority = aggregate_majority(&votes, &props).unwrap();
        assert_eq!(unanimity, majority);
    }

    #[test]
    fn test_unanimity_without_votes_falls_back() {
        let result = aggregate_unanimity(&[], &proposals(2)).unwrap();
        assert_eq!(result.consensus_score, 0.0);
    }

    // ==================== Rated ====================

    #[test]
    fn test_rated_sums_all_ratings() {
        let votes = vec![
            Vote::rated(
                "a",
                vec![ProposalRating::new("P1", 5), ProposalRating::new("P2", 3)],
                "",
            )
            .unwrap(),
            Vote::rated(
                "b",
                vec![ProposalRating::new("P1", 4), ProposalRating::new("P2", 5)],
                "",
            )
            .unwrap(),
        ];
        let result = aggregate_rated(&votes, &proposals(2)).unwrap();
        assert_eq!(result.score_of("P1"), 9.0);
        assert_eq!(result.score_of("P2"), 8.0);
        assert_eq!(result.winner.id, "P1");
        assert!(approx(result.consensus_score, 0.9));
        assert!(!result.tie_breaker);
    }

    #[test]
    fn test_rated_default_votes_contribute_nothing() {
        let votes = vec![
            Vote::rated("a", vec![ProposalRating::new("P2", 4)], "").unwrap(),
            Vote::fallback("b", "P1", FallbackReason::ProviderFailure),
        ];
        let result = aggregate_rated(&votes, &proposals(2)).unwrap();
        assert_eq!(result.winner.id, "P2");
        assert_eq!(result.score_of("P1"), 0.0);
        assert!(approx(result.consensus_score, 4.0 / 10.0));
    }

    // ==================== Ranked ====================

    #[test]
    fn test_borda_tie() {
        let votes = vec![
            Vote::ranked("a", vec!["P1".into(), "P2".into()], "").unwrap(),
            Vote::ranked("b", vec!["P2".into(), "P1".into()], "").unwrap(),
        ];
        let result = aggregate_ranked(&votes, &proposals(2)).unwrap();
        assert_eq!(result.score_of("P1"), 3.0);
        assert_eq!(result.score_of("P2"), 3.0);
        assert_eq!(result.winner.id, "P1");
        assert!(approx(result.consensus_score, 0.75));
        assert!(result.tie_breaker);
    }

    #[test]
    fn test_borda_partial_ranking() {
        let votes = vec![
            Vote::ranked("a", vec!["P3".into()], "").unwrap(),
            Vote::ranked("b", vec!["P2".into(), "P3".into(), "P1".into()], "").unwrap(),
        ];
        let result = aggregate_ranked(&votes, &proposals(3)).unwrap();
        // P3: 3 + 2, P2: 3, P1: 1
        assert_eq!(result.score_of("P3"), 5.0);
        assert_eq!(result.score_of("P2"), 3.0);
        assert_eq!(result.score_of("P1"), 1.0);
        assert_eq!(result.winner.id, "P3");
        assert!(approx(result.consensus_score, 5.0 / 6.0));
    }

    #[test]
    fn test_aggregate_dispatch() {
        let votes = choices(&["P2", "P2"]);
        let result = aggregate_votes(VotingRule::Majority, &votes, &proposals(2)).unwrap();
        assert_eq!(result.winner.id, "P2");
        assert_eq!(result.consensus_score, 1.0);
    }
}
