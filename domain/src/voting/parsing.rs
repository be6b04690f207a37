//! Vote response parsing.
//!
//! Extracts a rule-shaped [`Vote`] from a free-form voting response. Pure
//! text matching; a response that yields nothing usable is reported as
//! [`VoteParse::Unparsed`] so the caller can substitute a default vote.
//!
//! | Rule | Expected lines |
//! |------|----------------|
//! | majority / unanimity | `VOTE: <n>` |
//! | rated | `Proposal <n>: <1-5>` (one per proposal) |
//! | ranked | `1st: Proposal <n>`, `2nd: Proposal <n>`, ... |
//! | all | optional `REASON: <text>` |
//!
//! Proposal numbers are 1-based indices into the proposal list.

use super::rule::VotingRule;
use super::vote::{FallbackReason, ProposalRating, Vote};
use crate::core::string::first_chars;
use crate::proposal::Proposal;
use regex::Regex;
use std::sync::LazyLock;

// Ballot lines must start a line (after markdown bullets or emphasis), so
// restated proposal titles earlier in a response are not read as votes.
static VOTE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[\s#*-]*VOTE\s*\**\s*:\s*\**\s*(?:proposal\s*)?#?(\d+)\b").unwrap()
});
static RATING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[\s#*-]*proposal\s*#?(\d+)\s*\**\s*:\s*\**\s*(\d+)(?:\s*/\s*5)?\**(?:\s*$|[ \t]+[-(])",
    )
    .unwrap()
});
static RANK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[\s#*-]*(\d+)\s*(?:st|nd|rd|th)\s*\**\s*:\s*\**\s*proposal\s*#?(\d+)\b").unwrap()
});
static REASON_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[\s#*]*(?:reason|reasoning|justification)\s*\**\s*:\s*\**\s*(.+)$").unwrap()
});

/// Characters of raw response kept as justification when no `REASON:` line exists
pub const JUSTIFICATION_CHARS: usize = 300;

/// Outcome of parsing a vote response
#[derive(Debug, Clone, PartialEq)]
pub enum VoteParse {
    Parsed(Vote),
    Unparsed,
}

impl VoteParse {
    /// The parsed vote, or a default vote for the first proposal.
    ///
    /// Returns `None` only when there are no proposals at all.
    pub fn into_vote_or_default(self, agent_id: &str, proposals: &[Proposal]) -> Option<Vote> {
        match self {
            VoteParse::Parsed(vote) => Some(vote),
            VoteParse::Unparsed => proposals
                .first()
                .map(|p| Vote::fallback(agent_id, &p.id, FallbackReason::ParseFailure)),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, VoteParse::Parsed(_))
    }
}

/// Parse a voting response according to `rule`
///
/// # Examples
///
/// ```
/// use roundtable_domain::{Proposal, VotingRule};
/// use roundtable_domain::voting::parsing::{VoteParse, parse_vote_response};
///
/// let proposals = vec![
///     Proposal::new("a1", "One", "").with_id("p1"),
///     Proposal::new("a2", "Two", "").with_id("p2"),
/// ];
/// let parsed = parse_vote_response("a1", VotingRule::Majority, "VOTE: 2\nREASON: cheaper", &proposals);
/// match parsed {
///     VoteParse::Parsed(vote) => {
///         assert_eq!(vote.proposal_id, "p2");
///         assert_eq!(vote.justification, "cheaper");
///     }
///     VoteParse::Unparsed => unreachable!(),
/// }
/// ```
pub fn parse_vote_response(
    agent_id: &str,
    rule: VotingRule,
    response: &str,
    proposals: &[Proposal],
) -> VoteParse {
    let justification = extract_justification(response);

    let vote = match rule {
        VotingRule::Majority | VotingRule::Unanimity => parse_choice(response, proposals)
            .map(|id| Vote::choice(agent_id, id, justification)),
        VotingRule::Rated => {
            Vote::rated(agent_id, parse_ratings(response, proposals), justification)
        }
        VotingRule::Ranked => {
            Vote::ranked(agent_id, parse_ranking(response, proposals), justification)
        }
    };

    match vote {
        Some(vote) => VoteParse::Parsed(vote),
        None => VoteParse::Unparsed,
    }
}

/// Map a 1-based proposal number to its id
fn proposal_at(proposals: &[Proposal], number: &str) -> Option<String> {
    let index: usize = number.parse().ok()?;
    index
        .checked_sub(1)
        .and_then(|i| proposals.get(i))
        .map(|p| p.id.clone())
}

fn parse_choice(response: &str, proposals: &[Proposal]) -> Option<String> {
    VOTE_LINE
        .captures_iter(response)
        .find_map(|caps| proposal_at(proposals, &caps[1]))
}

/// Ratings in response order; the first rating for a proposal wins.
fn parse_ratings(response: &str, proposals: &[Proposal]) -> Vec<ProposalRating> {
    let mut ratings: Vec<ProposalRating> = Vec::new();
    for caps in RATING_LINE.captures_iter(response) {
        let Some(id) = proposal_at(proposals, &caps[1]) else {
            continue;
        };
        let Ok(rating) = caps[2].parse::<u8>() else {
            continue;
        };
        if ratings.iter().all(|r| r.proposal_id != id) {
            ratings.push(ProposalRating::new(id, rating));
        }
    }
    ratings
}

/// Ranking ordered by the stated position; duplicates and unknown numbers dropped.
fn parse_ranking(response: &str, proposals: &[Proposal]) -> Vec<String> {
    let mut entries: Vec<(usize, String)> = RANK_LINE
        .captures_iter(response)
        .filter_map(|caps| {
            let position = caps[1].parse::<usize>().ok()?;
            let id = proposal_at(proposals, &caps[2])?;
            Some((position, id))
        })
        .collect();
    entries.sort_by_key(|(position, _)| *position);

    let mut ranking: Vec<String> = Vec::with_capacity(entries.len());
    for (_, id) in entries {
        if !ranking.contains(&id) {
            ranking.push(id);
        }
    }
    ranking
}

fn extract_justification(response: &str) -> String {
    if let Some(caps) = REASON_LINE.captures(response) {
        let reason = caps[1].trim().trim_matches('*').trim();
        if !reason.is_empty() {
            return reason.to_string();
        }
    }
    first_chars(response.trim(), JUSTIFICATION_CHARS).to_string()
}
