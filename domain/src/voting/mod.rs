//! Voting domain
//!
//! This module contains the social-choice side of a deliberation: the
//! rules, the rule-shaped ballots, parsing of voting responses, and the
//! aggregation algorithms that pick a winner.
//!
//! # Flow
//!
//! ```text
//! ┌──────────────┐   parse_vote_response   ┌──────────┐   aggregate_votes   ┌─────────────────┐
//! │ LLM response │ ──────────────────────> │  Vote[]  │ ──────────────────> │ VoteAggregation │
//! └──────────────┘   (per VotingRule)      └──────────┘   (per VotingRule)  └─────────────────┘
//! ```
//!
//! Every aggregator is a pure function of `(votes, proposals)`. Ties resolve
//! to the earliest proposal, so results only depend on proposal order.

pub mod aggregation;
pub mod distribution;
pub mod parsing;
pub mod rule;
pub mod vote;

pub use aggregation::{
    VoteAggregation, aggregate_majority, aggregate_ranked, aggregate_rated, aggregate_unanimity,
    aggregate_votes, tally,
};
pub use distribution::format_vote_distribution;
pub use parsing::{VoteParse, parse_vote_response};
pub use rule::VotingRule;
pub use vote::{Ballot, FallbackReason, MAX_RATING, ProposalRating, Vote};
