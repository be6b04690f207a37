//! Domain layer for roundtable
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns, and no
//! I/O: every function here is deterministic given its inputs.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`Session`] is one deliberation about a topic by a panel of
//! [`AgentPersona`]s. It moves forward through [`SessionPhase`]s:
//!
//! ```text
//! created → discussing → proposing → voting → concluded
//!                      (any non-terminal) → failed
//! ```
//!
//! ## Proposals and votes
//!
//! - **Proposal**: a structured candidate solution parsed from an agent's response
//! - **Vote**: a rule-shaped ballot (choice, ratings or ranking) with a justification
//! - **VotingRule**: majority, unanimity, rated or ranked (Borda count)
//!
//! [`aggregate_votes`] turns votes into a [`VoteAggregation`] with a winner,
//! per-proposal scores and a consensus score in `[0, 1]`.

pub mod config;
pub mod core;
pub mod prompt;
pub mod proposal;
pub mod session;
pub mod voting;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use prompt::PromptTemplate;
pub use proposal::{
    Proposal, ProposalParse, ProposalSource, parse_proposal_response, quality_score,
};
pub use session::{AgentPersona, Message, Session, SessionPhase, summarize_transcript};
pub use voting::{
    Ballot, FallbackReason, ProposalRating, Vote, VoteAggregation, VoteParse, VotingRule,
    aggregate_votes, format_vote_distribution, parse_vote_response,
};
