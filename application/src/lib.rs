//! Application layer for roundtable
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.
//!
//! ```text
//! RunSessionUseCase
//!   ├─ RunDiscussionUseCase  → Message[]
//!   ├─ RunProposalsUseCase   → Proposal[]   (one per agent)
//!   └─ RunVotingUseCase      → Vote[] + VoteAggregation
//! ```

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeliberationConfig;
pub use ports::{
    llm_provider::{
        ChatMessage, ChatRole, GenerateOptions, Generation, LlmProvider, ProviderError, TokenUsage,
    },
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_discussion::RunDiscussionUseCase;
pub use use_cases::run_proposals::RunProposalsUseCase;
pub use use_cases::run_session::{
    RunSessionError, RunSessionInput, RunSessionUseCase, SessionOutcome,
};
pub use use_cases::run_voting::{RunVotingUseCase, VotingOutcome};
