//! Run Session use case
//!
//! Orchestrates the full deliberation: discussion, proposals, voting.
//! The orchestrator is the only owner of the [`Session`]; each phase reads
//! it and returns new records that are appended here.

use crate::config::DeliberationConfig;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::run_discussion::RunDiscussionUseCase;
use crate::use_cases::run_proposals::RunProposalsUseCase;
use crate::use_cases::run_voting::RunVotingUseCase;
use roundtable_domain::{
    AgentPersona, DomainError, Proposal, Session, SessionPhase, Vote, VoteAggregation, VotingRule,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during a deliberation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunSessionError {
    #[error("Invalid session state: {0}")]
    InvalidSessionState(String),
}

impl From<DomainError> for RunSessionError {
    fn from(e: DomainError) -> Self {
        RunSessionError::InvalidSessionState(e.to_string())
    }
}

/// Input for the RunSession use case
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    pub topic: String,
    pub agents: Vec<AgentPersona>,
    pub rule: VotingRule,
    /// Whether to run the discussion phase before proposals
    pub enable_discussion: bool,
}

impl RunSessionInput {
    pub fn new(topic: impl Into<String>, agents: Vec<AgentPersona>, rule: VotingRule) -> Self {
        Self {
            topic: topic.into(),
            agents,
            rule,
            enable_discussion: true,
        }
    }

    pub fn without_discussion(mut self) -> Self {
        self.enable_discussion = false;
        self
    }
}

/// Final result of a deliberation
#[derive(Debug, Clone, Serialize)]
pub struct SessionOutcome {
    pub rule: VotingRule,
    pub winner: Proposal,
    pub votes: Vec<Vote>,
    pub aggregation: VoteAggregation,
    pub session: Session,
}

/// Use case for running a whole deliberation session
pub struct RunSessionUseCase<P: LlmProvider + 'static> {
    provider: Arc<P>,
    config: DeliberationConfig,
}

impl<P: LlmProvider + 'static> RunSessionUseCase<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            config: DeliberationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DeliberationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DeliberationConfig {
        &self.config
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunSessionInput) -> Result<SessionOutcome, RunSessionError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    ///
    /// Fails only when there are no agents or, after the proposal phase,
    /// no proposals. Every per-agent failure is absorbed by the phases.
    pub async fn execute_with_progress(
        &self,
        input: RunSessionInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SessionOutcome, RunSessionError> {
        let mut session = Session::new(input.topic, input.agents);

        if session.agents().is_empty() {
            session.fail("no agents")?;
            return Err(RunSessionError::InvalidSessionState(
                "session has no agents".to_string(),
            ));
        }

        info!(
            "Starting session {} with {} agents ({})",
            session.id(),
            session.agents().len(),
            input.rule
        );

        // Phase 1: Discussion
        if input.enable_discussion && self.config.discussion_rounds > 0 {
            session.advance(SessionPhase::Discussing)?;
            let messages = RunDiscussionUseCase::new(Arc::clone(&self.provider), self.config.clone())
                .execute_with_progress(&session, progress)
                .await;
            session.append_messages(messages)?;
        }

        // Phase 2: Proposals
        session.advance(SessionPhase::Proposing)?;
        let proposals = RunProposalsUseCase::new(Arc::clone(&self.provider), self.config.clone())
            .execute_with_progress(&session, progress)
            .await;
        session.append_proposals(proposals)?;

        if session.proposals().is_empty() {
            warn!("Session {} produced no proposals", session.id());
            session.fail("no proposals")?;
            return Err(RunSessionError::InvalidSessionState(
                "no proposals to vote on".to_string(),
            ));
        }

        // Phase 3: Voting
        session.advance(SessionPhase::Voting)?;
        let outcome = RunVotingUseCase::new(Arc::clone(&self.provider), self.config.clone())
            .execute_with_progress(&session, input.rule, progress)
            .await?;
        session.append_votes(outcome.votes.clone())?;

        session.advance(SessionPhase::Concluded)?;
        info!(
            "Session {} concluded: '{}' wins",
            session.id(),
            outcome.aggregation.winner.title
        );

        Ok(SessionOutcome {
            rule: input.rule,
            winner: outcome.aggregation.winner.clone(),
            votes: outcome.votes,
            aggregation: outcome.aggregation,
            session,
        })
    }
}
