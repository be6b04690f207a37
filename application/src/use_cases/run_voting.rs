//! Run Voting use case
//!
//! Collects one rule-shaped vote per agent and aggregates them into a winner.
//! Votes are never dropped: an unparseable reply or a failed request becomes
//! a default vote for the first proposal.

use crate::config::DeliberationConfig;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{AgentRequest, generate_for_agents};
use roundtable_domain::{
    DomainError, FallbackReason, PromptTemplate, Proposal, Session, SessionPhase, Vote,
    VoteAggregation, VotingRule, aggregate_votes, parse_vote_response,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Votes and their aggregation
#[derive(Debug, Clone, Serialize)]
pub struct VotingOutcome {
    pub votes: Vec<Vote>,
    pub aggregation: VoteAggregation,
}

impl VotingOutcome {
    pub fn winner(&self) -> &Proposal {
        &self.aggregation.winner
    }
}

/// Use case for the voting phase
pub struct RunVotingUseCase<P: LlmProvider + 'static> {
    provider: Arc<P>,
    config: DeliberationConfig,
}

impl<P: LlmProvider + 'static> RunVotingUseCase<P> {
    pub fn new(provider: Arc<P>, config: DeliberationConfig) -> Self {
        Self { provider, config }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        session: &Session,
        rule: VotingRule,
    ) -> Result<VotingOutcome, DomainError> {
        self.execute_with_progress(session, rule, &NoProgress).await
    }

    /// Collect votes over `session.proposals()` and aggregate them with `rule`.
    ///
    /// Fails only when the session has no proposals.
    pub async fn execute_with_progress(
        &self,
        session: &Session,
        rule: VotingRule,
        progress: &dyn ProgressNotifier,
    ) -> Result<VotingOutcome, DomainError> {
        let proposals = session.proposals();
        if proposals.is_empty() {
            return Err(DomainError::NoProposals);
        }

        let agents = session.agents();
        info!(
            "Voting: {} agents over {} proposals ({})",
            agents.len(),
            proposals.len(),
            rule
        );
        progress.on_phase_start(SessionPhase::Voting, agents.len());

        let prompt = PromptTemplate::voting_prompt(session.topic(), rule, proposals);
        let requests = agents
            .iter()
            .map(|agent| AgentRequest {
                agent: agent.clone(),
                prompt: prompt.clone(),
                max_tokens: self.config.voting_max_tokens,
            })
            .collect();

        let results = generate_for_agents(
            &self.provider,
            requests,
            self.config.agent_timeout,
            SessionPhase::Voting,
            progress,
        )
        .await;

        let mut votes = Vec::with_capacity(agents.len());
        for (agent, result) in agents.iter().zip(results) {
            let vote = match result {
                Ok(content) => {
                    let parsed = parse_vote_response(&agent.id, rule, &content, proposals);
                    if !parsed.is_parsed() {
                        debug!("{}: vote could not be parsed, using default", agent.id);
                    }
                    parsed.into_vote_or_default(&agent.id, proposals)
                }
                Err(e) => {
                    warn!("{}: using default vote ({})", agent.id, e);
                    proposals
                        .first()
                        .map(|p| Vote::fallback(&agent.id, &p.id, FallbackReason::ProviderFailure))
                }
            };
            votes.extend(vote);
        }

        let aggregation = aggregate_votes(rule, &votes, proposals)?;
        info!(
            "Voting: winner '{}' (consensus {:.2}{})",
            aggregation.winner.title,
            aggregation.consensus_score,
            if aggregation.tie_breaker { ", tie broken by order" } else { "" }
        );
        progress.on_phase_complete(SessionPhase::Voting);

        Ok(VotingOutcome { votes, aggregation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Reply, ScriptedProvider, panel};

    fn session_with_proposals(agents: usize) -> Session {
        let mut session = Session::new("Pick a queue", panel(agents));
        session.advance(SessionPhase::Voting).unwrap();
        session
            .append_proposals(vec![
                Proposal::new("a1", "Kafka", "Log-based").with_id("P1"),
                Proposal::new("a2", "SQS", "Managed").with_id("P2"),
                Proposal::new("a3", "Redis", "In-memory").with_id("P3"),
            ])
            .unwrap();
        session
    }

    fn use_case(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, RunVotingUseCase<ScriptedProvider>) {
        let provider = Arc::new(provider);
        (
            Arc::clone(&provider),
            RunVotingUseCase::new(provider, DeliberationConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_majority_vote() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("VOTE: 1\nREASON: proven")])
            .script("a2", vec![Reply::text("VOTE: 1")])
            .script("a3", vec![Reply::text("VOTE: 2")]);
        let (provider, voting) = use_case(provider);
        let session = session_with_proposals(3);

        let outcome = voting.execute(&session, VotingRule::Majority).await.unwrap();

        assert_eq!(outcome.winner().id, "P1");
        assert!((outcome.aggregation.consensus_score - 2.0 / 3.0).abs() < 1e-9);
        assert!(!outcome.aggregation.tie_breaker);
        assert_eq!(outcome.votes[0].justification, "proven");
        assert!(provider.calls()[0].prompt.contains("Proposal 3: Redis"));
        assert_eq!(provider.calls()[0].max_tokens, 500);
    }

    #[tokio::test]
    async fn test_rated_vote_keeps_all_ratings() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("Proposal 1: 5\nProposal 2: 3\nProposal 3: 1")])
            .script("a2", vec![Reply::text("Proposal 1: 4\nProposal 2: 5\nProposal 3: 1")]);
        let (_, voting) = use_case(provider);
        let session = session_with_proposals(2);

        let outcome = voting.execute(&session, VotingRule::Rated).await.unwrap();

        assert_eq!(outcome.aggregation.score_of("P1"), 9.0);
        assert_eq!(outcome.aggregation.score_of("P2"), 8.0);
        assert_eq!(outcome.winner().id, "P1");
        assert!((outcome.aggregation.consensus_score - 0.9).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_ranked_vote() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("1st: Proposal 3\n2nd: Proposal 1\n3rd: Proposal 2")])
            .script("a2", vec![Reply::text("1st: Proposal 3\n2nd: Proposal 2\n3rd: Proposal 1")]);
        let (_, voting) = use_case(provider);
        let session = session_with_proposals(2);

        let outcome = voting.execute(&session, VotingRule::Ranked).await.unwrap();

        assert_eq!(outcome.winner().id, "P3");
        assert_eq!(outcome.aggregation.score_of("P3"), 6.0);
        assert_eq!(outcome.votes[0].ranking().len(), 3);
    }

    #[tokio::test]
    async fn test_failures_become_default_votes() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::Fail])
            .script("a2", vec![Reply::text("I cannot decide.")])
            .script("a3", vec![Reply::text("VOTE: 2")]);
        let (_, voting) = use_case(provider);
        let session = session_with_proposals(3);

        let outcome = voting.execute(&session, VotingRule::Majority).await.unwrap();

        assert_eq!(outcome.votes.len(), 3);
        assert_eq!(outcome.votes[0].proposal_id, "P1");
        assert_eq!(
            outcome.votes[0].justification,
            "Technical difficulties prevented voting"
        );
        assert_eq!(outcome.votes[1].proposal_id, "P1");
        assert_eq!(outcome.votes[1].justification, "Default vote due to parsing issue");
        assert_eq!(outcome.votes[2].proposal_id, "P2");
        assert_eq!(outcome.winner().id, "P1");
    }

    #[tokio::test]
    async fn test_every_reference_resolves() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("1st: Proposal 9\n2nd: Proposal 2")])
            .script("a2", vec![Reply::Panic])
            .script("a3", vec![Reply::text("nonsense")]);
        let (_, voting) = use_case(provider);
        let session = session_with_proposals(3);

        let outcome = voting.execute(&session, VotingRule::Ranked).await.unwrap();

        assert_eq!(outcome.votes.len(), 3);
        for vote in &outcome.votes {
            for id in vote.referenced_ids() {
                assert!(session.proposal(id).is_some(), "dangling reference {}", id);
            }
        }
    }

    #[tokio::test]
    async fn test_no_proposals_is_an_error() {
        let (provider, voting) = use_case(ScriptedProvider::new());
        let session = Session::new("t", panel(2));

        let result = voting.execute(&session, VotingRule::Majority).await;

        assert_eq!(result.unwrap_err(), DomainError::NoProposals);
        assert!(provider.calls().is_empty());
    }
}
