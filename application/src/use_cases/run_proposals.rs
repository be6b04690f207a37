//! Run Proposals use case
//!
//! Asks every agent for one structured proposal. The result always holds
//! exactly one proposal per agent, in agent order: a failed request yields
//! a generic fallback and an unstructured reply is completed heuristically.

use crate::config::DeliberationConfig;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{AgentRequest, generate_for_agents};
use roundtable_domain::{
    PromptTemplate, Proposal, ProposalParse, Session, SessionPhase, parse_proposal_response,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for the proposal phase
pub struct RunProposalsUseCase<P: LlmProvider + 'static> {
    provider: Arc<P>,
    config: DeliberationConfig,
}

impl<P: LlmProvider + 'static> RunProposalsUseCase<P> {
    pub fn new(provider: Arc<P>, config: DeliberationConfig) -> Self {
        Self { provider, config }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, session: &Session) -> Vec<Proposal> {
        self.execute_with_progress(session, &NoProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        session: &Session,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Proposal> {
        let agents = session.agents();
        info!("Proposals: requesting one proposal from each of {} agents", agents.len());
        progress.on_phase_start(SessionPhase::Proposing, agents.len());

        let transcript =
            session.transcript_summary(self.config.transcript_window, self.config.excerpt_chars);
        let prompt = PromptTemplate::proposal_prompt(session.topic(), &transcript);

        let requests = agents
            .iter()
            .map(|agent| AgentRequest {
                agent: agent.clone(),
                prompt: prompt.clone(),
                max_tokens: self.config.proposal_max_tokens,
            })
            .collect();

        let results = generate_for_agents(
            &self.provider,
            requests,
            self.config.agent_timeout,
            SessionPhase::Proposing,
            progress,
        )
        .await;

        let proposals: Vec<Proposal> = agents
            .iter()
            .zip(results)
            .map(|(agent, result)| match result {
                Ok(content) => {
                    let parsed = parse_proposal_response(&content);
                    if let ProposalParse::Fallback { missing, .. } = &parsed {
                        debug!(
                            "{}: proposal missing {:?}, filled heuristically",
                            agent.id, missing
                        );
                    }
                    Proposal::from_parse(&agent.id, parsed)
                }
                Err(e) => {
                    warn!("{}: using fallback proposal ({})", agent.id, e);
                    Proposal::fallback(agent, session.topic())
                }
            })
            .collect();

        info!(
            "Proposals: {} collected ({} fallback)",
            proposals.len(),
            proposals.iter().filter(|p| p.is_fallback()).count()
        );
        progress.on_phase_complete(SessionPhase::Proposing);
        proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Reply, ScriptedProvider, panel, proposal_reply};
    use roundtable_domain::{Message, ProposalSource};
    use std::time::Duration;

    fn use_case(provider: ScriptedProvider) -> (Arc<ScriptedProvider>, RunProposalsUseCase<ScriptedProvider>) {
        let provider = Arc::new(provider);
        (
            Arc::clone(&provider),
            RunProposalsUseCase::new(provider, DeliberationConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_one_proposal_per_agent_in_order() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![proposal_reply("Kafka")])
            .script("a2", vec![proposal_reply("SQS")])
            .script("a3", vec![proposal_reply("Redis")]);
        let (_, proposals_uc) = use_case(provider);
        let session = Session::new("Pick a queue", panel(3));

        let proposals = proposals_uc.execute(&session).await;

        let titles: Vec<&str> = proposals.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Kafka", "SQS", "Redis"]);
        assert_eq!(proposals[1].agent_id, "a2");
        assert_eq!(proposals[0].benefits.len(), 3);
        assert_eq!(proposals[0].steps, vec!["Plan", "Build", "Ship"]);
        assert!(proposals.iter().all(|p| p.source == ProposalSource::Parsed));
    }

    #[tokio::test]
    async fn test_failures_become_fallback_proposals() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::Fail])
            .script("a2", vec![proposal_reply("SQS")])
            .script("a3", vec![Reply::Panic]);
        let (_, proposals_uc) = use_case(provider);
        let session = Session::new("Pick a queue", panel(3));

        let proposals = proposals_uc.execute(&session).await;

        assert_eq!(proposals.len(), 3);
        assert!(proposals[0].is_fallback());
        assert_eq!(proposals[0].agent_id, "a1");
        assert!(proposals[0].title.contains("Agent1"));
        assert!(!proposals[1].is_fallback());
        assert!(proposals[2].is_fallback());
        assert_eq!(proposals[2].agent_id, "a3");
    }

    #[tokio::test]
    async fn test_unstructured_reply_is_recovered() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("We should just use Postgres. It is already deployed.")]);
        let (_, proposals_uc) = use_case(provider);
        let session = Session::new("t", panel(1));

        let proposals = proposals_uc.execute(&session).await;

        assert_eq!(proposals[0].source, ProposalSource::Recovered);
        assert_eq!(proposals[0].title, "We should just use Postgres.");
        assert_eq!(proposals[0].benefits.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_agent_times_out_into_fallback() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::Hang])
            .script("a2", vec![proposal_reply("SQS")]);
        let provider = Arc::new(provider);
        let config = DeliberationConfig::default().with_agent_timeout(Some(Duration::from_secs(5)));
        let proposals_uc = RunProposalsUseCase::new(provider, config);
        let session = Session::new("t", panel(2));

        let proposals = proposals_uc.execute(&session).await;

        assert!(proposals[0].is_fallback());
        assert_eq!(proposals[1].title, "SQS");
    }

    #[tokio::test]
    async fn test_prompt_contains_transcript_summary() {
        let provider = ScriptedProvider::new().script("a1", vec![proposal_reply("X")]);
        let (provider, proposals_uc) = use_case(provider);
        let mut session = Session::new("Pick a queue", panel(1));
        session.advance(SessionPhase::Discussing).unwrap();
        session
            .append_messages(vec![Message::new("a1", "Kafka scales well", SessionPhase::Discussing)])
            .unwrap();

        proposals_uc.execute(&session).await;

        let calls = provider.calls();
        assert!(calls[0].prompt.contains("- Agent1: Kafka scales well"));
        assert!(calls[0].prompt.contains("TITLE:"));
        assert_eq!(calls[0].max_tokens, 1200);
    }
}
