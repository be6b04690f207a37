//! Run Discussion use case
//!
//! Round-based free discussion. In each round every agent sees the
//! transcript as it stood when the round began and replies concurrently.

use crate::config::DeliberationConfig;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::shared::{AgentRequest, generate_for_agents};
use roundtable_domain::{Message, PromptTemplate, Session, SessionPhase, summarize_transcript};
use std::sync::Arc;
use tracing::{info, warn};

/// Use case for the discussion phase
pub struct RunDiscussionUseCase<P: LlmProvider + 'static> {
    provider: Arc<P>,
    config: DeliberationConfig,
}

impl<P: LlmProvider + 'static> RunDiscussionUseCase<P> {
    pub fn new(provider: Arc<P>, config: DeliberationConfig) -> Self {
        Self { provider, config }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, session: &Session) -> Vec<Message> {
        self.execute_with_progress(session, &NoProgress).await
    }

    /// Run every discussion round and return the new messages.
    ///
    /// Failed turns are skipped; the session itself is not modified.
    pub async fn execute_with_progress(
        &self,
        session: &Session,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Message> {
        let rounds = self.config.discussion_rounds;
        let agents = session.agents();

        info!(
            "Discussion: {} rounds with {} agents",
            rounds,
            agents.len()
        );
        progress.on_phase_start(SessionPhase::Discussing, rounds * agents.len());

        let mut transcript: Vec<Message> = session.messages().to_vec();
        let mut produced: Vec<Message> = Vec::new();

        for round in 1..=rounds {
            progress.on_round_start(round, rounds);

            let summary = summarize_transcript(
                agents,
                &transcript,
                self.config.transcript_window,
                self.config.excerpt_chars,
            );
            let prompt =
                PromptTemplate::discussion_prompt(session.topic(), round, rounds, &summary);

            let requests = agents
                .iter()
                .map(|agent| AgentRequest {
                    agent: agent.clone(),
                    prompt: prompt.clone(),
                    max_tokens: self.config.discussion_max_tokens,
                })
                .collect();

            let results = generate_for_agents(
                &self.provider,
                requests,
                self.config.agent_timeout,
                SessionPhase::Discussing,
                progress,
            )
            .await;

            let mut round_messages = Vec::new();
            for (agent, result) in agents.iter().zip(results) {
                match result {
                    Ok(content) if !content.trim().is_empty() => {
                        round_messages.push(
                            Message::new(&agent.id, content.trim(), SessionPhase::Discussing)
                                .with_round(round),
                        );
                    }
                    Ok(_) => warn!("{} returned an empty turn in round {}, skipping", agent.id, round),
                    Err(_) => warn!("{} skipped round {}", agent.id, round),
                }
            }

            info!(
                "Discussion round {}/{}: {} of {} agents contributed",
                round,
                rounds,
                round_messages.len(),
                agents.len()
            );
            transcript.extend(round_messages.iter().cloned());
            produced.extend(round_messages);
        }

        progress.on_phase_complete(SessionPhase::Discussing);
        produced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Reply, ScriptedProvider, panel};

    fn use_case(provider: ScriptedProvider, rounds: usize) -> (Arc<ScriptedProvider>, RunDiscussionUseCase<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let config = DeliberationConfig::default().with_discussion_rounds(rounds);
        (Arc::clone(&provider), RunDiscussionUseCase::new(provider, config))
    }

    #[tokio::test]
    async fn test_messages_in_agent_order_per_round() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("first from a1"), Reply::text("second from a1")])
            .script("a2", vec![Reply::text("first from a2"), Reply::text("second from a2")]);
        let (_, discussion) = use_case(provider, 2);
        let session = Session::new("Pick a queue", panel(2));

        let messages = discussion.execute(&session).await;

        let summary: Vec<(&str, usize)> = messages
            .iter()
            .map(|m| (m.agent_id.as_str(), m.round))
            .collect();
        assert_eq!(summary, vec![("a1", 1), ("a2", 1), ("a1", 2), ("a2", 2)]);
        assert!(messages.iter().all(|m| m.phase == SessionPhase::Discussing));
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_second_round_sees_first_round() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::text("Kafka is the answer"), Reply::text("ok")])
            .script("a2", vec![Reply::text("SQS is simpler"), Reply::text("ok")]);
        let (provider, discussion) = use_case(provider, 2);
        let session = Session::new("Pick a queue", panel(2));

        discussion.execute(&session).await;

        let calls = provider.calls_for("a2");
        assert_eq!(calls.len(), 2);
        assert!(calls[0].prompt.contains("opening the discussion"));
        assert!(calls[1].prompt.contains("- Agent1: Kafka is the answer"));
        assert!(calls[1].prompt.contains("- Agent2: SQS is simpler"));
        assert_eq!(calls[1].max_tokens, 600);
    }

    #[tokio::test]
    async fn test_failed_turns_are_skipped() {
        let provider = ScriptedProvider::new()
            .script("a1", vec![Reply::Fail])
            .script("a2", vec![Reply::text("still here")])
            .script("a3", vec![Reply::text("   ")]);
        let (_, discussion) = use_case(provider, 1);
        let session = Session::new("t", panel(3));

        let messages = discussion.execute(&session).await;

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].agent_id, "a2");
    }

    #[tokio::test]
    async fn test_zero_rounds_makes_no_calls() {
        let (provider, discussion) = use_case(ScriptedProvider::new(), 0);
        let session = Session::new("t", panel(2));

        assert!(discussion.execute(&session).await.is_empty());
        assert!(provider.calls().is_empty());
    }
}
