//! Shared utilities for the phase use cases.
//!
//! Every phase fans out one provider request per agent, then merges the
//! settled results back in agent order. A failure, timeout or panic in one
//! request never affects its siblings.

use crate::ports::llm_provider::{ChatMessage, GenerateOptions, LlmProvider, ProviderError};
use crate::ports::progress::ProgressNotifier;
use roundtable_domain::{AgentPersona, SessionPhase};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// One per-agent request within a phase
pub(crate) struct AgentRequest {
    pub agent: AgentPersona,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Issue every request concurrently and return the outcomes in request order.
///
/// The returned vector always has the same length as `requests`.
pub(crate) async fn generate_for_agents<P: LlmProvider + 'static>(
    provider: &Arc<P>,
    requests: Vec<AgentRequest>,
    timeout: Option<Duration>,
    phase: SessionPhase,
    progress: &dyn ProgressNotifier,
) -> Vec<Result<String, ProviderError>> {
    let total = requests.len();
    let agents: Vec<AgentPersona> = requests.iter().map(|r| r.agent.clone()).collect();
    let mut join_set = JoinSet::new();

    for (index, request) in requests.into_iter().enumerate() {
        let provider = Arc::clone(provider);
        join_set.spawn(async move {
            let result = generate_one(provider.as_ref(), &request, timeout).await;
            (index, result)
        });
    }

    let mut slots: Vec<Option<Result<String, ProviderError>>> = vec![None; total];

    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, result)) => {
                let agent = &agents[index];
                match &result {
                    Ok(_) => debug!("{} responded in {}", agent.id, phase),
                    Err(e) => warn!("{} failed in {}: {}", agent.id, phase, e),
                }
                progress.on_agent_complete(phase, agent, result.is_ok());
                slots[index] = Some(result);
            }
            Err(e) => {
                warn!("Task join error: {}", e);
            }
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                progress.on_agent_complete(phase, &agents[index], false);
                Err(ProviderError::RequestFailed(
                    "agent task did not complete".to_string(),
                ))
            })
        })
        .collect()
}

async fn generate_one<P: LlmProvider + ?Sized>(
    provider: &P,
    request: &AgentRequest,
    timeout: Option<Duration>,
) -> Result<String, ProviderError> {
    let messages = [ChatMessage::user(request.prompt.as_str())];
    let options = GenerateOptions::new(request.max_tokens, request.agent.temperature)
        .with_system_prompt(request.agent.system_prompt.as_str());

    let call = provider.generate(&messages, &options);

    let generation = if let Some(limit) = timeout {
        match tokio::time::timeout(limit, call).await {
            Ok(result) => result?,
            Err(_) => return Err(ProviderError::Timeout(limit)),
        }
    } else {
        call.await?
    };

    Ok(generation.content)
}
