//! Scripted in-memory provider shared by the use case tests.

use crate::ports::llm_provider::{
    ChatMessage, GenerateOptions, Generation, LlmProvider, ProviderError,
};
use async_trait::async_trait;
use roundtable_domain::AgentPersona;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// A scripted reply for one request
pub(crate) enum Reply {
    Text(String),
    Fail,
    /// Never resolves; only a timeout ends the request
    Hang,
    Panic,
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

/// A recorded request
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub agent_id: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Provider whose replies are scripted per agent.
///
/// Agents are recognised by their system prompt, which [`agent`] sets to
/// `agent:<id>`. An agent with no reply left gets a `RequestFailed` error.
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    scripts: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(self, agent_id: &str, replies: Vec<Reply>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(agent_id.to_string())
            .or_default()
            .extend(replies);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, agent_id: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.agent_id == agent_id)
            .collect()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        messages: &[ChatMessage],
        options: &GenerateOptions,
    ) -> Result<Generation, ProviderError> {
        let agent_id = options
            .system_prompt
            .as_deref()
            .and_then(|p| p.strip_prefix("agent:"))
            .unwrap_or_default()
            .to_string();

        self.calls.lock().unwrap().push(RecordedCall {
            agent_id: agent_id.clone(),
            prompt: messages.iter().map(|m| m.content.as_str()).collect(),
            max_tokens: options.max_tokens,
        });

        let reply = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&agent_id)
            .and_then(|q| q.pop_front());

        match reply {
            Some(Reply::Text(text)) => Ok(Generation::new(text)),
            Some(Reply::Fail) => Err(ProviderError::ConnectionError("scripted failure".into())),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Panic) => panic!("scripted panic for {}", agent_id),
            None => Err(ProviderError::RequestFailed(format!(
                "no scripted reply for {}",
                agent_id
            ))),
        }
    }
}

/// Persona recognised by [`ScriptedProvider`]
pub(crate) fn agent(id: &str, name: &str) -> AgentPersona {
    AgentPersona::new(id, name, "Tester").with_system_prompt(format!("agent:{}", id))
}

pub(crate) fn panel(n: usize) -> Vec<AgentPersona> {
    (1..=n)
        .map(|i| agent(&format!("a{}", i), &format!("Agent{}", i)))
        .collect()
}

/// A well-formed proposal response
pub(crate) fn proposal_reply(title: &str) -> Reply {
    Reply::text(format!(
        "TITLE: {}\nDESCRIPTION: A detailed plan for {}.\nBENEFITS:\n- Faster\n- Cheaper\n- Safer\nSTEPS:\n1. Plan\n2. Build\n3. Ship",
        title, title
    ))
}
