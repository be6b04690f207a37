//! Session domain entities
//!
//! A [`Session`] is one run of the deliberation protocol over a fixed topic
//! and agent set. It moves strictly forward through its phases:
//!
//! ```text
//! Created -> Discussing -> Proposing -> Voting -> Concluded
//!    \___________\_____________\__________\-----> Failed
//! ```
//!
//! Once `Concluded` or `Failed`, the session rejects every mutation.

use super::persona::AgentPersona;
use crate::core::error::DomainError;
use crate::core::string::first_chars;
use crate::proposal::Proposal;
use crate::voting::Vote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase of a deliberation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Created,
    Discussing,
    Proposing,
    Voting,
    Concluded,
    Failed,
}

impl SessionPhase {
    pub fn as_str(&self) -> &str {
        match self {
            SessionPhase::Created => "created",
            SessionPhase::Discussing => "discussing",
            SessionPhase::Proposing => "proposing",
            SessionPhase::Voting => "voting",
            SessionPhase::Concluded => "concluded",
            SessionPhase::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SessionPhase::Created => "Created",
            SessionPhase::Discussing => "Discussion",
            SessionPhase::Proposing => "Proposal Drafting",
            SessionPhase::Voting => "Voting",
            SessionPhase::Concluded => "Concluded",
            SessionPhase::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Concluded | SessionPhase::Failed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// Forward moves may skip phases (e.g. a session without discussion);
    /// `Failed` is reachable from any non-terminal phase.
    pub fn can_transition_to(&self, next: SessionPhase) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            SessionPhase::Failed => true,
            SessionPhase::Created => false,
            _ => next > *self,
        }
    }
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single contribution to the session transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub agent_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Phase the message was produced in
    pub phase: SessionPhase,
    /// Discussion round (1-indexed)
    pub round: usize,
}

impl Message {
    pub fn new(agent_id: impl Into<String>, content: impl Into<String>, phase: SessionPhase) -> Self {
        Self {
            agent_id: agent_id.into(),
            content: content.into(),
            timestamp: Utc::now(),
            phase,
            round: 1,
        }
    }

    pub fn with_round(mut self, round: usize) -> Self {
        self.round = round;
        self
    }
}

/// One deliberation run (Entity)
///
/// Owned by the orchestrator. Phase functions read a snapshot and return new
/// records; only the orchestrator appends them here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: String,
    topic: String,
    phase: SessionPhase,
    agents: Vec<AgentPersona>,
    messages: Vec<Message>,
    proposals: Vec<Proposal>,
    votes: Vec<Vote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<String>,
}

impl Session {
    /// Create a new session with a generated id
    pub fn new(topic: impl Into<String>, agents: Vec<AgentPersona>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), topic, agents)
    }

    pub fn with_id(id: impl Into<String>, topic: impl Into<String>, agents: Vec<AgentPersona>) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            phase: SessionPhase::Created,
            agents,
            messages: Vec::new(),
            proposals: Vec::new(),
            votes: Vec::new(),
            failure: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn agents(&self) -> &[AgentPersona] {
        &self.agents
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    /// Reason recorded when the session entered `Failed`
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn agent(&self, agent_id: &str) -> Option<&AgentPersona> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    pub fn proposal(&self, proposal_id: &str) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == proposal_id)
    }

    /// Move the session to `next`
    pub fn advance(&mut self, next: SessionPhase) -> Result<(), DomainError> {
        if !self.phase.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Move the session to `Failed`, recording why
    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        self.advance(SessionPhase::Failed)?;
        self.failure = Some(reason.into());
        Ok(())
    }

    pub fn append_messages(&mut self, messages: Vec<Message>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.messages.extend(messages);
        Ok(())
    }

    pub fn append_proposals(&mut self, proposals: Vec<Proposal>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.proposals.extend(proposals);
        Ok(())
    }

    pub fn append_votes(&mut self, votes: Vec<Vote>) -> Result<(), DomainError> {
        self.ensure_mutable()?;
        self.votes.extend(votes);
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.phase.is_terminal() {
            return Err(DomainError::SessionImmutable(self.phase));
        }
        Ok(())
    }

    /// Render the most recent `window` messages as `- <agentName>: <excerpt>`
    /// lines, each excerpt limited to `excerpt_chars` characters.
    pub fn transcript_summary(&self, window: usize, excerpt_chars: usize) -> String {
        summarize_transcript(&self.agents, &self.messages, window, excerpt_chars)
    }
}

/// Render the last `window` of `messages` as `- <agentName>: <excerpt>` lines.
///
/// Messages from unknown agents fall back to the raw agent id.
pub fn summarize_transcript(
    agents: &[AgentPersona],
    messages: &[Message],
    window: usize,
    excerpt_chars: usize,
) -> String {
    let start = messages.len().saturating_sub(window);
    messages[start..]
        .iter()
        .map(|m| {
            let name = agents
                .iter()
                .find(|a| a.id == m.agent_id)
                .map(|a| a.name.as_str())
                .unwrap_or(m.agent_id.as_str());
            format!("- {}: {}", name, first_chars(m.content.trim(), excerpt_chars))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
