//! Deliberation parameters
//!
//! [`DeliberationConfig`] groups the static parameters that shape a session:
//! how long the discussion runs, how much of it proposers see, how many
//! tokens each phase may spend, and how long a single agent may take.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine parameters for one deliberation.
///
/// | Field | Default | Used by |
/// |-------|---------|---------|
/// | `discussion_rounds` | 2 | discussion |
/// | `transcript_window` | 15 | discussion, proposals |
/// | `excerpt_chars` | 150 | discussion, proposals |
/// | `*_max_tokens` | 600 / 1200 / 500 | each phase |
/// | `agent_timeout` | 120s | every phase |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliberationConfig {
    /// Number of discussion rounds (0 skips the discussion phase)
    pub discussion_rounds: usize,
    /// Number of most recent messages shown to agents
    pub transcript_window: usize,
    /// Characters of each message shown in the transcript summary
    pub excerpt_chars: usize,
    pub discussion_max_tokens: u32,
    pub proposal_max_tokens: u32,
    pub voting_max_tokens: u32,
    /// Upper bound for a single agent request; `None` waits indefinitely.
    pub agent_timeout: Option<Duration>,
}

impl Default for DeliberationConfig {
    fn default() -> Self {
        Self {
            discussion_rounds: 2,
            transcript_window: 15,
            excerpt_chars: 150,
            discussion_max_tokens: 600,
            proposal_max_tokens: 1200,
            voting_max_tokens: 500,
            agent_timeout: Some(Duration::from_secs(120)),
        }
    }
}

impl DeliberationConfig {
    // ==================== Builder Methods ====================

    pub fn with_discussion_rounds(mut self, rounds: usize) -> Self {
        self.discussion_rounds = rounds;
        self
    }

    pub fn with_transcript_window(mut self, window: usize) -> Self {
        self.transcript_window = window;
        self
    }

    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Cap every phase budget at `max_tokens`
    pub fn with_max_tokens_cap(mut self, max_tokens: u32) -> Self {
        self.discussion_max_tokens = self.discussion_max_tokens.min(max_tokens);
        self.proposal_max_tokens = self.proposal_max_tokens.min(max_tokens);
        self.voting_max_tokens = self.voting_max_tokens.min(max_tokens);
        self
    }

    pub fn with_agent_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.agent_timeout = timeout;
        self
    }
}
