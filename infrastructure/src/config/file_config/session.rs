//! Session configuration from TOML (`[session]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [session]
//! rule = "ranked"              # majority, unanimity, rated, ranked
//! discussion_rounds = 2
//! transcript_window = 15
//! agent_timeout_secs = 120     # 0 disables the per-agent timeout
//! ```

use roundtable_application::DeliberationConfig;
use roundtable_domain::config::{ConfigIssue, ConfigIssueCode};
use roundtable_domain::VotingRule;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deliberation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Voting rule name
    pub rule: String,
    /// Number of discussion rounds
    pub discussion_rounds: usize,
    /// Number of recent messages shown to agents
    pub transcript_window: usize,
    /// Per-agent request timeout in seconds (0 = none)
    pub agent_timeout_secs: u64,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        let defaults = DeliberationConfig::default();
        Self {
            rule: VotingRule::default().as_str().to_string(),
            discussion_rounds: defaults.discussion_rounds,
            transcript_window: defaults.transcript_window,
            agent_timeout_secs: defaults.agent_timeout.map(|d| d.as_secs()).unwrap_or(0),
        }
    }
}

impl FileSessionConfig {
    /// Parse the rule string, falling back to the default rule on error.
    pub fn parse_rule(&self) -> (VotingRule, Vec<ConfigIssue>) {
        match self.rule.parse::<VotingRule>() {
            Ok(rule) => (rule, vec![]),
            Err(_) => (
                VotingRule::default(),
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownVotingRule,
                    format!(
                        "session.rule: unknown voting rule '{}' (expected majority, unanimity, rated or ranked)",
                        self.rule
                    ),
                )],
            ),
        }
    }

    pub fn agent_timeout(&self) -> Option<Duration> {
        (self.agent_timeout_secs > 0).then(|| Duration::from_secs(self.agent_timeout_secs))
    }

    /// Engine parameters described by this section
    pub fn to_deliberation_config(&self) -> DeliberationConfig {
        DeliberationConfig::default()
            .with_discussion_rounds(self.discussion_rounds)
            .with_transcript_window(self.transcript_window)
            .with_agent_timeout(self.agent_timeout())
    }

    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.parse_rule().1;
        if self.discussion_rounds == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoDiscussionRounds,
                "session.discussion_rounds = 0: agents will draft proposals without discussing",
            ));
        }
        if self.transcript_window == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyTranscriptWindow,
                "session.transcript_window = 0: proposals will not see the discussion",
            ));
        }
        issues
    }
}
