//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agents;
mod output;
mod provider;
mod session;

pub use agents::{FileAgentConfig, personas};
pub use output::FileOutputConfig;
pub use provider::FileProviderConfig;
pub use session::FileSessionConfig;

use roundtable_application::DeliberationConfig;
use roundtable_domain::config::ConfigIssue;
use roundtable_domain::{AgentPersona, VotingRule};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Deliberation settings
    pub session: FileSessionConfig,
    /// LLM endpoint settings
    pub provider: FileProviderConfig,
    /// Agent panel (empty = built-in default panel)
    pub agents: Vec<FileAgentConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The session section (rule name, round count, transcript window)
    /// 2. The agent panel (empty fields, duplicate ids, temperatures)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.session.validate();
        issues.extend(agents::validate_agents(&self.agents));
        issues
    }

    pub fn voting_rule(&self) -> VotingRule {
        self.session.parse_rule().0
    }

    pub fn personas(&self) -> Vec<AgentPersona> {
        personas(&self.agents)
    }

    /// Engine parameters, with the provider's token cap applied
    pub fn deliberation_config(&self) -> DeliberationConfig {
        let config = self.session.to_deliberation_config();
        match self.provider.max_tokens {
            Some(cap) => config.with_max_tokens_cap(cap),
            None => config,
        }
    }
}
