//! Agent panel configuration from TOML (`[[agents]]` tables)
//!
//! Example configuration:
//!
//! ```toml
//! [[agents]]
//! id = "ops"
//! name = "Riley"
//! role = "Site reliability engineer"
//! temperature = 0.4
//!
//! [[agents]]
//! id = "pm"
//! name = "Jordan"
//! role = "Product manager"
//! system_prompt = "You are Jordan, ..."
//! ```

use roundtable_domain::AgentPersona;
use roundtable_domain::config::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One configured agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Overrides the prompt derived from name and role
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
}

impl FileAgentConfig {
    pub fn to_persona(&self) -> AgentPersona {
        let mut persona = AgentPersona::new(&self.id, &self.name, &self.role);
        if let Some(prompt) = &self.system_prompt {
            persona = persona.with_system_prompt(prompt);
        }
        if let Some(temperature) = self.temperature {
            persona = persona.with_temperature(temperature);
        }
        persona
    }
}

/// Resolve the panel: configured agents, or the built-in default panel.
pub fn personas(agents: &[FileAgentConfig]) -> Vec<AgentPersona> {
    if agents.is_empty() {
        AgentPersona::default_panel()
    } else {
        agents.iter().map(FileAgentConfig::to_persona).collect()
    }
}

pub(super) fn validate_agents(agents: &[FileAgentConfig]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for (i, agent) in agents.iter().enumerate() {
        if agent.id.trim().is_empty() || agent.name.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyAgentField,
                format!("agents[{}]: id and name must not be empty", i),
            ));
        }
        if !agent.id.is_empty() && !seen.insert(agent.id.as_str()) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::DuplicateAgentId,
                format!("agents[{}]: duplicate agent id '{}'", i, agent.id),
            ));
        }
        if let Some(t) = agent.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TemperatureOutOfRange,
                format!(
                    "agents[{}]: temperature {} is outside 0.0-2.0 and will be clamped",
                    i, t
                ),
            ));
        }
    }

    if agents.len() == 1 {
        issues.push(ConfigIssue::warning(
            ConfigIssueCode::SingleAgent,
            "only one agent configured: every vote will be unanimous",
        ));
    }

    issues
}
