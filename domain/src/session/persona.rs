//! Agent persona value object

use serde::{Deserialize, Serialize};

/// Default sampling temperature for a persona
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A configured LLM participant in a deliberation (Value Object)
///
/// Personas are fixed when a session starts and never change afterwards.
///
/// # Example
///
/// ```
/// use roundtable_domain::AgentPersona;
///
/// let skeptic = AgentPersona::new("skeptic", "Sam", "Risk analyst")
///     .with_temperature(0.3);
/// assert_eq!(skeptic.temperature, 0.3);
/// assert!(skeptic.system_prompt.contains("Risk analyst"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentPersona {
    pub id: String,
    pub name: String,
    pub role: String,
    pub system_prompt: String,
    pub temperature: f32,
}

impl AgentPersona {
    /// Create a persona with a system prompt derived from its name and role
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        let name = name.into();
        let role = role.into();
        let system_prompt = Self::default_system_prompt(&name, &role);
        Self {
            id: id.into(),
            name,
            role,
            system_prompt,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Set the sampling temperature (clamped to 0.0-2.0)
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    /// "Name (Role)" label used in prompts and output
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }

    fn default_system_prompt(name: &str, role: &str) -> String {
        format!(
            "You are {}, a {} taking part in a round-table deliberation. \
             Argue from the perspective of your role, engage with what others say, \
             and keep your contributions concrete and concise.",
            name, role
        )
    }

    /// The panel used when no agents are configured
    pub fn default_panel() -> Vec<AgentPersona> {
        vec![
            AgentPersona::new("pragmatist", "Morgan", "Pragmatic engineer").with_temperature(0.5),
            AgentPersona::new("innovator", "Avery", "Product innovator").with_temperature(0.9),
            AgentPersona::new("skeptic", "Quinn", "Risk analyst").with_temperature(0.4),
        ]
    }
}
