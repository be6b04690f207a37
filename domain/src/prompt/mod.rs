//! Prompt domain
//!
//! Templates for generating the user prompts sent at each deliberation phase.
//! System prompts come from each agent's [`AgentPersona`](crate::session::AgentPersona).

mod template;

pub use template::{PromptTemplate, ordinal};
