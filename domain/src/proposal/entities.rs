//! Proposal entity

use super::parsing::ProposalParse;
use crate::session::persona::AgentPersona;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a proposal came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalSource {
    /// Every section was present in the agent's response
    Parsed,
    /// Some sections were missing and were recovered heuristically
    Recovered,
    /// The agent's request failed; generic placeholder content
    Fallback,
}

/// A structured candidate solution submitted by one agent (Entity)
///
/// # Example
///
/// ```
/// use roundtable_domain::Proposal;
///
/// let proposal = Proposal::new("a1", "Adopt PostgreSQL", "Move the ledger to Postgres.")
///     .with_benefits(vec!["ACID guarantees".into()])
///     .with_steps(vec!["Provision cluster".into(), "Migrate data".into()]);
///
/// assert!(proposal.to_prompt_text().starts_with("TITLE: Adopt PostgreSQL"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub agent_id: String,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub steps: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub source: ProposalSource,
}

impl Proposal {
    /// Create a parsed proposal with a generated id
    pub fn new(
        agent_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            agent_id: agent_id.into(),
            title: title.into(),
            description: description.into(),
            benefits: Vec::new(),
            steps: Vec::new(),
            timestamp: Utc::now(),
            source: ProposalSource::Parsed,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_benefits(mut self, benefits: Vec<String>) -> Self {
        self.benefits = benefits;
        self
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_source(mut self, source: ProposalSource) -> Self {
        self.source = source;
        self
    }

    /// Generic proposal substituted when an agent's request fails.
    ///
    /// Deterministic in everything but `id` and `timestamp`.
    pub fn fallback(agent: &AgentPersona, topic: &str) -> Self {
        Self::new(
            &agent.id,
            format!("{}'s approach as {}", agent.name, agent.role),
            format!(
                "{} could not draft a detailed proposal on \"{}\". \
                 As {}, they recommend a careful, incremental approach \
                 grounded in the points raised during the discussion.",
                agent.name, topic, agent.role
            ),
        )
        .with_benefits(vec![
            "Builds on ideas already raised in the discussion".to_string(),
            "Keeps risk low through incremental delivery".to_string(),
            "Leaves room to adjust as feedback arrives".to_string(),
        ])
        .with_steps(vec![
            "Review the discussion and agree on priorities".to_string(),
            "Pilot the approach on a small scope".to_string(),
            "Evaluate the results and iterate".to_string(),
        ])
        .with_source(ProposalSource::Fallback)
    }

    /// Build a proposal from a parsed response.
    ///
    /// Heuristically completed drafts are tagged [`ProposalSource::Recovered`].
    pub fn from_parse(agent_id: impl Into<String>, parse: ProposalParse) -> Self {
        let source = if parse.is_fallback() {
            ProposalSource::Recovered
        } else {
            ProposalSource::Parsed
        };
        let draft = parse.into_draft();
        Self::new(agent_id, draft.title, draft.description)
            .with_benefits(draft.benefits)
            .with_steps(draft.steps)
            .with_source(source)
    }

    /// Render in the `TITLE/DESCRIPTION/BENEFITS/STEPS` response grammar
    pub fn to_prompt_text(&self) -> String {
        let mut text = format!(
            "TITLE: {}\nDESCRIPTION: {}\nBENEFITS:\n",
            self.title, self.description
        );
        for benefit in &self.benefits {
            text.push_str(&format!("- {}\n", benefit));
        }
        text.push_str("STEPS:\n");
        for (i, step) in self.steps.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", i + 1, step));
        }
        text
    }

    /// Human-readable multi-line summary
    pub fn summary(&self) -> String {
        let mut out = format!("{}\n{}\n", self.title, self.description);
        if !self.benefits.is_empty() {
            out.push_str("\nBenefits:\n");
            for benefit in &self.benefits {
                out.push_str(&format!("  * {}\n", benefit));
            }
        }
        if !self.steps.is_empty() {
            out.push_str("\nSteps:\n");
            for (i, step) in self.steps.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }
        out
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ProposalSource::Fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Proposal::new("a1", "T", "D");
        let b = Proposal::new("a1", "T", "D");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_fallback_proposal() {
        let agent = AgentPersona::new("a1", "Ada", "Architect");
        let proposal = Proposal::fallback(&agent, "Pick a queue");

        assert_eq!(proposal.agent_id, "a1");
        assert!(proposal.title.contains("Ada"));
        assert!(proposal.title.contains("Architect"));
        assert!(proposal.description.contains("Pick a queue"));
        assert_eq!(proposal.benefits.len(), 3);
        assert_eq!(proposal.steps.len(), 3);
        assert!(proposal.is_fallback());
    }

    #[test]
    fn test_from_parse_tags_source() {
        use crate::proposal::parsing::parse_proposal_response;

        let full = parse_proposal_response(
            "TITLE: Queue\nDESCRIPTION: Use a queue.\nBENEFITS:\n- Fast\nSTEPS:\n1. Build",
        );
        let proposal = Proposal::from_parse("a1", full);
        assert_eq!(proposal.title, "Queue");
        assert_eq!(proposal.steps, vec!["Build".to_string()]);
        assert_eq!(proposal.source, ProposalSource::Parsed);

        let partial = Proposal::from_parse("a2", parse_proposal_response("Just use a queue."));
        assert_eq!(partial.agent_id, "a2");
        assert_eq!(partial.source, ProposalSource::Recovered);
        assert!(!partial.is_fallback());
    }

    #[test]
    fn test_to_prompt_text() {
        let proposal = Proposal::new("a1", "Title", "Desc")
            .with_benefits(vec!["b1".into(), "b2".into()])
            .with_steps(vec!["s1".into()]);

        assert_eq!(
            proposal.to_prompt_text(),
            "TITLE: Title\nDESCRIPTION: Desc\nBENEFITS:\n- b1\n- b2\nSTEPS:\n1. s1\n"
        );
    }

    #[test]
    fn test_summary_lists_sections() {
        let proposal = Proposal::new("a1", "Title", "Desc")
            .with_benefits(vec!["fast".into()])
            .with_steps(vec!["do it".into()]);
        let summary = proposal.summary();
        assert!(summary.contains("Benefits:"));
        assert!(summary.contains("  * fast"));
        assert!(summary.contains("  1. do it"));
    }
}
