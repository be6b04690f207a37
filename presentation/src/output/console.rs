//! Console output formatter for deliberation results

use colored::Colorize;
use roundtable_application::SessionOutcome;
use roundtable_domain::{
    Ballot, OutputFormat, Proposal, Session, Vote, format_vote_distribution, quality_score,
};

/// Formats deliberation results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format `outcome` in the requested format
    pub fn render(outcome: &SessionOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format(outcome),
            OutputFormat::Summary => Self::format_summary(outcome),
            OutputFormat::Json => Self::format_json(outcome),
        }
    }

    /// Format the complete deliberation
    pub fn format(outcome: &SessionOutcome) -> String {
        let session = &outcome.session;
        let mut output = String::new();

        // Header
        output.push_str(&Self::header("RoundTable Deliberation"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), session.topic()));
        output.push_str(&format!(
            "{} {}\n",
            "Rule:".cyan().bold(),
            outcome.rule.description()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Panel:".cyan().bold(),
            session
                .agents()
                .iter()
                .map(|a| a.label())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        // Discussion
        if !session.messages().is_empty() {
            output.push_str(&Self::section_header("Discussion"));
            for message in session.messages() {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!(
                        "── {} (round {}) ──",
                        Self::agent_name(session, &message.agent_id),
                        message.round
                    )
                    .yellow()
                    .bold(),
                    message.content
                ));
            }
        }

        // Proposals
        output.push_str(&Self::section_header("Proposals"));
        for (i, proposal) in session.proposals().iter().enumerate() {
            output.push_str(&Self::format_proposal(session, i, proposal));
        }

        // Votes
        output.push_str(&Self::section_header("Votes"));
        for vote in &outcome.votes {
            output.push_str(&Self::format_vote(session, vote));
        }

        // Result
        output.push_str(&Self::section_header("Result"));
        output.push_str(&Self::format_result(outcome));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &SessionOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Winner and distribution only (concise output)
    pub fn format_summary(outcome: &SessionOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== RoundTable Decision ===".cyan().bold()
        ));
        output.push_str(&format!(
            "{} {}\n\n",
            "Topic:".bold(),
            outcome.session.topic()
        ));
        output.push_str(&Self::format_result(outcome));
        output.push('\n');
        output.push_str(&Self::indent(outcome.winner.summary().trim_end(), "  "));
        output.push('\n');

        output
    }

    fn format_proposal(session: &Session, index: usize, proposal: &Proposal) -> String {
        let mut out = format!(
            "\n{} {}\n",
            format!("── #{} {} ──", index + 1, proposal.title).yellow().bold(),
            format!(
                "by {} · quality {:.2}{}",
                Self::agent_name(session, &proposal.agent_id),
                quality_score(proposal),
                if proposal.is_fallback() { " · fallback" } else { "" }
            )
            .dimmed()
        );
        out.push_str(&Self::indent(proposal.description.trim(), "  "));
        out.push('\n');

        out.push_str(&format!("  {}\n", "Benefits:".bold()));
        for benefit in &proposal.benefits {
            out.push_str(&format!("    - {}\n", benefit));
        }
        out.push_str(&format!("  {}\n", "Steps:".bold()));
        for (i, step) in proposal.steps.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", i + 1, step));
        }
        out
    }

    fn format_vote(session: &Session, vote: &Vote) -> String {
        let choice = match &vote.ballot {
            Ballot::Choice | Ballot::Default { .. } => Self::proposal_ref(session, &vote.proposal_id),
            Ballot::Rated { ratings } => ratings
                .iter()
                .map(|r| format!("{}={}", Self::proposal_ref(session, &r.proposal_id), r.rating))
                .collect::<Vec<_>>()
                .join(", "),
            Ballot::Ranked { ranking } => ranking
                .iter()
                .map(|id| Self::proposal_ref(session, id))
                .collect::<Vec<_>>()
                .join(" > "),
        };

        let name = Self::agent_name(session, &vote.agent_id);
        let name = if vote.is_fallback() {
            name.red().bold()
        } else {
            name.green().bold()
        };

        format!(
            "  {} → {}\n    {}\n",
            name,
            choice,
            vote.justification.italic()
        )
    }

    fn format_result(outcome: &SessionOutcome) -> String {
        let aggregation = &outcome.aggregation;
        let mut out = format_vote_distribution(
            &outcome.votes,
            outcome.session.proposals(),
            outcome.rule,
        );

        out.push_str(&format!(
            "\n{} {}\n",
            "Winner:".green().bold(),
            outcome.winner.title.bold()
        ));
        out.push_str(&format!(
            "{} {:.0}%\n",
            "Consensus:".cyan(),
            aggregation.consensus_score * 100.0
        ));
        if aggregation.tie_breaker {
            out.push_str(&format!(
                "{}\n",
                "Tie broken by proposal order".yellow()
            ));
        }
        out
    }

    /// `#n` position of a proposal in the session
    fn proposal_ref(session: &Session, proposal_id: &str) -> String {
        session
            .proposals()
            .iter()
            .position(|p| p.id == proposal_id)
            .map(|i| format!("#{}", i + 1))
            .unwrap_or_else(|| proposal_id.to_string())
    }

    fn agent_name<'a>(session: &'a Session, agent_id: &'a str) -> &'a str {
        session
            .agent(agent_id)
            .map(|a| a.name.as_str())
            .unwrap_or(agent_id)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
