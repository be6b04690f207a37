//! CLI command definitions

use clap::{Parser, ValueEnum};
use roundtable_domain::VotingRule;
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transcript, proposals, votes and result
    Full,
    /// Winner and vote distribution only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for roundtable_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => roundtable_domain::OutputFormat::Full,
            OutputFormat::Summary => roundtable_domain::OutputFormat::Summary,
            OutputFormat::Json => roundtable_domain::OutputFormat::Json,
        }
    }
}

fn parse_voting_rule(s: &str) -> Result<VotingRule, String> {
    s.parse()
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Round-table deliberation - LLM agents discuss, propose and vote")]
#[command(long_about = r#"
RoundTable runs a panel of LLM agents through a structured decision process.

The process has three phases:
1. Discussion: agents exchange views over one or more rounds
2. Proposals: every agent drafts one formal proposal
3. Voting: agents vote and a social-choice rule picks the winner

Voting rules: majority, unanimity, rated (1-5 scores), ranked (Borda count)

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./roundtable.toml        Project-level config
3. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable "Should we migrate the billing service to event sourcing?"
  roundtable --rule ranked --rounds 3 "Pick our next observability vendor"
  roundtable --no-discussion --output json "Name the new CLI"
"#)]
pub struct Cli {
    /// The topic to deliberate on
    pub topic: Option<String>,

    /// Voting rule (majority, unanimity, rated, ranked)
    #[arg(short, long, value_name = "RULE", value_parser = parse_voting_rule)]
    pub rule: Option<VotingRule>,

    /// Number of discussion rounds
    #[arg(long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Skip the discussion phase
    #[arg(long)]
    pub no_discussion: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
