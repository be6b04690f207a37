//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use roundtable_application::{NoProgress, ProgressNotifier, RunSessionInput, RunSessionUseCase};
use roundtable_domain::{OutputFormat, Severity, config::has_errors};
use roundtable_infrastructure::{ConfigLoader, FileConfig, OpenAiProvider};
use roundtable_presentation::{
    Cli, ConsoleFormatter, ProgressReporter, SimpleProgress, set_color_enabled,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if has_errors(&issues) {
        bail!("Invalid configuration ({} issue(s))", issues.len());
    }

    let topic = match cli.topic.as_deref().map(str::trim) {
        Some(topic) if !topic.is_empty() => topic.to_string(),
        _ => bail!("A topic is required. Run `roundtable --help` for usage."),
    };

    // CLI flags override configuration files
    let rule = cli.rule.unwrap_or_else(|| config.voting_rule());
    let format = config.output.resolve_format(cli.output.map(Into::into));
    let mut deliberation = config.deliberation_config();
    if let Some(rounds) = cli.rounds {
        deliberation = deliberation.with_discussion_rounds(rounds);
    }

    set_color_enabled(config.output.color_for(format));

    info!(
        "Starting deliberation: rule={}, rounds={}, agents={}",
        rule,
        deliberation.discussion_rounds,
        config.personas().len()
    );

    // === Dependency Injection ===
    let provider = Arc::new(OpenAiProvider::from_config(&config.provider)?);
    info!("Using model {} at {}", provider.model(), provider.endpoint());

    let use_case = RunSessionUseCase::new(provider).with_config(deliberation);

    let mut input = RunSessionInput::new(topic, config.personas(), rule);
    if cli.no_discussion {
        input = input.without_discussion();
    }

    let progress = select_progress(&cli, &config, format);
    let outcome = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    println!("{}", ConsoleFormatter::render(&outcome, format));

    Ok(())
}

/// Progress bars on a terminal, plain lines when redirected
fn select_progress(cli: &Cli, config: &FileConfig, format: OutputFormat) -> Box<dyn ProgressNotifier> {
    if !config.output.progress_for(format, cli.quiet) {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}
