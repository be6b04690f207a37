//! Progress reporting for deliberation sessions

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roundtable_application::ports::progress::ProgressNotifier;
use roundtable_domain::{AgentPersona, SessionPhase};
use std::sync::Mutex;

/// Reports progress during a deliberation with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid progress template")
            .progress_chars("=>-")
    }

    /// "Phase n: Name" for the three deliberation phases
    fn phase_label(phase: SessionPhase) -> String {
        match phase {
            SessionPhase::Discussing => format!("Phase 1: {}", phase.display_name()),
            SessionPhase::Proposing => format!("Phase 2: {}", phase.display_name()),
            SessionPhase::Voting => format!("Phase 3: {}", phase.display_name()),
            other => other.display_name().to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: SessionPhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_label(phase));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_agent_complete(&self, _phase: SessionPhase, agent: &AgentPersona, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "✓".green(), agent.name)
            } else {
                format!("{} {}", "✗".red(), agent.name)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: SessionPhase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete!", phase.display_name().green()));
        }
    }

    fn on_round_start(&self, round: usize, total_rounds: usize) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(format!("Round {}/{}", round, total_rounds));
        }
    }
}

/// Plain line-per-event progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: SessionPhase, total_tasks: usize) {
        eprintln!(
            "{} {} ({} tasks)",
            "->".cyan(),
            ProgressReporter::phase_label(phase).bold(),
            total_tasks
        );
    }

    fn on_agent_complete(&self, _phase: SessionPhase, agent: &AgentPersona, success: bool) {
        if success {
            eprintln!("  {} {}", "✓".green(), agent.label());
        } else {
            eprintln!("  {} {} (failed)", "✗".red(), agent.label());
        }
    }

    fn on_phase_complete(&self, _phase: SessionPhase) {
        eprintln!();
    }

    fn on_round_start(&self, round: usize, total_rounds: usize) {
        eprintln!("  {} round {}/{}", "·".dimmed(), round, total_rounds);
    }
}
