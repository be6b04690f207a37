//! Progress notification port
//!
//! Defines the interface for reporting progress during a deliberation.

use roundtable_domain::{AgentPersona, SessionPhase};

/// Callback for progress updates during a deliberation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain log lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: SessionPhase, total_tasks: usize);

    /// Called when one agent's request settles within a phase
    fn on_agent_complete(&self, phase: SessionPhase, agent: &AgentPersona, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: SessionPhase);

    /// Called at the start of each discussion round
    fn on_round_start(&self, _round: usize, _total_rounds: usize) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: SessionPhase, _total_tasks: usize) {}
    fn on_agent_complete(&self, _phase: SessionPhase, _agent: &AgentPersona, _success: bool) {}
    fn on_phase_complete(&self, _phase: SessionPhase) {}
}
