//! Structured configuration issues.
//!
//! Configuration problems are reported as a list instead of failing on the
//! first one, so every issue can be shown to the user at once.
//!
//! # Examples
//!
//! ```
//! use roundtable_domain::config::{ConfigIssue, ConfigIssueCode, Severity, has_errors};
//!
//! let issues = vec![ConfigIssue::warning(
//!     ConfigIssueCode::TemperatureOutOfRange,
//!     "agent 'x': temperature 3.0 will be clamped to 2.0",
//! )];
//! assert!(!has_errors(&issues));
//! ```

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// `session.rule` is not a known voting rule.
    UnknownVotingRule,
    /// Two agents share the same id.
    DuplicateAgentId,
    /// An agent has an empty id or name.
    EmptyAgentField,
    /// Temperature outside `0.0..=2.0`; it will be clamped.
    TemperatureOutOfRange,
    /// `session.discussion_rounds = 0` skips the discussion phase.
    NoDiscussionRounds,
    /// `session.transcript_window = 0` hides the discussion from proposers.
    EmptyTranscriptWindow,
    /// A single agent makes every voting rule trivial.
    SingleAgent,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }
}

/// Whether any issue is fatal.
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
