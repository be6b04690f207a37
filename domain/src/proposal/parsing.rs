//! Proposal response parsing.
//!
//! Agents are asked to answer in a small line-oriented grammar:
//!
//! ```text
//! TITLE: <one line>
//! DESCRIPTION: <prose>
//! BENEFITS:
//! - <item>
//! STEPS:
//! 1. <item>
//! ```
//!
//! [`parse_proposal_response`] walks the lines with a section state machine.
//! It never fails: fields the response did not provide are filled from the
//! raw text, and the result is tagged [`ProposalParse::Fallback`].

use crate::core::string::{first_chars, normalize_whitespace};
use regex::Regex;
use std::sync::LazyLock;

static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s*").unwrap());
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());
static FIRST_SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^.!?]+[.!?]").unwrap());

/// Characters of raw response used when the title must be guessed
pub const FALLBACK_TITLE_CHARS: usize = 100;
/// Characters of raw response used when the description is missing
pub const FALLBACK_DESCRIPTION_CHARS: usize = 500;
pub const PLACEHOLDER_BENEFIT: &str = "See description for expected benefits";
pub const PLACEHOLDER_STEP: &str = "See description for implementation details";

/// A section of the proposal grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalField {
    Title,
    Description,
    Benefits,
    Steps,
}

impl ProposalField {
    fn marker(&self) -> &'static str {
        match self {
            ProposalField::Title => "TITLE:",
            ProposalField::Description => "DESCRIPTION:",
            ProposalField::Benefits => "BENEFITS:",
            ProposalField::Steps => "STEPS:",
        }
    }

    const ALL: [ProposalField; 4] = [
        ProposalField::Title,
        ProposalField::Description,
        ProposalField::Benefits,
        ProposalField::Steps,
    ];
}

/// Proposal content extracted from a response, before it gets an id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub steps: Vec<String>,
}

/// Outcome of parsing a proposal response
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalParse {
    /// All four sections were found
    Parsed(ProposalDraft),
    /// At least one section was missing and filled heuristically
    Fallback {
        draft: ProposalDraft,
        missing: Vec<ProposalField>,
    },
}

impl ProposalParse {
    pub fn draft(&self) -> &ProposalDraft {
        match self {
            ProposalParse::Parsed(draft) => draft,
            ProposalParse::Fallback { draft, .. } => draft,
        }
    }

    pub fn into_draft(self) -> ProposalDraft {
        match self {
            ProposalParse::Parsed(draft) => draft,
            ProposalParse::Fallback { draft, .. } => draft,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ProposalParse::Fallback { .. })
    }
}

/// If `line` opens a section, return the section and the text after its marker.
///
/// Markers are uppercase only, so prose such as `Benefits: ...` stays
/// in its section. Tolerates markdown decoration such as `## TITLE:` or
/// `**TITLE:** ...`.
fn match_marker(line: &str) -> Option<(ProposalField, &str)> {
    let stripped = line.trim_start_matches(['#', '*', ' ']);
    ProposalField::ALL.into_iter().find_map(|field| {
        let rest = stripped.strip_prefix(field.marker())?;
        Some((field, rest.trim_start_matches('*').trim()))
    })
}

/// Parse a free-text proposal response.
///
/// # Examples
///
/// ```
/// use roundtable_domain::proposal::parsing::parse_proposal_response;
///
/// let parsed = parse_proposal_response(
///     "TITLE: Use a queue\nDESCRIPTION: Decouple writers.\nBENEFITS:\n- Resilience\nSTEPS:\n1. Deploy broker",
/// );
/// assert!(!parsed.is_fallback());
/// assert_eq!(parsed.draft().title, "Use a queue");
/// assert_eq!(parsed.draft().steps, vec!["Deploy broker".to_string()]);
/// ```
pub fn parse_proposal_response(response: &str) -> ProposalParse {
    let mut draft = ProposalDraft::default();
    let mut current: Option<ProposalField> = None;
    let mut description_buffer: Vec<String> = Vec::new();

    for raw_line in response.lines() {
        let line = raw_line.trim();

        if let Some((field, rest)) = match_marker(line) {
            if current == Some(ProposalField::Description) {
                flush_description(&mut description_buffer, &mut draft);
            }
            current = Some(field);
            if !rest.is_empty() {
                collect_line(field, rest, &mut draft, &mut description_buffer);
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        if let Some(field) = current {
            collect_line(field, line, &mut draft, &mut description_buffer);
        }
    }
    flush_description(&mut description_buffer, &mut draft);

    let missing = fill_missing(&mut draft, response);
    if missing.is_empty() {
        ProposalParse::Parsed(draft)
    } else {
        ProposalParse::Fallback { draft, missing }
    }
}

fn flush_description(buffer: &mut Vec<String>, draft: &mut ProposalDraft) {
    if !buffer.is_empty() {
        if !draft.description.is_empty() {
            draft.description.push('\n');
        }
        draft.description.push_str(buffer.join("\n").trim());
        buffer.clear();
    }
}

fn collect_line(
    field: ProposalField,
    line: &str,
    draft: &mut ProposalDraft,
    description_buffer: &mut Vec<String>,
) {
    match field {
        ProposalField::Title => {
            if draft.title.is_empty() {
                draft.title = line.to_string();
            }
        }
        ProposalField::Description => description_buffer.push(line.to_string()),
        ProposalField::Benefits => {
            if let Some(m) = BULLET.find(line) {
                push_item(&mut draft.benefits, &line[m.end()..]);
            }
        }
        ProposalField::Steps => {
            if let Some(m) = NUMBERED.find(line) {
                push_item(&mut draft.steps, &line[m.end()..]);
            }
        }
    }
}

fn push_item(items: &mut Vec<String>, item: &str) {
    let item = item.trim();
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

/// Fill empty fields from the raw response; returns the fields that were filled.
fn fill_missing(draft: &mut ProposalDraft, response: &str) -> Vec<ProposalField> {
    let raw = response.trim();
    let mut missing = Vec::new();

    if draft.title.is_empty() {
        draft.title = match FIRST_SENTENCE.find(raw) {
            Some(m) => normalize_whitespace(m.as_str()),
            None => normalize_whitespace(first_chars(raw, FALLBACK_TITLE_CHARS)),
        };
        missing.push(ProposalField::Title);
    }
    if draft.description.is_empty() {
        draft.description = first_chars(raw, FALLBACK_DESCRIPTION_CHARS).to_string();
        missing.push(ProposalField::Description);
    }
    if draft.benefits.is_empty() {
        draft.benefits = vec![PLACEHOLDER_BENEFIT.to_string()];
        missing.push(ProposalField::Benefits);
    }
    if draft.steps.is_empty() {
        draft.steps = vec![PLACEHOLDER_STEP.to_string()];
        missing.push(ProposalField::Steps);
    }

    missing
}
