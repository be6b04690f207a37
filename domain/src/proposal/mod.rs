//! Proposal domain
//!
//! - [`entities::Proposal`] — a structured candidate solution from one agent
//! - [`parsing`] — the `TITLE/DESCRIPTION/BENEFITS/STEPS` response parser
//! - [`quality`] — structural quality heuristic for diagnostics

pub mod entities;
pub mod parsing;
pub mod quality;

pub use entities::{Proposal, ProposalSource};
pub use parsing::{ProposalDraft, ProposalField, ProposalParse, parse_proposal_response};
pub use quality::quality_score;
