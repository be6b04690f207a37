//! Proposal quality heuristic.
//!
//! A cheap structural score used for diagnostics and display. It never
//! influences voting.

use super::entities::Proposal;

/// Score a proposal between 0.0 and 1.0 from its shape.
///
/// | Criterion | Points |
/// |-----------|--------|
/// | title length in (10, 100) | 0.1 |
/// | description > 100 / > 300 chars | 0.2 / +0.1 |
/// | >= 3 / >= 5 benefits | 0.2 / +0.1 |
/// | >= 3 / >= 5 steps | 0.2 / +0.1 |
/// | description has a digit or is > 200 chars | 0.1 |
pub fn quality_score(proposal: &Proposal) -> f64 {
    let mut score: f64 = 0.0;

    let title_len = proposal.title.chars().count();
    if title_len > 10 && title_len < 100 {
        score += 0.1;
    }

    let description_len = proposal.description.chars().count();
    if description_len > 100 {
        score += 0.2;
    }
    if description_len > 300 {
        score += 0.1;
    }

    score += list_points(proposal.benefits.len());
    score += list_points(proposal.steps.len());

    if proposal.description.chars().any(|c| c.is_ascii_digit()) || description_len > 200 {
        score += 0.1;
    }

    score.min(1.0)
}

fn list_points(len: usize) -> f64 {
    match len {
        0..=2 => 0.0,
        3 | 4 => 0.2,
        _ => 0.3,
    }
}
