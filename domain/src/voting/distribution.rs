//! Human-readable vote summaries.
//!
//! Plain text only (no colour); the presentation layer decorates it.

use super::aggregation::tally;
use super::rule::VotingRule;
use super::vote::{MAX_RATING, Vote};
use crate::core::string::truncate;
use crate::proposal::Proposal;

const BAR_WIDTH: usize = 20;
const TITLE_WIDTH: usize = 40;

/// Render how the votes were distributed across proposals.
///
/// - majority / unanimity: percentage bar per proposal
/// - rated: average star rating and total per proposal
/// - ranked: Borda points per proposal
///
/// # Example
///
/// ```
/// use roundtable_domain::{Proposal, Vote, VotingRule, format_vote_distribution};
///
/// let proposals = vec![
///     Proposal::new("a1", "Queue", "").with_id("p1"),
///     Proposal::new("a2", "Cache", "").with_id("p2"),
/// ];
/// let votes = vec![Vote::choice("a1", "p1", ""), Vote::choice("a2", "p1", "")];
/// let text = format_vote_distribution(&votes, &proposals, VotingRule::Majority);
/// assert!(text.contains("100.0%"));
/// ```
pub fn format_vote_distribution(
    votes: &[Vote],
    proposals: &[Proposal],
    rule: VotingRule,
) -> String {
    let scores = tally(rule, votes, proposals);
    let mut out = format!("Vote distribution ({}):\n", rule.description());

    for (i, (proposal, score)) in proposals.iter().zip(&scores).enumerate() {
        let title = truncate(&proposal.title, TITLE_WIDTH);
        let line = match rule {
            VotingRule::Majority | VotingRule::Unanimity => {
                let share = ratio(*score, votes.len() as f64);
                format!(
                    "{:>2}. {:<width$} {} {:>5.1}% ({} {})",
                    i + 1,
                    title,
                    bar(share),
                    share * 100.0,
                    *score as usize,
                    if *score as usize == 1 { "vote" } else { "votes" },
                    width = TITLE_WIDTH
                )
            }
            VotingRule::Rated => {
                let raters = votes
                    .iter()
                    .filter(|v| v.ratings().iter().any(|r| r.proposal_id == proposal.id))
                    .count();
                let average = ratio(*score, raters as f64);
                format!(
                    "{:>2}. {:<width$} {} {:.1}/{} avg (total {})",
                    i + 1,
                    title,
                    stars(average),
                    average,
                    MAX_RATING,
                    *score as u64,
                    width = TITLE_WIDTH
                )
            }
            VotingRule::Ranked => format!(
                "{:>2}. {:<width$} {:>4} pts",
                i + 1,
                title,
                *score as u64,
                width = TITLE_WIDTH
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

fn ratio(value: f64, total: f64) -> f64 {
    if total > 0.0 { value / total } else { 0.0 }
}

fn bar(share: f64) -> String {
    let filled = ((share * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn stars(average: f64) -> String {
    let max = MAX_RATING as usize;
    let filled = (average.round() as usize).min(max);
    format!("{}{}", "★".repeat(filled), "☆".repeat(max - filled))
}
