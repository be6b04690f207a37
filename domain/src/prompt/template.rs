//! Prompt templates for the deliberation flow

use crate::core::string::truncate;
use crate::proposal::Proposal;
use crate::voting::VotingRule;

/// Characters of each proposal description shown on the ballot
pub const BALLOT_DESCRIPTION_CHARS: usize = 200;
/// Benefits shown per proposal on the ballot
pub const BALLOT_BENEFITS: usize = 3;

/// Templates for generating prompts at each phase
pub struct PromptTemplate;

impl PromptTemplate {
    /// User prompt for one discussion turn
    pub fn discussion_prompt(topic: &str, round: usize, total_rounds: usize, transcript: &str) -> String {
        let mut prompt = format!(
            "Topic under discussion: {}\n\nThis is round {} of {}.\n",
            topic, round, total_rounds
        );

        if transcript.is_empty() {
            prompt.push_str(
                "\nYou are opening the discussion. Share your initial perspective on the topic: \
                 what matters most, what the main risks are, and which direction looks promising.",
            );
        } else {
            prompt.push_str(&format!(
                "\nRecent discussion:\n{}\n\nRespond to the points raised so far. \
                 Build on good ideas, challenge weak ones, and add anything that is missing.",
                transcript
            ));
        }

        prompt.push_str("\nKeep your contribution to one or two short paragraphs.");
        prompt
    }

    /// User prompt asking for a structured proposal
    pub fn proposal_prompt(topic: &str, transcript: &str) -> String {
        let discussion = if transcript.is_empty() {
            "(no discussion took place)".to_string()
        } else {
            transcript.to_string()
        };

        format!(
            r#"Topic: {}

Summary of the discussion so far:
{}

Based on the discussion, draft ONE formal proposal that resolves the topic.
Answer using exactly this format:

TITLE: <one line>
DESCRIPTION: <a few sentences of prose>
BENEFITS:
- <benefit>
- <benefit>
STEPS:
1. <step>
2. <step>

List at least three benefits and three steps."#,
            topic, discussion
        )
    }

    /// List proposals as they appear on the ballot (1-based numbering)
    pub fn proposal_listing(proposals: &[Proposal]) -> String {
        let mut listing = String::new();
        for (i, proposal) in proposals.iter().enumerate() {
            listing.push_str(&format!(
                "Proposal {}: {}\n  {}\n",
                i + 1,
                proposal.title,
                truncate(proposal.description.trim(), BALLOT_DESCRIPTION_CHARS)
            ));
            if !proposal.benefits.is_empty() {
                listing.push_str("  Key benefits:\n");
                for benefit in proposal.benefits.iter().take(BALLOT_BENEFITS) {
                    listing.push_str(&format!("  - {}\n", benefit));
                }
            }
            listing.push('\n');
        }
        listing
    }

    /// Output instructions for the given rule
    pub fn voting_instructions(rule: VotingRule, proposal_count: usize) -> String {
        match rule {
            VotingRule::Majority | VotingRule::Unanimity => format!(
                "Choose the single proposal you support most.\n\
                 Answer with:\n\
                 VOTE: <proposal number between 1 and {}>\n\
                 REASON: <one or two sentences>",
                proposal_count
            ),
            VotingRule::Rated => {
                let mut text = String::from(
                    "Rate every proposal from 1 (poor) to 5 (excellent).\nAnswer with one line per proposal:\n",
                );
                for n in 1..=proposal_count {
                    text.push_str(&format!("Proposal {}: <1-5>\n", n));
                }
                text.push_str("REASON: <one or two sentences>");
                text
            }
            VotingRule::Ranked => {
                let mut text = String::from(
                    "Rank ALL proposals from most to least preferred.\nAnswer with one line per position:\n",
                );
                for k in 1..=proposal_count {
                    text.push_str(&format!("{}: Proposal <number>\n", ordinal(k)));
                }
                text.push_str("REASON: <one or two sentences>");
                text
            }
        }
    }

    /// User prompt for the voting phase
    pub fn voting_prompt(topic: &str, rule: VotingRule, proposals: &[Proposal]) -> String {
        format!(
            "Topic: {}\n\nThe following proposals were submitted:\n\n{}{}",
            topic,
            Self::proposal_listing(proposals),
            Self::voting_instructions(rule, proposals.len())
        )
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ... `11th`, `12th`, `13th`, `21st`
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voting::parsing::{VoteParse, parse_vote_response};

    fn proposals() -> Vec<Proposal> {
        vec![
            Proposal::new("a1", "Use Kafka", "x".repeat(400))
                .with_id("p1")
                .with_benefits(vec!["b1".into(), "b2".into(), "b3".into(), "b4".into()]),
            Proposal::new("a2", "Use SQS", "Managed queue").with_id("p2"),
        ]
    }

    #[test]
    fn test_discussion_prompt_opening_round() {
        let prompt = PromptTemplate::discussion_prompt("Pick a queue", 1, 2, "");
        assert!(prompt.contains("Pick a queue"));
        assert!(prompt.contains("round 1 of 2"));
        assert!(prompt.contains("opening the discussion"));
    }

    #[test]
    fn test_discussion_prompt_with_transcript() {
        let prompt = PromptTemplate::discussion_prompt("t", 2, 2, "- Ada: hello");
        assert!(prompt.contains("- Ada: hello"));
        assert!(!prompt.contains("opening the discussion"));
    }

    #[test]
    fn test_proposal_prompt_has_grammar() {
        let prompt = PromptTemplate::proposal_prompt("Pick a queue", "- Ada: Kafka!");
        for marker in ["TITLE:", "DESCRIPTION:", "BENEFITS:", "STEPS:"] {
            assert!(prompt.contains(marker));
        }
        assert!(prompt.contains("- Ada: Kafka!"));
    }

    #[test]
    fn test_proposal_listing_truncates_and_limits_benefits() {
        let listing = PromptTemplate::proposal_listing(&proposals());
        assert!(listing.contains("Proposal 1: Use Kafka"));
        assert!(listing.contains("Proposal 2: Use SQS"));
        assert!(listing.contains("- b3"));
        assert!(!listing.contains("- b4"));
        assert!(!listing.contains(&"x".repeat(BALLOT_DESCRIPTION_CHARS)));
    }

    #[test]
    fn test_voting_prompt_per_rule() {
        let props = proposals();
        let majority = PromptTemplate::voting_prompt("t", VotingRule::Majority, &props);
        assert!(majority.contains("VOTE: <proposal number between 1 and 2>"));

        let rated = PromptTemplate::voting_prompt("t", VotingRule::Rated, &props);
        assert!(rated.contains("Proposal 2: <1-5>"));

        let ranked = PromptTemplate::voting_prompt("t", VotingRule::Ranked, &props);
        assert!(ranked.contains("1st: Proposal <number>"));
        assert!(ranked.contains("2nd: Proposal <number>"));
    }

    #[test]
    fn test_instruction_placeholders_do_not_parse_as_votes() {
        let props = proposals();
        for rule in VotingRule::ALL {
            let echoed = PromptTemplate::voting_instructions(rule, props.len());
            assert_eq!(
                parse_vote_response("a1", rule, &echoed, &props),
                VoteParse::Unparsed,
                "rule: {}",
                rule
            );
        }
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(21), "21st");
    }
}
