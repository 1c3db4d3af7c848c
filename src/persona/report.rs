use super::PersonaAnalysis;
use crate::models::UserDataset;
use std::collections::HashMap;

const RULE_WIDTH: usize = 50;
const TOP_SUBREDDITS: usize = 5;

/// Renders the analysis and dataset statistics as the plain-text report
pub fn format_persona(analysis: &PersonaAnalysis, dataset: &UserDataset) -> String {
    let demographics = &analysis.demographics;
    let sections = [
        section("INTERESTS", &format_list(&analysis.interests)),
        section("PERSONALITY TRAITS", &format_list(&analysis.personality_traits)),
        section("COMMUNICATION STYLE", &analysis.communication_style),
        section("VALUES & BELIEFS", &format_list(&analysis.values_beliefs)),
        section("LIFESTYLE", &analysis.lifestyle),
        section("TECHNICAL EXPERTISE", &analysis.technical_expertise),
        section("SOCIAL BEHAVIOR", &analysis.social_behavior),
    ];

    format!(
        "USER PERSONA: {}\n{}\n\n\
         DEMOGRAPHICS:\n\
         Age Range: {}\n\
         Location: {}\n\
         Occupation: {}\n\n\
         {}\
         ANALYSIS SUMMARY:\n\
         Based on {} posts and {} comments.\n\
         Most active subreddits: {}\n",
        dataset.username,
        "=".repeat(RULE_WIDTH),
        demographics.age_range,
        demographics.location,
        demographics.occupation,
        sections.concat(),
        dataset.posts.len(),
        dataset.comments.len(),
        format_top_subreddits(dataset)
    )
}

fn section(title: &str, body: &str) -> String {
    format!("{}:\n{}\n\n", title, body)
}

/// Renders each item as a `• item` line
pub fn format_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Up to `limit` subreddits by combined post and comment count
///
/// Counting walks posts then comments in dataset order; ties keep the order in
/// which subreddits were first seen.
pub fn top_subreddits(dataset: &UserDataset, limit: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for subreddit in dataset.records().filter_map(|r| r.subreddit.as_deref()) {
        match index.get(subreddit) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(subreddit, counts.len());
                counts.push((subreddit.to_string(), 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// `r/a, r/b, ...` for the top subreddits; empty when no record has one
fn format_top_subreddits(dataset: &UserDataset) -> String {
    top_subreddits(dataset, TOP_SUBREDDITS)
        .iter()
        .map(|(name, _)| format!("r/{}", name))
        .collect::<Vec<_>>()
        .join(", ")
}
