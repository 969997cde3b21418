//! Query expansion: one practice topic becomes a fixed fan of research
//! queries covering frameworks, pitfalls, rubrics, drills, and feedback.

use std::collections::HashSet;

/// Build the ordered, deduplicated query list for a topic. Audience and goal
/// each contribute one extra query when non-empty. Exact-string duplicates
/// are dropped, first occurrence wins.
pub fn build_queries(practice: &str, audience: &str, goal: &str) -> Vec<String> {
    let mut queries = vec![
        format!("{practice} frameworks checklist best practices"),
        format!("{practice} common mistakes pitfalls and how to improve"),
        format!("{practice} coaching rubric evaluation criteria scoring"),
        format!("{practice} drills exercises role play prompts"),
        format!("{practice} feedback techniques and debrief method"),
    ];
    if !audience.is_empty() {
        queries.push(format!("{practice} for {audience} examples and guidance"));
    }
    if !goal.is_empty() {
        queries.push(format!("{practice} methods to improve {goal}"));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut deduped = Vec::with_capacity(queries.len());
    for query in &queries {
        if seen.insert(query.as_str()) {
            deduped.push(query.clone());
        }
    }
    deduped
}
