//! Keyword-weighted sentence extraction: the research text (provider answers
//! plus result snippets) is split into sentences, scored by overlap with the
//! topic's keywords, and the top-N distinct sentences survive.

use std::collections::HashSet;

use crate::text::{split_sentences, unique_words};
use crate::types::{AnswerRecord, SearchResult};

/// Sentences shorter than this are fragments, longer are walls of text.
const MIN_SENTENCE_LEN: usize = 45;
const MAX_SENTENCE_LEN: usize = 260;

/// Answers are provider-synthesized and presumed more curated than raw
/// snippets, so answer sentences get a flat score bonus.
const ANSWER_BONUS: usize = 1;
const ANSWER_WEIGHT: f64 = 1.0;

struct Candidate {
    keyword_score: usize,
    /// Tie-breaker below keyword score: 1.0 for answers, the result's own
    /// relevance score for snippets.
    weight: f64,
    sentence: String,
}

/// Pick the `limit` most topical sentences across all answers and result
/// contents. Returns an empty list when nothing qualifies; fallback text is
/// the package writer's concern.
pub fn extract_insights(
    topic: &str,
    answers: &[AnswerRecord],
    results: &[SearchResult],
    limit: usize,
) -> Vec<String> {
    let keywords: HashSet<String> = unique_words(topic).into_iter().collect();
    let mut candidates = Vec::new();

    for record in answers {
        collect_candidates(&record.answer, &keywords, &mut candidates, |score| {
            (score + ANSWER_BONUS, ANSWER_WEIGHT)
        });
    }
    for result in results {
        collect_candidates(&result.content, &keywords, &mut candidates, |score| {
            (score, result.score)
        });
    }

    // Stable sort keeps earlier candidates first on full ties.
    candidates.sort_by(|a, b| {
        b.keyword_score
            .cmp(&a.keyword_score)
            .then(b.weight.total_cmp(&a.weight))
    });

    let mut seen: HashSet<String> = HashSet::new();
    let mut picked = Vec::new();
    for candidate in candidates {
        let normalized = normalize_key(&candidate.sentence);
        if !seen.insert(normalized) {
            continue;
        }
        picked.push(candidate.sentence);
        if picked.len() >= limit {
            break;
        }
    }
    picked
}

fn collect_candidates(
    text: &str,
    keywords: &HashSet<String>,
    candidates: &mut Vec<Candidate>,
    rank: impl Fn(usize) -> (usize, f64),
) {
    for span in split_sentences(text) {
        let clean = span.trim();
        let len = clean.chars().count();
        if !(MIN_SENTENCE_LEN..=MAX_SENTENCE_LEN).contains(&len) {
            continue;
        }
        let overlap = unique_words(clean)
            .iter()
            .filter(|word| keywords.contains(*word))
            .count();
        let (keyword_score, weight) = rank(overlap);
        candidates.push(Candidate {
            keyword_score,
            weight,
            sentence: clean.to_string(),
        });
    }
}

/// Dedupe key: lowercase with whitespace runs collapsed to single spaces.
fn normalize_key(sentence: &str) -> String {
    sentence
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> AnswerRecord {
        AnswerRecord {
            query: "q".to_string(),
            answer: text.to_string(),
        }
    }

    fn snippet(text: &str, score: f64) -> SearchResult {
        SearchResult {
            query: "q".to_string(),
            title: "t".to_string(),
            url: "https://example.com/a".to_string(),
            content: text.to_string(),
            score,
            published_date: None,
        }
    }

    #[test]
    fn sentences_outside_length_bounds_are_dropped() {
        let answers = [answer("Too short. Practice the interview loop daily with a timer and written feedback notes.")];
        let insights = extract_insights("interview practice", &answers, &[], 10);
        assert_eq!(insights.len(), 1);
        let len = insights[0].chars().count();
        assert!((45..=260).contains(&len));
    }

    #[test]
    fn answer_sentences_outrank_equal_scoring_snippets() {
        let text = "Interview practice improves fastest with deliberate repetition and review.";
        let answers = [answer(text)];
        let other = "Interview practice improves fastest with focused repetition and feedback.";
        let results = [snippet(other, 0.99)];
        let insights = extract_insights("interview practice", &answers, &results, 10);
        assert_eq!(insights[0], text);
    }

    #[test]
    fn duplicate_sentences_collapse_case_insensitively() {
        let text = "Structured mock interviews sharpen both pacing and clarity under pressure.";
        let shouted = text.to_uppercase();
        let answers = [answer(text), answer(&shouted)];
        let insights = extract_insights("mock interviews", &answers, &[], 10);
        assert_eq!(insights.len(), 1);
    }

    #[test]
    fn limit_caps_the_returned_count() {
        let content = "Negotiation anchors matter in every opening exchange you make. \
            Negotiation counters work best when planned before the call starts. \
            Negotiation silence is a tool that many beginners underuse badly.";
        let results = [snippet(content, 0.5)];
        let insights = extract_insights("negotiation", &[], &results, 2);
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn zero_matches_returns_empty() {
        let answers = [answer("Short."), answer("")];
        let insights = extract_insights("negotiation", &answers, &[], 10);
        assert!(insights.is_empty());
    }

    #[test]
    fn higher_result_score_breaks_keyword_ties() {
        let low = "Negotiation preparation starts with researching the counterpart fully.";
        let high = "Negotiation preparation requires rehearsing concessions out loud first.";
        let results = [snippet(low, 0.2), snippet(high, 0.9)];
        let insights = extract_insights("negotiation preparation", &[], &results, 10);
        assert_eq!(insights[0], high);
    }
}
