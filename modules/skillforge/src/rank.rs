//! URL-level deduplication and relevance ranking.

use std::collections::HashMap;

use crate::types::SearchResult;

/// Collapse results sharing a normalized URL (trimmed, lowercased) to the
/// highest-scoring instance, then order survivors by score descending.
///
/// Tie behavior, both deterministic: at equal score the first-seen record
/// for a URL is kept, and the final sort is stable over first-seen key
/// order, so equal-score survivors retain the order their URLs first
/// appeared in the input.
pub fn dedupe_rank(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<SearchResult> = Vec::new();

    for result in results {
        let key = result.url.trim().to_lowercase();
        match index.get(&key) {
            Some(&slot) => {
                if result.score > kept[slot].score {
                    kept[slot] = result;
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push(result);
            }
        }
    }

    kept.sort_by(|a, b| b.score.total_cmp(&a.score));
    kept
}
