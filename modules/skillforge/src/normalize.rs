//! Conversion of raw Tavily payloads into typed entities. Shape looseness is
//! tolerated here: a missing answer becomes an empty string and a missing or
//! ill-shaped result list becomes zero results. Only a present-but-non-numeric
//! relevance score is an error.

use anyhow::{bail, Result};
use serde_json::Value;

use crate::types::SearchResult;

const UNTITLED: &str = "Untitled source";

/// Extract the provider answer and the typed results from one search
/// payload. Result order follows the payload; no ranking happens here.
pub fn normalize_payload(query: &str, payload: &Value) -> Result<(String, Vec<SearchResult>)> {
    let answer = payload
        .get("answer")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_string();

    let Some(items) = payload.get("results").and_then(Value::as_array) else {
        return Ok((answer, Vec::new()));
    };

    let mut parsed = Vec::new();
    for item in items {
        let Some(obj) = item.as_object() else {
            continue;
        };
        let url = obj
            .get("url")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if url.is_empty() {
            continue;
        }

        let title = obj
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(UNTITLED);
        let content = obj
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        let score = match obj.get("score") {
            None | Some(Value::Null) => 0.0,
            Some(value) => match value.as_f64() {
                Some(score) => score,
                None => bail!("non-numeric score {value} for result {url} (query: {query})"),
            },
        };
        let published_date = obj
            .get("published_date")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(String::from);

        parsed.push(SearchResult {
            query: query.to_string(),
            title: title.to_string(),
            url: url.to_string(),
            content: content.to_string(),
            score,
            published_date,
        });
    }
    Ok((answer, parsed))
}
