//! Run orchestration: fan a topic out into queries, search them one at a
//! time, and fold the responses into ranked research.
//!
//! Queries run sequentially and fail fast: the first transport or protocol
//! error aborts the run before any package is written. Payload shape
//! looseness is tolerated downstream in normalization instead.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use tavily_client::TavilyClient;

use crate::normalize::normalize_payload;
use crate::queries::build_queries;
use crate::rank::dedupe_rank;
use crate::types::{AnswerRecord, Research};

/// Seam between the pipeline and the search provider, so tests can script
/// responses without a network.
#[async_trait]
pub trait Searcher: Send + Sync {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
        include_domains: Option<&[String]>,
    ) -> Result<Value>;
}

#[async_trait]
impl Searcher for TavilyClient {
    async fn search(
        &self,
        query: &str,
        max_results: u32,
        include_domains: Option<&[String]>,
    ) -> Result<Value> {
        Ok(TavilyClient::search(self, query, max_results, include_domains).await?)
    }
}

pub async fn run_research(
    searcher: &dyn Searcher,
    practice: &str,
    audience: &str,
    goal: &str,
    max_results: u32,
    include_domains: &[String],
) -> Result<Research> {
    let queries = build_queries(practice, audience, goal);
    let domains = (!include_domains.is_empty()).then_some(include_domains);

    let mut answers = Vec::with_capacity(queries.len());
    let mut all_results = Vec::new();
    for query in &queries {
        info!(query = query.as_str(), "Tavily search");
        let payload = searcher
            .search(query, max_results, domains)
            .await
            .with_context(|| format!("search failed for query: {query}"))?;
        let (answer, results) = normalize_payload(query, &payload)?;
        answers.push(AnswerRecord {
            query: query.clone(),
            answer,
        });
        all_results.extend(results);
    }

    let results = dedupe_rank(all_results);
    info!(
        queries = queries.len(),
        unique_sources = results.len(),
        "Research run complete"
    );

    Ok(Research {
        queries,
        answers,
        results,
    })
}
