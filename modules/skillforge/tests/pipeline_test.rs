//! End-to-end pipeline tests against a scripted searcher, no network.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use skillforge::{
    extract_insights, run_research, write_package, PackageInput, Searcher,
};

/// Replays a fixed sequence of payloads, one per search call, and records
/// the queries it saw.
struct StubSearcher {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<String>>,
}

impl StubSearcher {
    fn new(responses: Vec<Result<Value>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Searcher for StubSearcher {
    async fn search(
        &self,
        query: &str,
        _max_results: u32,
        _include_domains: Option<&[String]>,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(query.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({ "answer": "", "results": [] })))
    }
}

fn empty_payload() -> Result<Value> {
    Ok(json!({ "answer": "", "results": [] }))
}

#[tokio::test]
async fn bare_topic_runs_five_queries_and_keeps_best_duplicate() {
    let searcher = StubSearcher::new(vec![
        Ok(json!({
            "answer": "",
            "results": [{
                "title": "Interview Guide",
                "url": "https://example.com/guide",
                "content": "",
                "score": 0.6,
            }]
        })),
        Ok(json!({
            "answer": "",
            "results": [{
                "title": "Interview Guide",
                "url": "https://example.com/guide",
                "content": "",
                "score": 0.9,
            }]
        })),
        empty_payload(),
        empty_payload(),
        empty_payload(),
    ]);

    let research = run_research(&searcher, "technical interview", "", "", 6, &[])
        .await
        .unwrap();

    assert_eq!(research.queries.len(), 5);
    assert_eq!(searcher.calls().len(), 5);
    assert_eq!(research.answers.len(), 5);
    assert_eq!(research.results.len(), 1);
    assert_eq!(research.results[0].score, 0.9);
}

#[tokio::test]
async fn search_failure_aborts_the_run() {
    let searcher = StubSearcher::new(vec![
        empty_payload(),
        Err(anyhow!("connection refused")),
        empty_payload(),
    ]);

    let outcome = run_research(&searcher, "public speaking", "", "", 6, &[]).await;

    assert!(outcome.is_err());
    // Fail-fast: nothing after the failing query runs.
    assert_eq!(searcher.calls().len(), 2);
}

#[tokio::test]
async fn results_accumulate_across_queries_in_rank_order() {
    let searcher = StubSearcher::new(vec![
        Ok(json!({
            "answer": "Practice with a strict timebox and review every answer afterwards.",
            "results": [
                { "url": "https://a.com/one", "score": 0.3 },
                { "url": "https://b.com/two", "score": 0.8 },
            ]
        })),
        Ok(json!({
            "results": [{ "url": "https://c.com/three", "score": 0.5 }]
        })),
        empty_payload(),
        empty_payload(),
        empty_payload(),
    ]);

    let research = run_research(&searcher, "technical interview", "", "", 6, &[])
        .await
        .unwrap();

    let urls: Vec<&str> = research.results.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://b.com/two", "https://c.com/three", "https://a.com/one"]
    );
    assert_eq!(research.answers[0].answer, "Practice with a strict timebox and review every answer afterwards.");
}

#[tokio::test]
async fn low_yield_run_falls_back_to_generic_guidance() {
    // All contents under 45 chars, all answers empty: extraction yields
    // nothing and the writer substitutes the fallback sentence.
    let searcher = StubSearcher::new(vec![
        Ok(json!({
            "answer": "",
            "results": [{ "url": "https://a.com/short", "content": "Too short.", "score": 0.4 }]
        })),
        empty_payload(),
        empty_payload(),
        empty_payload(),
        empty_payload(),
    ]);

    let research = run_research(&searcher, "salary negotiation", "", "", 6, &[])
        .await
        .unwrap();
    let insights = extract_insights("salary negotiation", &research.answers, &research.results, 10);
    assert!(insights.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let package_dir = write_package(
        dir.path(),
        &PackageInput {
            practice: "salary negotiation",
            audience: "",
            goal: "",
            queries: &research.queries,
            answers: &research.answers,
            results: &research.results,
            insights: &insights,
            min_unique_sources: 8,
        },
    )
    .unwrap();

    let skill = std::fs::read_to_string(package_dir.join("SKILL.md")).unwrap();
    assert!(skill.contains("Use the sources below to extract the most relevant frameworks"));
    assert!(skill.contains("name: practice-salary-negotiation-coach"));
}

#[tokio::test]
async fn audience_and_goal_add_their_queries() {
    let searcher = StubSearcher::new(Vec::new());
    let research = run_research(
        &searcher,
        "code review",
        "junior engineers",
        "clearer feedback",
        6,
        &[],
    )
    .await
    .unwrap();

    assert_eq!(research.queries.len(), 7);
    let calls = searcher.calls();
    assert!(calls.iter().any(|q| q.contains("for junior engineers")));
    assert!(calls.iter().any(|q| q.contains("improve clearer feedback")));
}
