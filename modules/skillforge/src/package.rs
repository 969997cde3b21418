//! Package rendering: one research run becomes a directory with a coaching
//! skill document, a human-readable research log, and a JSON source export.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::text::slugify;
use crate::types::{AnswerRecord, SearchResult};

/// How many insights the skill document embeds.
const SKILL_INSIGHT_CAP: usize = 8;

/// How many sources the skill document lists.
const SKILL_SOURCE_CAP: usize = 12;

const FALLBACK_INSIGHT: &str = "Use the sources below to extract the most relevant frameworks, \
    pitfalls, and evaluation criteria before starting practice.";

pub struct PackageInput<'a> {
    pub practice: &'a str,
    pub audience: &'a str,
    pub goal: &'a str,
    pub queries: &'a [String],
    pub answers: &'a [AnswerRecord],
    /// Deduplicated results in rank order.
    pub results: &'a [SearchResult],
    pub insights: &'a [String],
    pub min_unique_sources: usize,
}

#[derive(Serialize)]
struct SourcesExport<'a> {
    practice: &'a str,
    audience: &'a str,
    goal: &'a str,
    generated_at: DateTime<Utc>,
    queries: &'a [String],
    unique_source_count: usize,
    unique_domain_count: usize,
    results: Vec<ExportResult<'a>>,
}

#[derive(Serialize)]
struct ExportResult<'a> {
    query: &'a str,
    title: &'a str,
    url: &'a str,
    domain: String,
    score: f64,
    published_date: Option<&'a str>,
    content: &'a str,
}

/// Write the three package documents under `<output_dir>/<slug>/`.
/// Re-running with the same topic overwrites the same location.
pub fn write_package(output_dir: &Path, input: &PackageInput<'_>) -> Result<PathBuf> {
    let slug = slugify(input.practice);
    let package_dir = output_dir.join(&slug);
    fs::create_dir_all(&package_dir)
        .with_context(|| format!("creating package dir {}", package_dir.display()))?;

    let generated_at = Utc::now();
    let unique_domains: BTreeSet<String> =
        input.results.iter().map(SearchResult::domain).collect();

    let skill_path = package_dir.join("SKILL.md");
    fs::write(&skill_path, render_skill(input, &slug))
        .with_context(|| format!("writing {}", skill_path.display()))?;

    let research_path = package_dir.join("research.md");
    fs::write(
        &research_path,
        render_research_log(input, generated_at, unique_domains.len()),
    )
    .with_context(|| format!("writing {}", research_path.display()))?;

    let export = SourcesExport {
        practice: input.practice,
        audience: input.audience,
        goal: input.goal,
        generated_at,
        queries: input.queries,
        unique_source_count: input.results.len(),
        unique_domain_count: unique_domains.len(),
        results: input
            .results
            .iter()
            .map(|r| ExportResult {
                query: &r.query,
                title: &r.title,
                url: &r.url,
                domain: r.domain(),
                score: r.score,
                published_date: r.published_date.as_deref(),
                content: &r.content,
            })
            .collect(),
    };
    let sources_path = package_dir.join("sources.json");
    let json = serde_json::to_string_pretty(&export)?;
    fs::write(&sources_path, json + "\n")
        .with_context(|| format!("writing {}", sources_path.display()))?;

    info!(path = %package_dir.display(), "Created package");
    info!(path = %skill_path.display(), "Wrote skill document");
    info!(path = %research_path.display(), "Wrote research log");
    info!(path = %sources_path.display(), "Wrote sources export");

    if input.results.len() < input.min_unique_sources {
        warn!(
            unique_sources = input.results.len(),
            target = input.min_unique_sources,
            "Fewer unique sources than target"
        );
    }

    Ok(package_dir)
}

fn render_skill(input: &PackageInput<'_>, slug: &str) -> String {
    let practice = input.practice;
    let goal = if input.goal.is_empty() {
        "improve performance through deliberate practice"
    } else {
        input.goal
    };
    let audience = if input.audience.is_empty() {
        "general professional context"
    } else {
        input.audience
    };

    let fallback = [FALLBACK_INSIGHT.to_string()];
    let insights: &[String] = if input.insights.is_empty() {
        &fallback
    } else {
        input.insights
    };
    let guidance = insights
        .iter()
        .take(SKILL_INSIGHT_CAP)
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "---\n\
         name: practice-{slug}-coach\n\
         description: Research-backed coaching plan for practicing {practice}. Use when the user wants a structured practice session with drills, rubric scoring, and actionable feedback.\n\
         ---\n\
         \n\
         # Practice: {practice}\n\
         \n\
         ## Session Setup\n\
         \n\
         - Confirm session target: `{goal}`\n\
         - Confirm audience/context: `{audience}`\n\
         - Set timebox and expected number of practice rounds.\n\
         \n\
         ## Research-Backed Guidance\n\
         \n\
         {guidance}\n\
         \n\
         ## Practice Flow\n\
         \n\
         1. Baseline attempt:\n\
         - Ask the user for a first attempt with no coaching interruptions.\n\
         - Capture strengths and failure points against the rubric.\n\
         \n\
         2. Focused drills:\n\
         - Drill 1: Structure and clarity under time pressure.\n\
         - Drill 2: Handling pushback, follow-up, or ambiguity.\n\
         - Drill 3: Advanced scenario aligned to the user's goal.\n\
         \n\
         3. Full simulation:\n\
         - Run one realistic end-to-end simulation.\n\
         - Score immediately and identify the top two improvement actions.\n\
         \n\
         4. Debrief:\n\
         - Explain what improved, what is still weak, and what to practice next.\n\
         - Give one homework drill and one reflection prompt.\n\
         \n\
         ## Coaching Rubric (1-5)\n\
         \n\
         - `Structure`: clear sequence, no rambling, logical transitions.\n\
         - `Relevance`: answer/pattern directly matches prompt and context.\n\
         - `Depth`: demonstrates reasoning, tradeoffs, and concrete examples.\n\
         - `Delivery`: concise communication, confidence, and control.\n\
         - `Adaptability`: adjusts when challenged or redirected.\n\
         \n\
         ## Common Failure Modes\n\
         \n\
         - Overly generic responses without concrete examples.\n\
         - Missing structure or skipping reasoning steps.\n\
         - Weak adaptation to constraints, follow-up, or feedback.\n\
         - No explicit self-correction after mistakes.\n\
         \n\
         ## Sources\n\
         \n\
         {sources}\n",
        sources = markdown_sources(input.results, SKILL_SOURCE_CAP),
    )
}

/// Markdown bullet list of the top sources, with published date when known.
fn markdown_sources(results: &[SearchResult], limit: usize) -> String {
    if results.is_empty() {
        return "- No sources returned from Tavily.".to_string();
    }
    results
        .iter()
        .take(limit)
        .map(|item| {
            let published = item
                .published_date
                .as_deref()
                .map(|date| format!(" ({date})"))
                .unwrap_or_default();
            format!("- [{}]({}){}", item.title, item.url, published)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_research_log(
    input: &PackageInput<'_>,
    generated_at: DateTime<Utc>,
    unique_domain_count: usize,
) -> String {
    let mut lines = vec![
        format!("# Tavily Research Log: {}", input.practice),
        String::new(),
        format!("- Generated at: {}", generated_at.to_rfc3339()),
        format!(
            "- Audience: {}",
            if input.audience.is_empty() { "N/A" } else { input.audience }
        ),
        format!("- Goal: {}", if input.goal.is_empty() { "N/A" } else { input.goal }),
        format!("- Unique sources: {}", input.results.len()),
        format!("- Unique domains: {unique_domain_count}"),
        String::new(),
        "## Queries".to_string(),
        String::new(),
    ];
    lines.extend(input.queries.iter().map(|query| format!("- {query}")));
    lines.extend([String::new(), "## Tavily Answers".to_string(), String::new()]);
    for record in input.answers {
        lines.push(format!("### {}", record.query));
        lines.push(String::new());
        lines.push(if record.answer.is_empty() {
            "_No answer returned._".to_string()
        } else {
            record.answer.clone()
        });
        lines.push(String::new());
    }
    lines.extend(["## Source Inventory".to_string(), String::new()]);
    for result in input.results {
        lines.push(format!("- {} | {} | {}", result.title, result.domain(), result.url));
    }

    let mut log = lines.join("\n");
    let trimmed = log.trim_end().len();
    log.truncate(trimmed);
    log.push('\n');
    log
}
