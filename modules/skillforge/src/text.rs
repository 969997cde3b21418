//! Slug and tokenization helpers shared by the pipeline stages.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Fallback when a topic has no alphanumeric characters at all.
const FALLBACK_SLUG: &str = "practice-topic";

/// Keep generated package names within common skill naming limits.
const MAX_SLUG_LEN: usize = 50;

/// Words too generic to signal topicality. Tokens shorter than three
/// characters are already excluded by the word pattern.
const STOP_WORDS: &[&str] = &[
    "about", "after", "again", "against", "also", "because", "from", "into", "just", "more",
    "most", "other", "should", "their", "there", "these", "those", "through", "under", "very",
    "with", "your",
];

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z][a-zA-Z0-9-]{2,}").unwrap());

static SENTENCE_BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());

/// Filesystem-safe identifier derived from a topic: lowercase, runs of
/// non-alphanumeric characters collapsed to single hyphens, trimmed, capped
/// at 50 characters. Idempotent.
pub fn slugify(value: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;
    for ch in value.to_lowercase().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Lowercase word tokens of length >= 3, stop words removed, first
/// occurrence order preserved.
pub fn unique_words(value: &str) -> Vec<String> {
    let lower = value.to_lowercase();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for m in WORD_RE.find_iter(&lower) {
        let word = m.as_str();
        if STOP_WORDS.contains(&word) {
            continue;
        }
        if seen.insert(word) {
            out.push(word.to_string());
        }
    }
    out
}

/// Split text into sentence-like spans, cutting after terminal punctuation
/// (`.`, `!`, `?`) followed by whitespace. The punctuation stays with its
/// sentence; spans are not trimmed here.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut spans = Vec::new();
    let mut start = 0;
    for m in SENTENCE_BOUNDARY_RE.find_iter(text) {
        // The punctuation mark is a single ASCII byte.
        let cut = m.start() + 1;
        spans.push(&text[start..cut]);
        start = m.end();
    }
    if start < text.len() {
        spans.push(&text[start..]);
    }
    spans
}
