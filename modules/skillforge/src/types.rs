use serde::Serialize;

/// One normalized search hit, built from a raw Tavily record during
/// normalization and immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    /// The query that produced this hit.
    pub query: String,
    pub title: String,
    pub url: String,
    pub content: String,
    /// Tavily relevance score, 0.0 when the provider omits it.
    pub score: f64,
    pub published_date: Option<String>,
}

impl SearchResult {
    /// Host of the URL, lowercased, without a leading `www.` label.
    pub fn domain(&self) -> String {
        if let Ok(parsed) = url::Url::parse(&self.url) {
            if let Some(host) = parsed.host_str() {
                let host = host.to_lowercase();
                return host.strip_prefix("www.").unwrap_or(&host).to_string();
            }
        }
        // Schemeless or otherwise unparseable URLs: take everything up to
        // the first slash.
        let lower = self.url.to_lowercase();
        let stripped = lower
            .strip_prefix("https://")
            .or_else(|| lower.strip_prefix("http://"))
            .unwrap_or(&lower);
        let host = stripped.split('/').next().unwrap_or_default();
        host.strip_prefix("www.").unwrap_or(host).to_string()
    }
}

/// The provider's synthesized answer for one query. Kept even when empty so
/// the research log can show which queries came back dry.
#[derive(Debug, Clone)]
pub struct AnswerRecord {
    pub query: String,
    pub answer: String,
}

/// Aggregate output of one research run: the queries issued, one answer per
/// query, and the deduplicated results in rank order.
#[derive(Debug)]
pub struct Research {
    pub queries: Vec<String>,
    pub answers: Vec<AnswerRecord>,
    pub results: Vec<SearchResult>,
}
