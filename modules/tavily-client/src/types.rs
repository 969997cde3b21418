use serde::Serialize;

/// Request body for the `/search` endpoint.
///
/// The payload shape follows the Tavily REST API: the key rides in the body,
/// not in a header. `include_domains` is omitted entirely when empty so the
/// API applies no domain restriction.
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub api_key: String,
    pub query: String,
    pub search_depth: String,
    pub max_results: u32,
    pub include_answer: bool,
    pub include_raw_content: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_domains: Option<Vec<String>>,
}

impl SearchRequest {
    pub fn advanced(api_key: &str, query: &str, max_results: u32) -> Self {
        Self {
            api_key: api_key.to_string(),
            query: query.to_string(),
            search_depth: "advanced".to_string(),
            max_results,
            include_answer: true,
            include_raw_content: false,
            include_domains: None,
        }
    }
}
