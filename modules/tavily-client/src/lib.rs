pub mod error;
pub mod types;

pub use error::{Result, TavilyError};
pub use types::SearchRequest;

use std::time::Duration;

const SEARCH_URL: &str = "https://api.tavily.com/search";

/// Per-request timeout. Tavily advanced-depth searches routinely take
/// 10-30s, so this is deliberately generous.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(45);

pub struct TavilyClient {
    client: reqwest::Client,
    api_key: String,
}

impl TavilyClient {
    pub fn new(api_key: String) -> Self {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { client, api_key }
    }

    /// Run one advanced-depth search. Returns the raw response document;
    /// callers own the conversion into typed results.
    ///
    /// A timeout surfaces as `TavilyError::Network`, an HTTP status >= 400 as
    /// `TavilyError::Api` with the body preserved, and a non-JSON body as
    /// `TavilyError::Parse`. No retries at this layer.
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
        include_domains: Option<&[String]>,
    ) -> Result<serde_json::Value> {
        let mut request = SearchRequest::advanced(&self.api_key, query, max_results);
        if let Some(domains) = include_domains {
            if !domains.is_empty() {
                request.include_domains = Some(domains.to_vec());
            }
        }

        tracing::debug!(query, max_results, "Tavily search request");

        let resp = self.client.post(SEARCH_URL).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TavilyError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let payload: serde_json::Value = serde_json::from_str(&body)?;
        Ok(payload)
    }
}
