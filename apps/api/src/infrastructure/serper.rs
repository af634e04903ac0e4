// Serper (Google search results API) adapter for the SearchProvider port

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::retry::{parse_retry_after, RetryPolicy};
use crate::domain::errors::{ProviderError, ProviderResult};
use crate::domain::search::{SearchProvider, SearchResult};

pub const DEFAULT_BASE_URL: &str = "https://google.serper.dev";
pub const DEFAULT_RESULT_COUNT: usize = 10;

#[derive(Debug, Clone)]
pub struct SerperClient {
    http: Client,
    api_key: String,
    endpoint: String,
    result_count: usize,
    retry: RetryPolicy,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    position: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl SerperClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: search_endpoint(DEFAULT_BASE_URL),
            result_count: DEFAULT_RESULT_COUNT,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoint = search_endpoint(base_url);
        self
    }

    /// Cap on results returned per query (at least one)
    pub fn with_result_count(mut self, result_count: usize) -> Self {
        self.result_count = result_count.max(1);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn send(&self, query: &str) -> ProviderResult<Vec<SearchResult>> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest {
                q: query,
                num: self.result_count,
            })
            .send()
            .await?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or(text);
            return Err(ProviderError::from_status(status.as_u16(), message, retry_after));
        }

        parse_results(&text, self.result_count)
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str) -> ProviderResult<Vec<SearchResult>> {
        tracing::debug!(query, "searching the web");
        self.retry
            .run("serper search", move || self.send(query))
            .await
    }
}

fn search_endpoint(base_url: &str) -> String {
    format!("{}/search", base_url.trim_end_matches('/'))
}

fn parse_results(body: &str, limit: usize) -> ProviderResult<Vec<SearchResult>> {
    let parsed: SearchResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    Ok(parsed
        .organic
        .into_iter()
        .filter(|result| !result.link.is_empty())
        .take(limit)
        .map(|result| SearchResult {
            title: result.title,
            link: result.link,
            snippet: result.snippet,
            position: result.position,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_organic_results_in_order() {
        let body = json!({
            "searchParameters": {"q": "rust", "type": "search"},
            "knowledgeGraph": {"title": "Rust"},
            "organic": [
                {"title": "Rust", "link": "https://www.rust-lang.org", "snippet": "A language...", "position": 1},
                {"title": "No snippet", "link": "https://example.com", "position": 2},
                {"title": "No link", "snippet": "dropped"}
            ]
        })
        .to_string();

        let results = parse_results(&body, 10).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].link, "https://www.rust-lang.org");
        assert_eq!(results[0].position, Some(1));
        assert_eq!(results[1].snippet, "");
    }

    #[test]
    fn truncates_to_limit() {
        let organic: Vec<_> = (1..=5)
            .map(|i| json!({"title": format!("r{}", i), "link": format!("https://e.com/{}", i)}))
            .collect();
        let body = json!({ "organic": organic }).to_string();

        let results = parse_results(&body, 3).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].title, "r3");
    }

    #[test]
    fn missing_organic_section_means_no_results() {
        assert!(parse_results("{}", 10).unwrap().is_empty());
        assert!(matches!(parse_results("not json", 10), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn result_count_is_at_least_one() {
        let client = SerperClient::new("key", Duration::from_secs(5))
            .unwrap()
            .with_result_count(0);
        assert_eq!(client.result_count, 1);
    }
}
