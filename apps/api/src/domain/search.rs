use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::errors::ProviderResult;

/// One organic web-search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub position: Option<u32>,
}

/// Port for a web-search provider
///
/// Implementations return at most the number of results they were
/// configured for, in the provider's ranking order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> ProviderResult<Vec<SearchResult>>;
}
