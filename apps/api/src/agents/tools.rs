use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::errors::{AgentError, AgentResult};
use crate::domain::llm::ToolSpec;
use crate::domain::search::{SearchProvider, SearchResult};

/// A capability an agent may invoke while working on a task
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the tool's input object
    fn input_schema(&self) -> Value;

    /// Run the tool; the returned text is handed back to the model
    async fn call(&self, input: &Value) -> AgentResult<String>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Web search exposed to agents as `search_the_internet`
pub struct SearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl SearchTool {
    pub const NAME: &'static str = "search_the_internet";

    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Search the internet for a query and return the top results with title, link and snippet."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "search_query": {
                    "type": "string",
                    "description": "Mandatory search query you want to use to search the internet"
                }
            },
            "required": ["search_query"]
        })
    }

    async fn call(&self, input: &Value) -> AgentResult<String> {
        let query = input
            .get("search_query")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| {
                AgentError::ToolInput("search_query must be a non-empty string".to_string())
            })?;

        let results = self.provider.search(query).await.map_err(AgentError::Search)?;
        Ok(format_results(query, &results))
    }
}

/// Render search results as the text block the model reads
pub fn format_results(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for '{}'.", query);
    }

    let entries: Vec<String> = results
        .iter()
        .map(|r| format!("Title: {}\nLink: {}\nSnippet: {}", r.title, r.link, r.snippet))
        .collect();

    format!("Search results for '{}':\n\n{}", query, entries.join("\n---\n"))
}
