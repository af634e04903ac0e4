//! Scripted providers shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use research_crew_api::agents::{AgentSettings, ResearchPipeline};
use research_crew_api::domain::{
    Completion, CompletionRequest, ContentBlock, LanguageModel, ProviderError, ProviderResult,
    SearchProvider, SearchResult, StopReason, TokenUsage,
};
use serde_json::json;

pub const RESEARCH_NOTES: &str = "INSIGHTS: AI is the study of machines that learn.";
pub const FINAL_ANSWER: &str = "Artificial intelligence builds systems that learn from data.";

/// Plays both crew roles, keyed on the role named in the system prompt
///
/// The Researcher searches once and then reports; the Writer answers
/// straight away. Every request is recorded.
pub struct RoleModel {
    pub requests: Mutex<Vec<CompletionRequest>>,
    failure: Option<ProviderError>,
}

impl RoleModel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            failure: None,
        })
    }

    pub fn failing(err: ProviderError) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(err),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Roles in the order the model was called
    pub fn roles(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| role_of(request).to_string())
            .collect()
    }
}

fn role_of(request: &CompletionRequest) -> &str {
    let system = request.system.as_deref().unwrap_or_default();
    if system.starts_with("You are Researcher.") {
        "Researcher"
    } else if system.starts_with("You are Writer.") {
        "Writer"
    } else {
        "unknown"
    }
}

/// Text of the first user message of a request
pub fn task_prompt(request: &CompletionRequest) -> String {
    request
        .messages
        .first()
        .map(|message| {
            message
                .content
                .iter()
                .filter_map(|block| match block {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

fn reply(content: Vec<ContentBlock>, stop_reason: StopReason) -> Completion {
    Completion {
        model: "scripted".to_string(),
        content,
        stop_reason,
        usage: TokenUsage::new(12, 6),
    }
}

#[async_trait]
impl LanguageModel for RoleModel {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<Completion> {
        let role = role_of(&request).to_string();
        let first_turn = request.messages.len() == 1;
        self.requests.lock().unwrap().push(request);

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let completion = match (role.as_str(), first_turn) {
            ("Researcher", true) => reply(
                vec![ContentBlock::ToolUse {
                    id: "toolu_01".to_string(),
                    name: "search_the_internet".to_string(),
                    input: json!({"search_query": "artificial intelligence"}),
                }],
                StopReason::ToolUse,
            ),
            ("Researcher", false) => reply(vec![ContentBlock::text(RESEARCH_NOTES)], StopReason::EndTurn),
            _ => reply(vec![ContentBlock::text(FINAL_ANSWER)], StopReason::EndTurn),
        };
        Ok(completion)
    }
}

/// Returns one fixed result and records each query
#[derive(Default)]
pub struct StaticSearch {
    pub queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn search(&self, query: &str) -> ProviderResult<Vec<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(vec![SearchResult {
            title: "Artificial intelligence - Wikipedia".to_string(),
            link: "https://en.wikipedia.org/wiki/Artificial_intelligence".to_string(),
            snippet: "Artificial intelligence is the capability of computational systems...".to_string(),
            position: Some(1),
        }])
    }
}

pub fn quiet_settings() -> AgentSettings {
    AgentSettings {
        verbose: false,
        ..AgentSettings::default()
    }
}

pub fn pipeline(llm: Arc<RoleModel>, search: Arc<StaticSearch>) -> ResearchPipeline {
    ResearchPipeline::new(llm, search, quiet_settings()).unwrap()
}
