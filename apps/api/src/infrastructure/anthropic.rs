// Anthropic Messages API adapter for the LanguageModel port

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::retry::{parse_retry_after, RetryPolicy};
use crate::domain::errors::{ProviderError, ProviderResult};
use crate::domain::llm::{
    ChatMessage, Completion, CompletionRequest, ContentBlock, LanguageModel, StopReason,
    TokenUsage, ToolChoice, ToolSpec,
};

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const API_VERSION: &str = "2023-06-01";

/// Client for `POST /v1/messages`
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
    retry: RetryPolicy,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ToolSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoicePayload>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolChoicePayload {
    Auto,
    None,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ResponseBlock>,
    #[serde(default)]
    stop_reason: Option<StopReason>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Default, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AnthropicClient {
    /// Create a client for `model` against the public API
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: messages_endpoint(DEFAULT_BASE_URL),
            model: model.into(),
            retry: RetryPolicy::default(),
        })
    }

    /// Point the client at another API host (proxies, tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.endpoint = messages_endpoint(base_url);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Same credentials and transport, different model
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, body: &MessagesRequest<'_>) -> ProviderResult<Completion> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::from_status(
                status.as_u16(),
                error_message(&text),
                retry_after,
            ));
        }

        parse_completion(&text)
    }
}

#[async_trait]
impl LanguageModel for AnthropicClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> ProviderResult<Completion> {
        let tool_choice = if request.tools.is_empty() {
            None
        } else {
            Some(match request.tool_choice {
                ToolChoice::Auto => ToolChoicePayload::Auto,
                ToolChoice::None => ToolChoicePayload::None,
            })
        };

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            messages: request.messages,
            system: request.system,
            temperature: request.temperature,
            tools: request.tools,
            tool_choice,
        };

        tracing::debug!(
            model = %self.model,
            messages = body.messages.len(),
            tools = body.tools.len(),
            "sending messages request"
        );

        let body = &body;
        self.retry
            .run("anthropic messages request", move || self.send(body))
            .await
    }
}

fn messages_endpoint(base_url: &str) -> String {
    format!("{}/v1/messages", base_url.trim_end_matches('/'))
}

/// Extract the human-readable message from an error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.is_empty() => "empty response body".to_string(),
        Err(_) => body.chars().take(500).collect(),
    }
}

fn parse_completion(body: &str) -> ProviderResult<Completion> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::Parse(format!("{}: {}", e, body.chars().take(200).collect::<String>())))?;

    let content = parsed
        .content
        .into_iter()
        .filter_map(|block| match block {
            ResponseBlock::Text { text } => Some(ContentBlock::Text { text }),
            ResponseBlock::ToolUse { id, name, input } => {
                Some(ContentBlock::ToolUse { id, name, input })
            }
            ResponseBlock::Unsupported => None,
        })
        .collect();

    Ok(Completion {
        model: parsed.model,
        content,
        stop_reason: parsed.stop_reason.unwrap_or(StopReason::EndTurn),
        usage: TokenUsage::new(parsed.usage.input_tokens, parsed.usage.output_tokens),
    })
}
