use thiserror::Error;

use crate::domain::errors::ProviderError;

/// Errors that can occur in the agent system
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("LLM API error: {0}")]
    Llm(ProviderError),

    #[error("Search API error: {0}")]
    Search(ProviderError),

    #[error("Agent '{role}' returned an empty response")]
    EmptyResponse { role: String },

    #[error("Missing input for placeholder {{{0}}}")]
    MissingInput(String),

    #[error("Invalid tool input: {0}")]
    ToolInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
