// Domain layer module exports
// Ports for the external services the agents talk to.
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod llm;
pub mod search;

pub use errors::{ProviderError, ProviderResult};
pub use llm::{
    ChatMessage, Completion, CompletionRequest, ContentBlock, LanguageModel, Role, StopReason,
    TokenUsage, ToolCall, ToolChoice, ToolSpec,
};
pub use search::{SearchProvider, SearchResult};
