// Infrastructure layer module
// HTTP adapters for the language-model and web-search providers
// Follows Hexagonal Architecture

pub mod anthropic;
pub mod retry;
pub mod serper;

pub use anthropic::AnthropicClient;
pub use retry::RetryPolicy;
pub use serper::SerperClient;
