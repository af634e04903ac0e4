use std::sync::Arc;

use research_crew_api::agents::ResearchPipeline;
use research_crew_api::api::{self, AppState};
use research_crew_api::config::Config;
use research_crew_api::infrastructure::{AnthropicClient, SerperClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load environment variables (RUST_LOG may come from .env)
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    // Provider clients
    let mut llm = AnthropicClient::new(&config.anthropic_api_key, &config.model, config.provider_timeout)
        .expect("Failed to create language model client");
    if let Some(base_url) = &config.anthropic_base_url {
        llm = llm.with_base_url(base_url);
    }

    let mut search = SerperClient::new(&config.serper_api_key, config.provider_timeout)
        .expect("Failed to create search client")
        .with_result_count(config.search_results);
    if let Some(base_url) = &config.serper_base_url {
        search = search.with_base_url(base_url);
    }

    // Agents, tasks and crew are built once and shared by every request
    let pipeline = ResearchPipeline::new(Arc::new(llm), Arc::new(search), config.agent_settings())
        .expect("Failed to build research pipeline");
    tracing::info!(model = %config.model, "Research pipeline ready");

    let app = api::router(AppState::new(pipeline));

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
