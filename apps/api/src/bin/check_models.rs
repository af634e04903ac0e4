//! Check that ANTHROPIC_API_KEY works and find an accessible model
//!
//! Calls the Messages API directly, bypassing the agents.

use std::process::ExitCode;
use std::time::Duration;

use research_crew_api::diagnostics::{mask_key, probe_models, ProbeOutcome, CANDIDATE_MODELS};
use research_crew_api::infrastructure::{AnthropicClient, RetryPolicy};

const RULE: &str = "============================================================";

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let Some(api_key) = std::env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.trim().is_empty()) else {
        println!("[FAIL] ANTHROPIC_API_KEY not found in environment variables");
        return ExitCode::FAILURE;
    };

    println!("{}", RULE);
    println!("Testing Anthropic API Key");
    println!("{}", RULE);
    println!("\n[OK] API key found: {}", mask_key(&api_key));

    let mut client = match AnthropicClient::new(api_key.trim(), CANDIDATE_MODELS[0], Duration::from_secs(30)) {
        Ok(client) => client.with_retry_policy(RetryPolicy::none()),
        Err(e) => {
            println!("[FAIL] Failed to initialize Anthropic client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(base_url) = std::env::var("ANTHROPIC_BASE_URL") {
        client = client.with_base_url(&base_url);
    }
    println!("[OK] Anthropic client initialized");

    println!("\n{}", RULE);
    println!("Testing Claude Models");
    println!("{}", RULE);

    let report = probe_models(
        CANDIDATE_MODELS,
        |model| client.with_model(model),
        |attempt| {
            println!("\nTesting model: {}", attempt.model);
            match &attempt.outcome {
                ProbeOutcome::Success { reply } => {
                    println!("  [OK] Model '{}' is accessible", attempt.model);
                    println!("  Response: {}", reply);
                }
                ProbeOutcome::NotFound => println!("  [FAIL] Model not found (404)"),
                ProbeOutcome::AuthFailed => {
                    println!("  [FAIL] Authentication error - invalid API key")
                }
                ProbeOutcome::PermissionDenied => {
                    println!("  [FAIL] Permission denied - API key has no access to this model")
                }
                ProbeOutcome::Failed(err) => println!("  [FAIL] Error: {}", err),
            }
        },
    )
    .await;

    println!("\n{}", RULE);
    println!("Test Summary");
    println!("{}", RULE);

    match report.working_model() {
        Some(model) => {
            println!("\n[OK] Working model found: {}", model);
            println!("\nSet LLM_MODEL=anthropic/{} to use it", model);
            ExitCode::SUCCESS
        }
        None => {
            println!("\n[FAIL] No accessible Claude models found");
            if report.auth_failed() {
                println!("\nThe API key was rejected.");
            } else {
                println!("\nPossible issues:");
                println!("   1. API key may be invalid or expired");
                println!("   2. API key may not have access to any Claude models");
                println!("   3. Account may need to add a payment method");
                println!("   4. API tier may not include these models");
            }
            println!("\nVisit https://console.anthropic.com/ to check your account");
            ExitCode::FAILURE
        }
    }
}
