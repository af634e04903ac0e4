// Model availability probe used by the `check-models` binary

use crate::domain::errors::ProviderError;
use crate::domain::llm::{CompletionRequest, LanguageModel};

/// Candidate models, newest first
pub const CANDIDATE_MODELS: &[&str] = &[
    "claude-sonnet-4-5-20250929",
    "claude-4-opus",
    "claude-4-sonnet",
    "claude-3-5-sonnet-20241022",
    "claude-3-5-sonnet-20240620",
    "claude-3-5-sonnet-latest",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

const PROBE_PROMPT: &str = "Hi";
const PROBE_MAX_TOKENS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { reply: String },
    NotFound,
    AuthFailed,
    PermissionDenied,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeAttempt {
    pub model: String,
    pub outcome: ProbeOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub attempts: Vec<ProbeAttempt>,
}

impl ProbeReport {
    /// First model that answered
    pub fn working_model(&self) -> Option<&str> {
        self.attempts.iter().find_map(|attempt| match attempt.outcome {
            ProbeOutcome::Success { .. } => Some(attempt.model.as_str()),
            _ => None,
        })
    }

    pub fn auth_failed(&self) -> bool {
        self.attempts
            .iter()
            .any(|attempt| attempt.outcome == ProbeOutcome::AuthFailed)
    }
}

/// Try `models` in order until one answers a one-line prompt
///
/// Stops early on success and on an authentication failure, since a bad
/// key fails the same way for every model.
pub async fn probe_models<M, F, C>(models: &[&str], client_for: F, mut on_attempt: C) -> ProbeReport
where
    M: LanguageModel,
    F: Fn(&str) -> M,
    C: FnMut(&ProbeAttempt),
{
    let mut report = ProbeReport::default();

    for &model in models {
        let client = client_for(model);
        let outcome = match client
            .complete(CompletionRequest::prompt(PROBE_PROMPT, PROBE_MAX_TOKENS))
            .await
        {
            Ok(completion) => ProbeOutcome::Success {
                reply: completion.text(),
            },
            Err(ProviderError::NotFound(_)) => ProbeOutcome::NotFound,
            Err(ProviderError::Auth(_)) => ProbeOutcome::AuthFailed,
            Err(ProviderError::PermissionDenied(_)) => ProbeOutcome::PermissionDenied,
            Err(err) => ProbeOutcome::Failed(err.to_string()),
        };

        let attempt = ProbeAttempt {
            model: model.to_string(),
            outcome,
        };
        on_attempt(&attempt);

        let stop = matches!(
            attempt.outcome,
            ProbeOutcome::Success { .. } | ProbeOutcome::AuthFailed
        );
        report.attempts.push(attempt);
        if stop {
            break;
        }
    }

    report
}

/// Show the head and tail of a secret
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 30 {
        let head: String = chars.iter().take(4).collect();
        return format!("{}...", head);
    }
    let head: String = chars[..20].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{}...{}", head, tail)
}
