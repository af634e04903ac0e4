// Process configuration loaded once at startup from the environment

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::agents::AgentSettings;

pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable server configuration
#[derive(Clone, PartialEq)]
pub struct Config {
    pub anthropic_api_key: String,
    pub serper_api_key: String,
    pub anthropic_base_url: Option<String>,
    pub serper_base_url: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub search_results: usize,
    pub max_iterations: u32,
    pub verbose: bool,
    pub provider_timeout: Duration,
    pub host: IpAddr,
    pub port: u16,
}

// Keys are redacted so the config can be logged
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("anthropic_api_key", &"<redacted>")
            .field("serper_api_key", &"<redacted>")
            .field("anthropic_base_url", &self.anthropic_base_url)
            .field("serper_base_url", &self.serper_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("search_results", &self.search_results)
            .field("max_iterations", &self.max_iterations)
            .field("verbose", &self.verbose)
            .field("provider_timeout", &self.provider_timeout)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let model = get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            anthropic_api_key: required("ANTHROPIC_API_KEY")?,
            serper_api_key: required("SERPER_API_KEY")?,
            anthropic_base_url: get("ANTHROPIC_BASE_URL"),
            serper_base_url: get("SERPER_BASE_URL"),
            model: strip_provider_prefix(&model).to_string(),
            temperature: parse_or("LLM_TEMPERATURE", get("LLM_TEMPERATURE"), 0.5)?,
            max_tokens: parse_or("LLM_MAX_TOKENS", get("LLM_MAX_TOKENS"), 4096)?,
            search_results: parse_or("SEARCH_RESULTS", get("SEARCH_RESULTS"), 10)?,
            max_iterations: parse_or("AGENT_MAX_ITERATIONS", get("AGENT_MAX_ITERATIONS"), 5)?,
            verbose: parse_bool("CREW_VERBOSE", get("CREW_VERBOSE"), true)?,
            provider_timeout: Duration::from_secs(parse_or(
                "PROVIDER_TIMEOUT_SECS",
                get("PROVIDER_TIMEOUT_SECS"),
                120,
            )?),
            host: parse_or("HOST", get("HOST"), IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings {
            temperature: Some(self.temperature),
            max_tokens: self.max_tokens,
            max_iterations: self.max_iterations,
            verbose: self.verbose,
        }
    }
}

/// `anthropic/claude-x` and `claude-x` name the same model
pub fn strip_provider_prefix(model: &str) -> &str {
    model.strip_prefix("anthropic/").unwrap_or(model)
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = value else {
        return Ok(default);
    };
    match value.parse() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_bool(key: &'static str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value,
            reason: "expected true or false".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const KEYS: [(&str, &str); 2] = [("ANTHROPIC_API_KEY", "sk-ant-test"), ("SERPER_API_KEY", "serper-test")];

    #[test]
    fn defaults_apply_when_only_keys_are_set() {
        let config = Config::from_lookup(lookup(&KEYS)).unwrap();

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, 0.5);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.search_results, 10);
        assert_eq!(config.max_iterations, 5);
        assert!(config.verbose);
        assert_eq!(config.provider_timeout, Duration::from_secs(120));
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn missing_keys_are_reported() {
        let err = Config::from_lookup(lookup(&[("SERPER_API_KEY", "x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("ANTHROPIC_API_KEY"));

        let err = Config::from_lookup(lookup(&[("ANTHROPIC_API_KEY", "x"), ("SERPER_API_KEY", "  ")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("SERPER_API_KEY"));
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = KEYS.to_vec();
        pairs.extend([
            ("LLM_MODEL", "anthropic/claude-3-haiku-20240307"),
            ("LLM_TEMPERATURE", "0.2"),
            ("PORT", "9100"),
            ("HOST", "127.0.0.1"),
            ("CREW_VERBOSE", "off"),
            ("AGENT_MAX_ITERATIONS", "2"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(config.model, "claude-3-haiku-20240307");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9100");
        assert!(!config.verbose);
        assert_eq!(config.agent_settings().max_iterations, 2);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let mut pairs = KEYS.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let config = Config::from_lookup(lookup(&KEYS)).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-ant-test"));
        assert!(debug.contains("<redacted>"));
    }
}
