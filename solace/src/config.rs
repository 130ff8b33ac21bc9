use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: Option<LlmConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
}

/// LLM configuration for the two completion-model tiers.
///
/// `chat_model` serves the quality-sensitive paths (therapeutic replies,
/// emotion analysis); `insight_model` serves the latency-sensitive paths
/// (coping suggestions, weekly summaries). Both are `provider/model`
/// strings, e.g. `openai/gpt-4o` or `ollama/llama3`.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub chat_model: String,
    pub insight_model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Bare model name for the chat tier, provider prefix stripped.
    pub fn chat_model_name(&self) -> String {
        let (_, model) = parse_llm_provider_model(&self.chat_model);
        model.to_string()
    }

    /// Bare model name for the insight tier, provider prefix stripped.
    pub fn insight_model_name(&self) -> String {
        let (_, model) = parse_llm_provider_model(&self.insight_model);
        model.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("SOLACE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("SOLACE_PORT", 3000),
                api_keys: env::var("SOLACE_API_KEYS")
                    .map(|keys| keys.split(',').map(|s| s.trim().to_string()).collect())
                    .unwrap_or_default(),
            },
            llm: env::var("SOLACE_CHAT_MODEL").ok().map(|chat_model| LlmConfig {
                chat_model,
                insight_model: env::var("SOLACE_INSIGHT_MODEL")
                    .unwrap_or_else(|_| "openai/gpt-4o-mini".to_string()),
                api_key: env::var("SOLACE_LLM_API_KEY").ok(),
                base_url: env::var("SOLACE_LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("SOLACE_LLM_TIMEOUT", 30),
            }),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
