use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
        CreateChatCompletionResponse,
    },
    Client,
};

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{Result, SolaceError};
use crate::llm::prompts::{PromptSpec, Role};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

/// Thin client over the OpenAI-compatible chat-completions API.
///
/// One upstream HTTP attempt per [`complete`](Self::complete) call; every
/// provider-level failure collapses into [`SolaceError::ModelUnavailable`]
/// carrying only the failure kind. Request and response content is never
/// logged.
#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let (provider, _) = parse_llm_provider_model(&config.chat_model);
        let needs_api_key = !matches!(
            provider.to_lowercase().as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(SolaceError::ModelUnavailable(
                "API key required for this provider".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                SolaceError::ModelUnavailable(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries 500 errors with exponential backoff for up to
        // 15 minutes by default. The orchestration contract is exactly one
        // upstream attempt per call, so the retry budget is pinned to zero.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self { client })
    }

    /// Issue a single completion call for the given spec.
    ///
    /// A well-formed envelope with zero choices or empty content resolves to
    /// `Ok("")`; the conversational path substitutes its own gentle reply and
    /// the analytics paths treat the empty string as an extraction failure.
    pub async fn complete(&self, spec: &PromptSpec, task: &str) -> Result<String> {
        let request = self.build_request(spec)?;

        match self.client.chat().create(request).await {
            Ok(response) => Ok(Self::extract_content(response)),
            Err(error) => {
                let kind = Self::classify_error(&error);
                tracing::warn!(task = %task, kind = %kind, "model call failed");
                Err(SolaceError::ModelUnavailable(kind.to_string()))
            }
        }
    }

    fn build_request(&self, spec: &PromptSpec) -> Result<CreateChatCompletionRequest> {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            Vec::with_capacity(spec.messages.len());

        for message in &spec.messages {
            let built = match message.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map(Into::into),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map(Into::into),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(message.content.clone())
                    .build()
                    .map(Into::into),
            };

            messages.push(built.map_err(|error| {
                SolaceError::Validation(format!("Invalid {} message: {error}", message.role))
            })?);
        }

        CreateChatCompletionRequestArgs::default()
            .model(spec.model.clone())
            .messages(messages)
            .temperature(spec.temperature)
            .max_tokens(spec.max_tokens)
            .top_p(spec.top_p)
            .build()
            .map_err(|error| {
                SolaceError::Validation(format!("Invalid LLM completion request: {error}"))
            })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> String {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default()
    }

    /// Failure kind for the diagnostic log. Deliberately coarse: the caller
    /// only ever sees `ModelUnavailable`, and the log never includes message
    /// content.
    fn classify_error(error: &OpenAIError) -> &'static str {
        match error {
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                "rate_limit"
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => "auth",
            OpenAIError::ApiError(_) => "provider",
            OpenAIError::Reqwest(reqwest_error) => {
                if reqwest_error.is_timeout() {
                    "timeout"
                } else {
                    match reqwest_error.status() {
                        Some(reqwest::StatusCode::TOO_MANY_REQUESTS) => "rate_limit",
                        Some(reqwest::StatusCode::UNAUTHORIZED)
                        | Some(reqwest::StatusCode::FORBIDDEN) => "auth",
                        _ => "network",
                    }
                }
            }
            OpenAIError::JSONDeserialize(_) => "envelope",
            _ => "provider",
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("forbidden")
            || message.contains("authentication")
            || message.contains("invalid api key")
            || code.contains("invalid_api_key")
            || code.contains("authentication")
            || error_type.contains("authentication")
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, _) = parse_llm_provider_model(&config.chat_model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        Self {
            base_url,
            api_key: config.api_key.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "openai" => OPENAI_BASE_URL,
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => "http://localhost:1234/v1",
        _ => OPENAI_BASE_URL,
    }
}
