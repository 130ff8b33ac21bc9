use std::sync::Arc;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{Result, SolaceError};
use crate::llm::api::LlmApiClient;
use crate::llm::prompts::PromptSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

/// Process-wide gateway to the completion provider.
///
/// Constructed once at startup and cloned read-only into the application
/// state; never mutated afterwards. When no usable configuration exists the
/// provider is `Unavailable` and every completion attempt fails with
/// [`SolaceError::ModelUnavailable`], which the orchestration layer converts
/// into fallbacks (or `ServiceUnavailable` on the conversational path).
#[derive(Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    client: Option<LlmApiClient>,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: Option<&LlmConfig>) -> Self {
        let Some(config) = config else {
            return Self::unavailable("No LLM configuration provided");
        };

        let (provider, _model) = parse_llm_provider_model(&config.chat_model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    return Self::unavailable(&format!(
                        "Unknown provider in model: {}",
                        config.chat_model
                    ));
                }
            }
        };

        let client = match LlmApiClient::new(config) {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(error = %error, "LLM client initialization failed");
                return Self::unavailable(&error.to_string());
            }
        };

        Self {
            backend,
            client: Some(client),
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            client: None,
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> Option<&LlmConfig> {
        self.config.as_deref()
    }

    /// Issue a single completion call for the given spec.
    ///
    /// `task` names the calling operation for the diagnostic log only.
    pub async fn complete(&self, spec: &PromptSpec, task: &str) -> Result<String> {
        let Some(client) = &self.client else {
            return Err(SolaceError::ModelUnavailable(self.unavailable_reason()));
        };

        client.complete(spec, task).await
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            LlmBackend::Unavailable { reason } => reason.clone(),
            _ => "no client".to_string(),
        }
    }
}
