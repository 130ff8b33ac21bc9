use serde_json::Value;

use crate::error::{Result, SolaceError};
use crate::llm::extract::{extract_json, JsonShape};
use crate::llm::{prompts, LlmProvider};
use crate::support::fallback;
use crate::support::types::SuggestionContext;

/// Personalized coping-suggestion generation.
///
/// Never fails and never returns an empty list: any failure falls back to
/// the fixed table keyed by the caller-reported emotion. Valid model output
/// longer than five items is truncated; shorter than three is rejected as
/// an extraction failure.
pub struct SuggestionEngine {
    llm: LlmProvider,
    model: String,
}

impl Clone for SuggestionEngine {
    fn clone(&self) -> Self {
        Self {
            llm: self.llm.clone(),
            model: self.model.clone(),
        }
    }
}

impl SuggestionEngine {
    pub fn new(llm: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub async fn generate(&self, context: &SuggestionContext) -> Vec<String> {
        if !self.llm.is_available() {
            tracing::warn!("LLM unavailable, returning default suggestions");
            return fallback::default_suggestions(context.emotion.as_deref());
        }

        let spec = prompts::coping_suggestions(&self.model, context);

        let raw = match self.llm.complete(&spec, "suggestions").await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(error = %error, "suggestion call failed, using defaults");
                return fallback::default_suggestions(context.emotion.as_deref());
            }
        };

        match extract_json(&raw, JsonShape::Array).and_then(Self::decode_list) {
            Ok(suggestions) => suggestions,
            Err(error) => {
                tracing::warn!(error = %error, "suggestion extraction failed, using defaults");
                fallback::default_suggestions(context.emotion.as_deref())
            }
        }
    }

    fn decode_list(value: Value) -> Result<Vec<String>> {
        let mut list: Vec<String> = serde_json::from_value(value)
            .map_err(|error| SolaceError::Extraction(format!("suggestion decode: {error}")))?;

        if list.iter().any(|s| s.trim().is_empty()) {
            return Err(SolaceError::Extraction(
                "empty suggestion string".to_string(),
            ));
        }
        if list.len() < 3 {
            return Err(SolaceError::Extraction(format!(
                "{} suggestions, expected at least 3",
                list.len()
            )));
        }

        list.truncate(5);
        Ok(list)
    }
}
