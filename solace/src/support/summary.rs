use crate::llm::{prompts, LlmProvider};
use crate::support::fallback;

/// Weekly wellbeing summary over tracked mood scores and journal themes.
///
/// Never fails: an unavailable provider, a failed call, or an empty reply
/// all resolve to the fixed encouraging fallback sentence.
pub struct WeeklySummarizer {
    llm: LlmProvider,
    model: String,
}

impl Clone for WeeklySummarizer {
    fn clone(&self) -> Self {
        Self {
            llm: self.llm.clone(),
            model: self.model.clone(),
        }
    }
}

impl WeeklySummarizer {
    pub fn new(llm: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub async fn summarize(&self, mood_scores: &[f32], journal_themes: &[String]) -> String {
        if !self.llm.is_available() {
            tracing::warn!("LLM unavailable, returning default weekly summary");
            return fallback::default_weekly_summary();
        }

        let spec = prompts::weekly_summary(&self.model, mood_scores, journal_themes);

        match self.llm.complete(&spec, "weekly_summary").await {
            Ok(summary) if summary.trim().is_empty() => {
                tracing::warn!("weekly summary reply was empty, using default");
                fallback::default_weekly_summary()
            }
            Ok(summary) => summary.trim().to_string(),
            Err(error) => {
                tracing::warn!(error = %error, "weekly summary call failed, using default");
                fallback::default_weekly_summary()
            }
        }
    }
}
