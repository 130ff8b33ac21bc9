use crate::llm::extract::{extract_json, JsonShape};
use crate::llm::{prompts, LlmProvider};
use crate::support::fallback;
use crate::support::types::EmotionAnalysis;

/// Emotion analysis over free-form user text.
///
/// This operation never fails. Any failure along the chain -- unavailable
/// provider, gateway error, unparseable reply, out-of-range values -- takes
/// the fallback branch and returns the canonical neutral reading, so mood
/// charts and crisis screening always receive a fully-formed value.
pub struct EmotionAnalyzer {
    llm: LlmProvider,
    model: String,
}

impl Clone for EmotionAnalyzer {
    fn clone(&self) -> Self {
        Self {
            llm: self.llm.clone(),
            model: self.model.clone(),
        }
    }
}

impl EmotionAnalyzer {
    pub fn new(llm: LlmProvider, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub async fn analyze(&self, text: &str) -> EmotionAnalysis {
        if !self.llm.is_available() {
            tracing::warn!("LLM unavailable, returning default emotion analysis");
            return fallback::default_emotion_analysis();
        }

        let spec = prompts::emotion_analysis(&self.model, text);

        let raw = match self.llm.complete(&spec, "emotion_analysis").await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(error = %error, "emotion analysis call failed, using default");
                return fallback::default_emotion_analysis();
            }
        };

        match extract_json(&raw, JsonShape::Object).and_then(EmotionAnalysis::from_value) {
            Ok(analysis) => analysis,
            Err(error) => {
                tracing::warn!(error = %error, "emotion analysis extraction failed, using default");
                fallback::default_emotion_analysis()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LlmConfig;
    use crate::support::types::Emotion;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn mock_llm_config(base_url: &str) -> LlmConfig {
        LlmConfig {
            chat_model: "openai/gpt-4o".to_string(),
            insight_model: "openai/gpt-4o-mini".to_string(),
            api_key: Some("test-key".to_string()),
            base_url: Some(base_url.to_string()),
            timeout_secs: 5,
        }
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "test",
            "object": "chat.completion",
            "created": 1,
            "model": "gpt-4o",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
        })
    }

    async fn analyzer_against(server: &MockServer) -> EmotionAnalyzer {
        let llm = LlmProvider::new(Some(&mock_llm_config(&server.uri())));
        EmotionAnalyzer::new(llm, "gpt-4o")
    }

    #[tokio::test]
    async fn test_unavailable_llm_returns_exact_default() {
        let analyzer =
            EmotionAnalyzer::new(LlmProvider::unavailable("test unavailable"), "gpt-4o");

        let analysis = analyzer.analyze("I feel fine").await;
        assert_eq!(analysis, fallback::default_emotion_analysis());
    }

    #[tokio::test]
    async fn test_valid_fenced_json_is_parsed() {
        let server = MockServer::start().await;
        let content = "Here's my analysis:\n```json\n{\"dominantEmotion\":\"sad\",\"sentimentScore\":-0.6,\"stressLevel\":7,\"emotions\":[\"grief\"],\"themes\":[\"family\"],\"insights\":\"This loss weighs on you.\",\"suggestions\":[\"Talk to someone you trust\",\"Rest today\",\"Write about it\"],\"crisisSignals\":false}\n```";
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .mount(&server)
            .await;

        let analysis = analyzer_against(&server).await.analyze("entry").await;

        assert_eq!(analysis.dominant_emotion, Emotion::Sad);
        assert_eq!(analysis.stress_level, 7);
        assert_eq!(analysis.suggestions.len(), 3);
    }

    #[tokio::test]
    async fn test_truncated_json_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(r#"{"dominantEmotion":"sad""#)),
            )
            .mount(&server)
            .await;

        let analysis = analyzer_against(&server).await.analyze("entry").await;
        assert_eq!(analysis, fallback::default_emotion_analysis());
    }

    #[tokio::test]
    async fn test_out_of_range_sentiment_falls_back_to_default() {
        let server = MockServer::start().await;
        let content = r#"{"dominantEmotion":"happy","sentimentScore":3.0,"stressLevel":1,"emotions":[],"themes":[],"insights":"x","suggestions":["a","b","c"],"crisisSignals":false}"#;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
            .mount(&server)
            .await;

        let analysis = analyzer_against(&server).await.analyze("entry").await;
        assert_eq!(analysis, fallback::default_emotion_analysis());
    }

    #[tokio::test]
    async fn test_upstream_error_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"message": "Internal server error"}
            })))
            .mount(&server)
            .await;

        let analysis = analyzer_against(&server).await.analyze("entry").await;
        assert_eq!(analysis, fallback::default_emotion_analysis());
    }

    #[tokio::test]
    async fn test_prose_only_reply_falls_back_to_default() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
                "You seem to be doing okay overall, keep it up!",
            )))
            .mount(&server)
            .await;

        let analysis = analyzer_against(&server).await.analyze("entry").await;
        assert_eq!(analysis, fallback::default_emotion_analysis());
    }
}
