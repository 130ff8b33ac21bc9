//! End-to-end behavior of the four orchestration operations against a
//! misbehaving model provider. The invariant under test throughout: the
//! analytics operations always return fully-formed, range-valid values no
//! matter what the provider does, while the conversational operation fails
//! loudly rather than fabricate a reply.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solace::config::LlmConfig;
use solace::error::SolaceError;
use solace::llm::LlmProvider;
use solace::support::types::{validate_suggestion_list, SuggestionContext};
use solace::support::{fallback, EmotionAnalyzer, SuggestionEngine, TherapyChat, WeeklySummarizer};

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
        "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
    })
}

async fn failing_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"message": "Internal server error"}
        })))
        .mount(&server)
        .await;
    server
}

async fn garbage_server(content: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn failures_are_asymmetric_chat_loud_analytics_soft() {
    let server = failing_server().await;
    let llm = LlmProvider::new(Some(&mock_llm_config(&server.uri())));

    let chat = TherapyChat::new(llm.clone(), "gpt-4o");
    let analyzer = EmotionAnalyzer::new(llm.clone(), "gpt-4o");
    let suggestions = SuggestionEngine::new(llm.clone(), "gpt-4o-mini");
    let summarizer = WeeklySummarizer::new(llm, "gpt-4o-mini");

    // The conversational path surfaces the failure.
    let reply = chat.reply(&[], "I feel lost").await;
    assert!(matches!(reply, Err(SolaceError::ServiceUnavailable)));

    // The analytics paths absorb the same failure into defaults.
    let analysis = analyzer.analyze("I feel lost").await;
    assert_eq!(analysis, fallback::default_emotion_analysis());

    let context = SuggestionContext {
        emotion: Some("anxious".to_string()),
        ..Default::default()
    };
    let list = suggestions.generate(&context).await;
    assert_eq!(list, fallback::default_suggestions(Some("anxious")));

    let summary = summarizer.summarize(&[4.0, 6.0], &[]).await;
    assert_eq!(summary, fallback::default_weekly_summary());
}

#[tokio::test]
async fn analysis_is_always_fully_formed_and_in_range() {
    // A spread of provider behaviors: prose, truncated JSON, wrong types,
    // out-of-range numbers. Every one must yield a complete, range-valid
    // analysis.
    let replies = [
        "I'm sorry, I can't produce JSON today.",
        r#"{"dominantEmotion":"sad""#,
        r#"{"dominantEmotion":"sad","sentimentScore":"very low","stressLevel":2,"emotions":[],"themes":[],"insights":"x","suggestions":["a","b","c"],"crisisSignals":false}"#,
        r#"{"dominantEmotion":"sad","sentimentScore":-7.0,"stressLevel":2,"emotions":[],"themes":[],"insights":"x","suggestions":["a","b","c"],"crisisSignals":false}"#,
        r#"{"dominantEmotion":"sad","sentimentScore":-0.2,"stressLevel":42,"emotions":[],"themes":[],"insights":"x","suggestions":["a","b","c"],"crisisSignals":false}"#,
    ];

    for reply in replies {
        let server = garbage_server(reply).await;
        let llm = LlmProvider::new(Some(&mock_llm_config(&server.uri())));
        let analyzer = EmotionAnalyzer::new(llm, "gpt-4o");

        let analysis = analyzer.analyze("journal entry").await;

        assert!((-1.0..=1.0).contains(&analysis.sentiment_score));
        assert!(analysis.stress_level <= 10);
        assert!(validate_suggestion_list(&analysis.suggestions).is_ok());
    }
}

#[tokio::test]
async fn suggestions_always_number_three_to_five() {
    let replies = [
        "no list here",
        "[]",
        r#"["one", "two"]"#,
        r#"["a", "b", "c", "d", "e", "f", "g", "h"]"#,
        r#"["fine", "", "also fine"]"#,
        r#"["Take a walk", "Call a friend", "Sleep early", "Hydrate"]"#,
    ];

    for reply in replies {
        let server = garbage_server(reply).await;
        let llm = LlmProvider::new(Some(&mock_llm_config(&server.uri())));
        let engine = SuggestionEngine::new(llm, "gpt-4o-mini");

        let list = engine.generate(&SuggestionContext::default()).await;

        assert!(
            validate_suggestion_list(&list).is_ok(),
            "reply {reply:?} must still produce 3-5 non-empty suggestions, got {list:?}"
        );
    }
}

#[tokio::test]
async fn valid_structured_output_is_used_verbatim() {
    let content = r#"{"dominantEmotion":"stressed","sentimentScore":-0.5,"stressLevel":8,"emotions":["pressure"],"themes":["work"],"insights":"Deadlines are weighing on you.","suggestions":["Plan tomorrow tonight","Take one short walk","Tell someone how you feel"],"crisisSignals":false}"#;
    let server = garbage_server(content).await;
    let llm = LlmProvider::new(Some(&mock_llm_config(&server.uri())));
    let analyzer = EmotionAnalyzer::new(llm, "gpt-4o");

    let analysis = analyzer.analyze("entry").await;

    assert_ne!(analysis, fallback::default_emotion_analysis());
    assert_eq!(analysis.stress_level, 8);
    assert_eq!(analysis.themes, vec!["work".to_string()]);
}

#[tokio::test]
async fn weekly_summary_passes_model_prose_through() {
    let server = garbage_server("A gentler week than the last. Keep tending to your sleep.").await;
    let llm = LlmProvider::new(Some(&mock_llm_config(&server.uri())));
    let summarizer = WeeklySummarizer::new(llm, "gpt-4o-mini");

    let summary = summarizer
        .summarize(&[5.0, 6.0, 7.0], &["sleep".to_string()])
        .await;

    assert_eq!(
        summary,
        "A gentler week than the last. Keep tending to your sleep."
    );
}
