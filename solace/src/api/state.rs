use std::sync::Arc;

use crate::config::Config;
use crate::llm::LlmProvider;
use crate::support::{EmotionAnalyzer, SuggestionEngine, TherapyChat, WeeklySummarizer};

/// Shared application state handed to every handler.
///
/// The provider and the four operations are constructed once at startup and
/// only cloned afterwards; nothing here is mutated after initialization.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmProvider,
    pub chat: TherapyChat,
    pub analyzer: EmotionAnalyzer,
    pub suggestions: SuggestionEngine,
    pub summarizer: WeeklySummarizer,
}

impl AppState {
    pub fn new(config: Config, llm: LlmProvider) -> Self {
        let config = Arc::new(config);

        // Model tiering: the chat model serves the quality-sensitive paths,
        // the insight model the latency-sensitive ones.
        let (chat_model, insight_model) = match &config.llm {
            Some(llm_config) => (
                llm_config.chat_model_name(),
                llm_config.insight_model_name(),
            ),
            None => (String::new(), String::new()),
        };

        let chat = TherapyChat::new(llm.clone(), chat_model.clone());
        let analyzer = EmotionAnalyzer::new(llm.clone(), chat_model);
        let suggestions = SuggestionEngine::new(llm.clone(), insight_model.clone());
        let summarizer = WeeklySummarizer::new(llm.clone(), insight_model);

        Self {
            config,
            llm,
            chat,
            analyzer,
            suggestions,
            summarizer,
        }
    }
}
