pub mod analysis;
pub mod chat;
pub mod fallback;
pub mod suggestions;
pub mod summary;
pub mod types;

pub use analysis::EmotionAnalyzer;
pub use chat::TherapyChat;
pub use suggestions::SuggestionEngine;
pub use summary::WeeklySummarizer;
