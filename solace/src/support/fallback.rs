//! Deterministic safe defaults for every analytics operation.
//!
//! These are returned whenever the model call fails or the reply cannot be
//! validated. Callers never learn which of the two happened; both degrade
//! to the same pre-authored value so mood tracking, journaling insights,
//! and crisis screening always have something usable.

use crate::support::types::{Emotion, EmotionAnalysis};

const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Take a few slow, deep breaths",
    "Step away from screens for ten minutes",
    "Write down one thing you're grateful for today",
];

/// Canonical neutral reading used when emotion analysis cannot be trusted.
pub fn default_emotion_analysis() -> EmotionAnalysis {
    EmotionAnalysis {
        dominant_emotion: Emotion::Neutral,
        sentiment_score: 0.0,
        stress_level: 3,
        emotions: Vec::new(),
        themes: Vec::new(),
        insights: "Thanks for checking in. Keeping a regular journal helps you notice patterns in how you feel.".to_string(),
        suggestions: GENERIC_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        crisis_signals: false,
    }
}

/// Fixed coping strategies keyed by the caller-reported emotion.
///
/// Unknown or absent emotions map to the generic list.
pub fn default_suggestions(emotion: Option<&str>) -> Vec<String> {
    let normalized = emotion.map(|e| e.trim().to_lowercase());
    let tailored: &[&str; 3] = match normalized.as_deref() {
        Some("stressed") => &[
            "Break your next task into one small step and do only that",
            "Try a 4-7-8 breathing cycle for two minutes",
            "Take a short walk without your phone",
        ],
        Some("anxious") => &[
            "Name five things you can see and four you can hear",
            "Write the worry down, then note one thing you can control",
            "Slow your exhale so it lasts longer than your inhale",
        ],
        Some("sad") => &[
            "Reach out to someone you trust, even with a short message",
            "Do one small kind thing for yourself today",
            "Put on music or a show that has comforted you before",
        ],
        Some("angry") => &[
            "Step away from the situation for ten minutes before responding",
            "Release the energy physically: walk fast or stretch",
            "Write what you'd like to say, then set it aside for an hour",
        ],
        _ => &GENERIC_SUGGESTIONS,
    };

    tailored.iter().map(|s| s.to_string()).collect()
}

/// Fixed encouraging sentence used when no weekly summary can be produced.
pub fn default_weekly_summary() -> String {
    "You showed up for yourself this week by tracking how you feel, and that consistency matters more than any single day.".to_string()
}
