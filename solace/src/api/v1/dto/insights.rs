//! Insight request/response DTOs for the v1 API: emotion analysis,
//! coping suggestions, and weekly summaries.

use serde::{Deserialize, Serialize};

use crate::support::types::{EmotionAnalysis, SuggestionContext};

/// Request body for `POST /v1/insights/emotion`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysisRequest {
    /// The journal entry or message text to analyze.
    pub text: String,
}

/// Request body for `POST /v1/insights/suggestions`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsRequest {
    /// Current emotion label, if known.
    pub emotion: Option<String>,
    /// Current mood score, if tracked.
    pub score: Option<f32>,
    /// Known triggers for the current state.
    pub triggers: Option<Vec<String>>,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl From<SuggestionsRequest> for SuggestionContext {
    fn from(req: SuggestionsRequest) -> Self {
        Self {
            emotion: req.emotion,
            score: req.score,
            triggers: req.triggers,
            notes: req.notes,
        }
    }
}

/// Response for `POST /v1/insights/suggestions`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    /// 3-5 coping suggestions, never empty.
    pub suggestions: Vec<String>,
}

/// Request body for `POST /v1/insights/weekly-summary`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummaryRequest {
    /// Daily mood scores for the week, oldest first.
    #[serde(default)]
    pub mood_scores: Vec<f32>,
    /// Themes surfaced by journaling this week.
    #[serde(default)]
    pub journal_themes: Vec<String>,
}

/// Response for `POST /v1/insights/weekly-summary`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummaryResponse {
    /// Supportive weekly reflection.
    pub summary: String,
}

/// Response for `POST /v1/insights/emotion` — the full analysis value.
pub type EmotionAnalysisResponse = EmotionAnalysis;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_request_deserializes() {
        let req: EmotionAnalysisRequest =
            serde_json::from_str(r#"{"text": "rough week"}"#).expect("deserialize");
        assert_eq!(req.text, "rough week");
    }

    #[test]
    fn suggestions_request_all_fields_optional() {
        let req: SuggestionsRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.emotion.is_none());
        assert!(req.score.is_none());
        assert!(req.triggers.is_none());
        assert!(req.notes.is_none());
    }

    #[test]
    fn suggestions_request_converts_to_context() {
        let req: SuggestionsRequest = serde_json::from_str(
            r#"{"emotion": "anxious", "score": 3.5, "triggers": ["work"], "notes": "exams"}"#,
        )
        .expect("deserialize");

        let context: SuggestionContext = req.into();
        assert_eq!(context.emotion.as_deref(), Some("anxious"));
        assert_eq!(context.score, Some(3.5));
        assert_eq!(context.triggers, Some(vec!["work".to_string()]));
        assert_eq!(context.notes.as_deref(), Some("exams"));
    }

    #[test]
    fn weekly_summary_request_accepts_camel_case() {
        let req: WeeklySummaryRequest = serde_json::from_str(
            r#"{"moodScores": [4.0, 6.5], "journalThemes": ["sleep"]}"#,
        )
        .expect("deserialize");

        assert_eq!(req.mood_scores, vec![4.0, 6.5]);
        assert_eq!(req.journal_themes, vec!["sleep".to_string()]);
    }

    #[test]
    fn weekly_summary_request_defaults_to_empty() {
        let req: WeeklySummaryRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.mood_scores.is_empty());
        assert!(req.journal_themes.is_empty());
    }
}
