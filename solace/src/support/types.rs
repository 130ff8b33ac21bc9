use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SolaceError};
use crate::llm::prompts::Role;

/// One turn of the therapeutic dialogue. Owned by the chat feature; the
/// orchestration layer only reads a bounded suffix of the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// The ten emotions the analysis model is allowed to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Anxious,
    Stressed,
    Angry,
    Calm,
    Excited,
    Frustrated,
    Lonely,
    Neutral,
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Happy => write!(f, "happy"),
            Self::Sad => write!(f, "sad"),
            Self::Anxious => write!(f, "anxious"),
            Self::Stressed => write!(f, "stressed"),
            Self::Angry => write!(f, "angry"),
            Self::Calm => write!(f, "calm"),
            Self::Excited => write!(f, "excited"),
            Self::Frustrated => write!(f, "frustrated"),
            Self::Lonely => write!(f, "lonely"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Structured emotional reading of a piece of user text.
///
/// Every field is required: a value of this type is either fully populated
/// and range-valid, or it is the canonical default from
/// [`crate::support::fallback::default_emotion_analysis`]. Nothing in
/// between ever reaches a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysis {
    /// Strongest emotion expressed in the text.
    #[schema(value_type = String)]
    pub dominant_emotion: Emotion,
    /// Overall sentiment, -1.0 (very negative) to 1.0 (very positive).
    pub sentiment_score: f32,
    /// Stress estimate, integer 0 (relaxed) to 10 (severe).
    pub stress_level: u8,
    /// All emotion words detected.
    pub emotions: Vec<String>,
    /// Recurring life themes detected.
    pub themes: Vec<String>,
    /// Supportive reflection on the text.
    pub insights: String,
    /// 3-5 concrete coping suggestions.
    pub suggestions: Vec<String>,
    /// Whether the text suggests self-harm or suicide risk.
    pub crisis_signals: bool,
}

impl EmotionAnalysis {
    /// Decode and validate a model-produced JSON object.
    ///
    /// Fails if any required key is missing, any type is wrong, or any value
    /// is out of range. A failure means the caller uses the canonical
    /// default; this function never hands back a partial reading.
    pub fn from_value(value: Value) -> Result<Self> {
        let analysis: EmotionAnalysis = serde_json::from_value(value)
            .map_err(|error| SolaceError::Extraction(format!("analysis decode: {error}")))?;
        analysis.validate()?;
        Ok(analysis)
    }

    fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.sentiment_score) {
            return Err(SolaceError::Extraction(format!(
                "sentimentScore {} out of [-1, 1]",
                self.sentiment_score
            )));
        }
        if self.stress_level > 10 {
            return Err(SolaceError::Extraction(format!(
                "stressLevel {} out of [0, 10]",
                self.stress_level
            )));
        }
        validate_suggestion_list(&self.suggestions)?;
        Ok(())
    }
}

/// Caller-supplied context for suggestion generation. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionContext {
    /// Current emotion label, if known (e.g. `"anxious"`).
    pub emotion: Option<String>,
    /// Current mood score, if tracked.
    pub score: Option<f32>,
    /// Known triggers for the current state.
    pub triggers: Option<Vec<String>>,
    /// Free-form notes from the caller.
    pub notes: Option<String>,
}

/// Check the public suggestion-list invariant: 3 to 5 non-empty strings.
pub fn validate_suggestion_list(suggestions: &[String]) -> Result<()> {
    if !(3..=5).contains(&suggestions.len()) {
        return Err(SolaceError::Extraction(format!(
            "{} suggestions, expected 3 to 5",
            suggestions.len()
        )));
    }
    if suggestions.iter().any(|s| s.trim().is_empty()) {
        return Err(SolaceError::Extraction(
            "empty suggestion string".to_string(),
        ));
    }
    Ok(())
}
