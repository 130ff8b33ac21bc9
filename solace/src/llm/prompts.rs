//! Prompt templates for the four AI tasks.
//!
//! Each builder is a pure function from caller data to a [`PromptSpec`]:
//! no I/O, no clock, no randomness. Caller-supplied text is always placed
//! in a delimited data section after the instructions so it cannot alter
//! the schema being requested.

use serde::{Deserialize, Serialize};

use crate::support::types::{ConversationTurn, SuggestionContext};

/// Maximum number of prior conversation turns submitted to the model.
pub const HISTORY_WINDOW: usize = 10;

/// Message role on the completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// A single role-tagged message within a completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A fully specified completion request, ready for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

const THERAPY_PERSONA: &str = "You are a warm, compassionate mental-health support companion. \
Listen carefully, validate the person's feelings, and respond with empathy in 2-4 sentences. \
Never diagnose, never prescribe, and never dismiss what they share. \
If they mention self-harm or suicide, gently encourage them to reach out to a crisis line \
or a mental-health professional right away.";

/// Build the conversational therapy-reply prompt.
///
/// The system persona is followed by the most recent [`HISTORY_WINDOW`]
/// turns of the dialogue and the latest user message.
pub fn therapy_reply(model: &str, history: &[ConversationTurn], latest_message: &str) -> PromptSpec {
    let mut messages = Vec::with_capacity(history.len().min(HISTORY_WINDOW) + 2);
    messages.push(ChatMessage::system(THERAPY_PERSONA));

    let start = history.len().saturating_sub(HISTORY_WINDOW);
    for turn in &history[start..] {
        messages.push(ChatMessage {
            role: turn.role,
            content: turn.content.clone(),
        });
    }

    messages.push(ChatMessage::user(latest_message));

    PromptSpec {
        model: model.to_string(),
        messages,
        temperature: 0.7,
        max_tokens: 300,
        top_p: 0.9,
    }
}

/// Build the single-shot emotion-analysis prompt demanding a strict JSON object.
pub fn emotion_analysis(model: &str, text: &str) -> PromptSpec {
    let instruction = format!(
        r#"Analyze the emotional content of the journal entry below.

Respond with valid JSON only, a single object with exactly these fields:
- dominantEmotion: one of "happy", "sad", "anxious", "stressed", "angry", "calm", "excited", "frustrated", "lonely", "neutral"
- sentimentScore: a number from -1.0 (very negative) to 1.0 (very positive)
- stressLevel: an integer from 0 (relaxed) to 10 (severe stress)
- emotions: an array of emotion words detected in the entry
- themes: an array of recurring life themes (e.g. "work", "sleep", "relationships")
- insights: one or two supportive sentences reflecting what the entry expresses
- suggestions: an array of 3 to 5 short, concrete coping suggestions
- crisisSignals: true only if the entry suggests self-harm or suicide risk, otherwise false

Entry:
{text}

Respond with valid JSON only. Example format:
{{
  "dominantEmotion": "anxious",
  "sentimentScore": -0.4,
  "stressLevel": 6,
  "emotions": ["worry", "overwhelm"],
  "themes": ["work", "sleep"],
  "insights": "You seem stretched thin by deadlines and short nights.",
  "suggestions": ["Take a 10-minute walk", "Write down tomorrow's top task", "Try a 4-7-8 breathing cycle"],
  "crisisSignals": false
}}"#
    );

    PromptSpec {
        model: model.to_string(),
        messages: vec![ChatMessage::user(instruction)],
        temperature: 0.2,
        max_tokens: 500,
        top_p: 0.9,
    }
}

/// Build the single-shot coping-suggestion prompt demanding a strict JSON array.
pub fn coping_suggestions(model: &str, context: &SuggestionContext) -> PromptSpec {
    let emotion = context.emotion.as_deref().unwrap_or("unspecified");
    let score = context
        .score
        .map(|s| s.to_string())
        .unwrap_or_else(|| "unspecified".to_string());
    let triggers = context
        .triggers
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| t.join(", "))
        .unwrap_or_else(|| "unspecified".to_string());
    let notes = context.notes.as_deref().unwrap_or("none");

    let instruction = format!(
        r#"Suggest personalized coping strategies for someone in the emotional state described below.
Each suggestion must be a single short sentence the person can act on today.

Current state:
- Emotion: {emotion}
- Mood score: {score}
- Triggers: {triggers}
- Notes: {notes}

Respond with valid JSON only: an array of 3 to 5 suggestion strings, nothing else.
Example format:
["Step outside for ten minutes of fresh air", "Message a friend you trust", "Put your phone away an hour before bed"]"#
    );

    PromptSpec {
        model: model.to_string(),
        messages: vec![ChatMessage::user(instruction)],
        temperature: 0.6,
        max_tokens: 250,
        top_p: 0.9,
    }
}

/// Build the single-shot weekly-summary prompt demanding bounded prose.
pub fn weekly_summary(model: &str, mood_scores: &[f32], journal_themes: &[String]) -> PromptSpec {
    let scores = mood_scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let themes = if journal_themes.is_empty() {
        "none recorded".to_string()
    } else {
        journal_themes.join(", ")
    };

    let instruction = format!(
        r#"Write a supportive weekly reflection for someone tracking their mental wellbeing.
Acknowledge how the week went, highlight one positive pattern if there is one,
and close with gentle encouragement. Keep it to roughly 150 words of plain prose,
no lists and no headings.

This week's data:
- Daily mood scores (1-10, oldest first): {scores}
- Journal themes: {themes}

Respond with only the reflection, no preamble."#
    );

    PromptSpec {
        model: model.to_string(),
        messages: vec![ChatMessage::user(instruction)],
        temperature: 0.6,
        max_tokens: 220,
        top_p: 0.9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<ConversationTurn> {
        (0..n)
            .map(|i| ConversationTurn {
                role: if i % 2 == 0 { Role::User } else { Role::Assistant },
                content: format!("turn {i}"),
            })
            .collect()
    }

    #[test]
    fn test_therapy_reply_has_persona_and_latest_message() {
        let spec = therapy_reply("gpt-4o", &[], "I had a rough day");

        assert_eq!(spec.model, "gpt-4o");
        assert_eq!(spec.messages.len(), 2);
        assert_eq!(spec.messages[0].role, Role::System);
        assert!(spec.messages[0].content.contains("compassionate"));
        assert_eq!(spec.messages[1].role, Role::User);
        assert_eq!(spec.messages[1].content, "I had a rough day");
    }

    #[test]
    fn test_therapy_reply_truncates_history_to_window() {
        let history = turns(15);
        let spec = therapy_reply("gpt-4o", &history, "latest");

        // persona + 10 most recent turns + latest message
        assert_eq!(spec.messages.len(), 1 + HISTORY_WINDOW + 1);
        assert_eq!(spec.messages[1].content, "turn 5");
        assert_eq!(spec.messages[HISTORY_WINDOW].content, "turn 14");
        assert_eq!(spec.messages.last().unwrap().content, "latest");
    }

    #[test]
    fn test_therapy_reply_keeps_short_history_intact() {
        let history = turns(4);
        let spec = therapy_reply("gpt-4o", &history, "latest");

        assert_eq!(spec.messages.len(), 1 + 4 + 1);
        assert_eq!(spec.messages[1].content, "turn 0");
    }

    #[test]
    fn test_therapy_reply_preserves_turn_roles() {
        let history = turns(2);
        let spec = therapy_reply("gpt-4o", &history, "latest");

        assert_eq!(spec.messages[1].role, Role::User);
        assert_eq!(spec.messages[2].role, Role::Assistant);
    }

    #[test]
    fn test_emotion_analysis_prompt_format() {
        let spec = emotion_analysis("gpt-4o", "I can't sleep before deadlines");

        assert_eq!(spec.messages.len(), 1);
        let prompt = &spec.messages[0].content;

        assert!(prompt.contains("I can't sleep before deadlines"));
        assert!(prompt.contains("valid JSON only"));
        assert!(prompt.contains("dominantEmotion"));
        assert!(prompt.contains("sentimentScore"));
        assert!(prompt.contains("stressLevel"));
        assert!(prompt.contains("crisisSignals"));
        assert!(prompt.contains("Example format"));
    }

    #[test]
    fn test_emotion_analysis_names_all_ten_emotions() {
        let spec = emotion_analysis("gpt-4o", "entry");
        let prompt = &spec.messages[0].content;

        for emotion in [
            "happy",
            "sad",
            "anxious",
            "stressed",
            "angry",
            "calm",
            "excited",
            "frustrated",
            "lonely",
            "neutral",
        ] {
            assert!(prompt.contains(emotion), "prompt should name '{emotion}'");
        }
    }

    #[test]
    fn test_emotion_analysis_places_entry_after_instructions() {
        let spec = emotion_analysis("gpt-4o", "my entry text");
        let prompt = &spec.messages[0].content;

        let entry_pos = prompt.find("my entry text").expect("entry present");
        let schema_pos = prompt.find("dominantEmotion").expect("schema present");
        assert!(
            schema_pos < entry_pos,
            "entry text must land in the data section, after the schema"
        );
    }

    #[test]
    fn test_coping_suggestions_prompt_includes_context() {
        let context = SuggestionContext {
            emotion: Some("anxious".to_string()),
            score: Some(3.0),
            triggers: Some(vec!["work".to_string(), "exams".to_string()]),
            notes: Some("finals next week".to_string()),
        };
        let spec = coping_suggestions("gpt-4o-mini", &context);
        let prompt = &spec.messages[0].content;

        assert!(prompt.contains("anxious"));
        assert!(prompt.contains('3'));
        assert!(prompt.contains("work, exams"));
        assert!(prompt.contains("finals next week"));
        assert!(prompt.contains("array of 3 to 5"));
    }

    #[test]
    fn test_coping_suggestions_prompt_handles_empty_context() {
        let spec = coping_suggestions("gpt-4o-mini", &SuggestionContext::default());
        let prompt = &spec.messages[0].content;

        assert!(prompt.contains("unspecified"));
        assert!(prompt.contains("valid JSON only"));
    }

    #[test]
    fn test_weekly_summary_prompt_format() {
        let scores = vec![4.0, 5.5, 7.0];
        let themes = vec!["sleep".to_string(), "exercise".to_string()];
        let spec = weekly_summary("gpt-4o-mini", &scores, &themes);
        let prompt = &spec.messages[0].content;

        assert!(prompt.contains("4, 5.5, 7"));
        assert!(prompt.contains("sleep, exercise"));
        assert!(prompt.contains("150 words"));
        assert!(prompt.contains("no preamble"));
    }

    #[test]
    fn test_weekly_summary_prompt_with_no_themes() {
        let spec = weekly_summary("gpt-4o-mini", &[6.0], &[]);
        assert!(spec.messages[0].content.contains("none recorded"));
    }

    #[test]
    fn test_model_tiering_is_caller_controlled() {
        let chat = therapy_reply("gpt-4o", &[], "hi");
        let insight = weekly_summary("gpt-4o-mini", &[5.0], &[]);
        assert_eq!(chat.model, "gpt-4o");
        assert_eq!(insight.model, "gpt-4o-mini");
    }
}
