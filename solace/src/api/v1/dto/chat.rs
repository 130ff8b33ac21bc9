//! Chat request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::prompts::Role;
use crate::support::types::ConversationTurn;

/// Request body for `POST /v1/chat/reply`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyRequest {
    /// Conversation so far, oldest first. Only the most recent turns are
    /// submitted to the model.
    #[serde(default)]
    pub history: Vec<ConversationTurnDto>,
    /// The latest user message to reply to.
    pub message: String,
    /// Session ID for grouping related exchanges.
    pub session_id: Option<String>,
}

/// A single turn within the conversation history.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurnDto {
    /// Turn role: `"user"`, `"assistant"`, or `"system"`. Unknown values
    /// are treated as `"user"`.
    pub role: String,
    /// Turn content text.
    pub content: String,
    /// When this turn was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<ConversationTurnDto> for ConversationTurn {
    fn from(turn: ConversationTurnDto) -> Self {
        let role = match turn.role.to_lowercase().as_str() {
            "system" => Role::System,
            "assistant" => Role::Assistant,
            _ => Role::User,
        };
        Self {
            role,
            content: turn.content,
        }
    }
}

/// Response for `POST /v1/chat/reply`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReplyResponse {
    /// The therapeutic reply.
    pub reply: String,
    /// Session ID (generated if not provided in request).
    pub session_id: String,
}
