//! v1 Chat handlers.

use axum::extract::State;
use nanoid::nanoid;

use crate::api::v1::dto::chat::{ChatReplyRequest, ChatReplyResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::support::types::ConversationTurn;

/// `POST /api/v1/chat/reply`
///
/// Produces a therapeutic reply to the latest message. This is the one
/// operation that surfaces model failures to the caller: when the AI
/// service cannot be reached the response is a 503 envelope with a fixed
/// user-safe message, never a fabricated reply.
#[utoipa::path(
    post,
    path = "/api/v1/chat/reply",
    tag = "chat",
    request_body = ChatReplyRequest,
    responses(
        (status = 200, description = "Therapeutic reply", body = ChatReplyResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 503, description = "AI service unavailable", body = ApiError),
    )
)]
pub async fn create_reply(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<ChatReplyRequest>,
) -> ApiResponse<ChatReplyResponse> {
    if req.message.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Message cannot be empty");
    }

    let session_id = req.session_id.clone().unwrap_or_else(|| nanoid!());

    let history: Vec<ConversationTurn> = req.history.into_iter().map(Into::into).collect();

    match state.chat.reply(&history, &req.message).await {
        Ok(reply) => ApiResponse::success(ChatReplyResponse { reply, session_id }),
        Err(e) => e.into(),
    }
}
