//! v1 Insight handlers: emotion analysis, coping suggestions, and weekly
//! summaries.
//!
//! None of these operations fail for model-related reasons; when the AI
//! service is down or returns garbage the orchestration layer substitutes
//! its deterministic defaults, so every response here is a 200 with a
//! fully-formed value.

use axum::extract::State;

use crate::api::v1::dto::insights::{
    EmotionAnalysisRequest, EmotionAnalysisResponse, SuggestionsRequest, SuggestionsResponse,
    WeeklySummaryRequest, WeeklySummaryResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/insights/emotion`
#[utoipa::path(
    post,
    path = "/api/v1/insights/emotion",
    tag = "insights",
    request_body = EmotionAnalysisRequest,
    responses(
        (status = 200, description = "Structured emotion analysis", body = EmotionAnalysisResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn analyze_emotion(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<EmotionAnalysisRequest>,
) -> ApiResponse<EmotionAnalysisResponse> {
    if req.text.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Text cannot be empty");
    }

    let analysis = state.analyzer.analyze(&req.text).await;
    ApiResponse::success(analysis)
}

/// `POST /api/v1/insights/suggestions`
#[utoipa::path(
    post,
    path = "/api/v1/insights/suggestions",
    tag = "insights",
    request_body = SuggestionsRequest,
    responses(
        (status = 200, description = "3-5 coping suggestions", body = SuggestionsResponse),
    )
)]
pub async fn generate_suggestions(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<SuggestionsRequest>,
) -> ApiResponse<SuggestionsResponse> {
    let suggestions = state.suggestions.generate(&req.into()).await;
    ApiResponse::success(SuggestionsResponse { suggestions })
}

/// `POST /api/v1/insights/weekly-summary`
#[utoipa::path(
    post,
    path = "/api/v1/insights/weekly-summary",
    tag = "insights",
    request_body = WeeklySummaryRequest,
    responses(
        (status = 200, description = "Supportive weekly reflection", body = WeeklySummaryResponse),
    )
)]
pub async fn weekly_summary(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<WeeklySummaryRequest>,
) -> ApiResponse<WeeklySummaryResponse> {
    let summary = state
        .summarizer
        .summarize(&req.mood_scores, &req.journal_themes)
        .await;
    ApiResponse::success(WeeklySummaryResponse { summary })
}
