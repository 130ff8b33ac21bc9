use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Solace API",
        version = "1.0.0",
        description = "AI orchestration backend for a mental-health support app: therapeutic chat, emotion analysis, coping suggestions, and weekly summaries.",
    ),
    paths(
        handlers::health::health_check,
        handlers::chat::create_reply,
        handlers::insights::analyze_emotion,
        handlers::insights::generate_suggestions,
        handlers::insights::weekly_summary,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Chat
        dto::chat::ChatReplyRequest,
        dto::chat::ConversationTurnDto,
        dto::chat::ChatReplyResponse,
        // Insights
        dto::insights::EmotionAnalysisRequest,
        dto::insights::SuggestionsRequest,
        dto::insights::SuggestionsResponse,
        dto::insights::WeeklySummaryRequest,
        dto::insights::WeeklySummaryResponse,
        crate::support::types::EmotionAnalysis,
        crate::support::types::SuggestionContext,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "chat", description = "Therapeutic conversation"),
        (name = "insights", description = "Emotion analysis, coping suggestions, and weekly summaries"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
