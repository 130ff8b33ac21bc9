use axum::{middleware, routing::get, routing::post, Router};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let chat = Router::new().route("/reply", post(handlers::chat::create_reply));

    let insights = Router::new()
        .route("/emotion", post(handlers::insights::analyze_emotion))
        .route("/suggestions", post(handlers::insights::generate_suggestions))
        .route("/weekly-summary", post(handlers::insights::weekly_summary));

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .nest("/chat", chat)
        .nest("/insights", insights)
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
