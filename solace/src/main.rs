use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solace::api::{create_router, AppState};
use solace::config::Config;
use solace::llm::LlmProvider;

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "AI orchestration backend for a mental-health support app")]
struct Args {
    /// Print the resolved configuration and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solace=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if args.check_config {
        println!("server: {}:{}", config.server.host, config.server.port);
        println!("api keys configured: {}", !config.server.api_keys.is_empty());
        match &config.llm {
            Some(llm) => println!("llm: chat={}, insight={}", llm.chat_model, llm.insight_model),
            None => println!("llm: not configured"),
        }
        return Ok(());
    }

    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "SOLACE_API_KEYS is not set — chat and insight endpoints are locked. Set SOLACE_API_KEYS to enable access."
        );
    }

    if let Some(llm_config) = &config.llm {
        tracing::info!(
            "Initializing LLM provider: chat={}, insight={}...",
            llm_config.chat_model,
            llm_config.insight_model
        );
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!(
            "LLM unavailable - chat will return 503 and insights will serve fallback values"
        );
    }

    let state = AppState::new(config.clone(), llm);

    let cancel_token = CancellationToken::new();

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Solace starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
    cancel_token.cancel();
}
