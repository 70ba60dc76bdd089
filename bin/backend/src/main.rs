use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::HeaderValue;
use chatterbox_backend::{ResponseGenerator, SessionManager};
use chatterbox_core::GeminiModel;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod endpoint;
use endpoint::create_router;

// Environment variables
static BACKEND_HOST: std::sync::LazyLock<String> = std::sync::LazyLock::new(|| {
    std::env::var("BACKEND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
});
static BACKEND_PORT: std::sync::LazyLock<String> = std::sync::LazyLock::new(|| {
    std::env::var("BACKEND_PORT").unwrap_or_else(|_| "8080".to_string())
});
static FRONTEND_ORIGIN: std::sync::LazyLock<String> = std::sync::LazyLock::new(|| {
    std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string())
});

#[derive(Parser)]
#[command(name = "backend")]
#[command(about = "Web backend for the Chatterbox chat service")]
struct Cli {
    /// Seconds of inactivity before a session is evicted
    #[arg(long, default_value_t = 1800)]
    session_ttl_secs: u64,

    /// Seconds between idle-session sweeps
    #[arg(long, default_value_t = 300)]
    cleanup_interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Fails fast when GOOGLE_API_KEY is missing
    let model = GeminiModel::new().map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let session_manager = Arc::new(SessionManager::with_timeouts(
        Duration::from_secs(cli.session_ttl_secs),
        Duration::from_secs(cli.cleanup_interval_secs),
    ));

    // Start cleanup task
    Arc::clone(&session_manager).start_cleanup_task();

    let generator = Arc::new(ResponseGenerator::new(Arc::new(model), session_manager));

    // Build router
    let app = create_router(generator).layer(build_cors_layer());

    let host = &*BACKEND_HOST;
    let port = &*BACKEND_PORT;
    let bind_addr = format!("{}:{}", host, port);

    println!("🚀 Backend server starting on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors_layer() -> CorsLayer {
    let origin = FRONTEND_ORIGIN
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
