//! HTTP server implementation

use std::any::Any as PanicPayload;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::Response;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing::info;

use crate::api::handlers::error_response;
use crate::api::handlers::AppState;
use crate::api::handlers::SERVER_CRASHED;
use crate::api::routes;
use crate::api::session::TopicMemory;
use crate::config::AppConfig;
use crate::rag::RagService;
use crate::Result;

fn handle_panic(panic: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Request handler panicked: {}", detail);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, SERVER_CRASHED)
}

/// Build the application router with middleware
pub fn build_app(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .nest("/api", routes::api_routes(state))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if enable_cors {
        info!("✅ CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// Start the API server
pub async fn serve_api(config: &AppConfig) -> Result<()> {
    info!("🚀 Starting VIA chat server...");

    let rag_service = Arc::new(RagService::new(config)?);
    let sessions = Arc::new(TopicMemory::from_config(&config.session));
    let cleanup = sessions
        .clone()
        .spawn_cleanup(Duration::from_secs(config.session.cleanup_interval_secs.max(1)));

    let app = build_app(
        AppState::new(rag_service, sessions),
        config.server.enable_cors,
    );

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server listening on http://{}", addr);
    info!("Available endpoints:");
    info!("  GET  /api/health - Health check");
    info!("  POST /api/chat   - Ask a question");

    let served = axum::serve(listener, app).await;
    cleanup.abort();
    served?;

    Ok(())
}
