pub mod conversions;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod validation;

use crate::{
    openapi::openapi_for_prefix,
    routes::{api::AppState, chat_completions, embeddings, health_check},
};
use axum::{
    http::{header, HeaderValue},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use config::{ApiConfig, CorsConfig, MockConfig};
use services::{
    Clock, CompletionServiceImpl, EmbeddingServiceImpl, IdGenerator, SystemClock, UuidGenerator,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Initialize the synthesizing services with the process clock and UUID identifiers
pub fn init_domain_services(config: &MockConfig) -> AppState {
    init_domain_services_with_sources(config, Arc::new(SystemClock), Arc::new(UuidGenerator))
}

/// Initialize the synthesizing services with injected time and identifier sources
pub fn init_domain_services_with_sources(
    config: &MockConfig,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
) -> AppState {
    let completion_service = Arc::new(CompletionServiceImpl::new(
        clock,
        ids,
        config.chat_model.clone(),
        config.chat_content.clone(),
    ));
    let embedding_service = Arc::new(EmbeddingServiceImpl::new(
        config.embedding_dimensions,
        config.embedding_value,
    ));

    AppState {
        completion_service,
        embedding_service,
    }
}

/// Build the complete application router
pub fn build_app(app_state: AppState, config: &ApiConfig) -> Router {
    let prefix = config.mock.normalized_prefix();

    let emulation_routes = build_emulation_routes(app_state, &prefix);
    let openapi_routes = build_openapi_routes(&prefix);

    let app = Router::new()
        .merge(emulation_routes)
        .merge(openapi_routes)
        .layer(TraceLayer::new_for_http());

    match build_cors_layer(&config.cors) {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// Build the emulated provider routes under `prefix`.
///
/// The health check answers both `{prefix}` and `{prefix}/`.
pub fn build_emulation_routes(app_state: AppState, prefix: &str) -> Router {
    let mut router = Router::new()
        .route(&format!("{prefix}/"), get(health_check))
        .route(&format!("{prefix}/chat/completions"), post(chat_completions))
        .route(&format!("{prefix}/embeddings"), post(embeddings));

    if !prefix.is_empty() {
        router = router.route(prefix, get(health_check));
    }

    router.with_state(app_state)
}

/// Permissive cross-origin policy for local and test usage.
///
/// Origins, methods and headers are mirrored from the request so that
/// credentialed requests stay valid; a literal `*` may not be combined with
/// credentials.
pub fn build_cors_layer(config: &CorsConfig) -> Option<CorsLayer> {
    if !config.enabled {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true),
    )
}

/// Build OpenAPI documentation routes
pub fn build_openapi_routes(prefix: &str) -> Router {
    let doc = Arc::new(openapi_for_prefix(prefix));

    Router::new().route("/docs", get(swagger_ui_handler)).route(
        "/openapi.json",
        get(move || {
            let doc = doc.clone();
            async move { Json(doc.as_ref().clone()) }
        }),
    )
}

/// Serve Swagger UI HTML page
async fn swagger_ui_handler() -> impl IntoResponse {
    (
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        )],
        Html(SWAGGER_UI_HTML),
    )
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Mock Inference API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5.10.5/swagger-ui.css" />
    <style>
        body {
            margin: 0;
            background: #fafafa;
        }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5.10.5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5.10.5/swagger-ui-standalone-preset.js"></script>
    <script>
    window.onload = function() {
        SwaggerUIBundle({
            url: '/openapi.json',
            dom_id: '#swagger-ui',
            deepLinking: true,
            presets: [
                SwaggerUIBundle.presets.apis,
                SwaggerUIStandalonePreset
            ],
            plugins: [
                SwaggerUIBundle.plugins.DownloadUrl
            ],
            layout: "StandaloneLayout",
            docExpansion: 'list'
        });
    };
    </script>
</body>
</html>"#;

/// Bind the configured address and serve until Ctrl+C or SIGTERM
pub async fn run_server(config: ApiConfig) -> anyhow::Result<()> {
    let app_state = init_domain_services(&config.mock);
    let app = build_app(app_state, &config);

    let bind_address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    let prefix = config.mock.normalized_prefix();
    tracing::info!(address = %bind_address, "Server started successfully");
    tracing::info!("API Endpoints:");
    tracing::info!("  - GET {prefix}/ (Health)");
    tracing::info!("  - POST {prefix}/chat/completions (Chat Completions)");
    tracing::info!("  - POST {prefix}/embeddings (Embeddings)");
    tracing::info!("  - GET /docs (Swagger UI)");
    tracing::info!(
        "CORS: {}",
        if config.cors.enabled { "ENABLED" } else { "DISABLED" }
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down gracefully"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down gracefully"),
    }
}
