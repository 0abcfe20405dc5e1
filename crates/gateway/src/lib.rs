//! HTTP API gateway for Vitrine.
//!
//! Exposes the full REST surface under `/api`: auth, portfolio, tasks,
//! AI memory/chat/suggestions, articles, gallery, notifications, and
//! stats. Built on Axum.
//!
//! Layers applied:
//! - CORS with configurable origins
//! - Request body size limit (1 MB — gallery uploads carry base64 payloads)
//! - HTTP trace logging

use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

use vitrine_assistant::{AssistantOrchestrator, SuggestionEngine};
use vitrine_auth::{AuthGate, StaticCredentials};
use vitrine_config::AppConfig;
use vitrine_core::store::DocumentStore;
use vitrine_store::{InMemoryStore, MemoryRepository, TaskRepository, seed_defaults};

pub mod api;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub auth: AuthGate,
    pub store: Arc<dyn DocumentStore>,
    pub tasks: TaskRepository,
    pub memories: MemoryRepository,
    pub suggestions: SuggestionEngine,
    pub orchestrator: AssistantOrchestrator,
    pub start_time: chrono::DateTime<chrono::Utc>,
}

pub type SharedState = Arc<GatewayState>;

/// Build the full router: the `/api` surface plus the layer stack.
pub fn build_router(state: SharedState, cors_origins: &[String]) -> Router {
    Router::new()
        .nest("/api", api::api_router(state))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors_layer(cors_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the shared state from configuration: store (seeded), provider,
/// repositories, auth gate, and orchestrator.
pub async fn build_state(config: &AppConfig) -> vitrine_core::Result<SharedState> {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryStore::new());
    if config.store.seed_defaults {
        seed_defaults(&store).await?;
    }

    let provider = vitrine_providers::build_from_config(&config.assistant);
    let tasks = TaskRepository::new(store.clone());
    let memories = MemoryRepository::new(store.clone());
    let orchestrator = AssistantOrchestrator::new(
        provider,
        tasks.clone(),
        memories.clone(),
        config.assistant.model.clone(),
        config.assistant.temperature,
        config.assistant.max_tokens,
    );

    Ok(Arc::new(GatewayState {
        auth: AuthGate::new(StaticCredentials::from(&config.admin)),
        store,
        tasks,
        memories,
        suggestions: SuggestionEngine::new(),
        orchestrator,
        start_time: chrono::Utc::now(),
    }))
}

/// Start the gateway HTTP server.
pub async fn start(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let state = build_state(&config).await?;
    let app = build_router(state, &config.gateway.cors_origins);

    info!(addr = %addr, "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
