use std::{net::SocketAddr, sync::Arc};

use {
    axum::{
        Router,
        extract::State,
        response::{IntoResponse, Json},
        routing::get,
    },
    spindle_config::SpindleConfig,
    tokio::net::TcpListener,
    tower_http::cors::{Any, CorsLayer},
    tracing::info,
};

use crate::{
    graphql_routes::{graphql_get_handler, graphql_handler},
    state::GatewayState,
};

// ── Router ───────────────────────────────────────────────────────────────────

pub fn build_gateway_app(state: Arc<GatewayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/graphql", get(graphql_get_handler).post(graphql_handler))
        .layer(cors)
        .with_state(state)
}

// ── Server startup ───────────────────────────────────────────────────────────

/// Bind the configured address and serve until the process is stopped.
pub async fn start_gateway(config: &SpindleConfig) -> anyhow::Result<()> {
    let state = GatewayState::from_config(config)?;
    let app = build_gateway_app(state);

    let listener = TcpListener::bind(config.server.address()).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!(
        %addr,
        backend = %config.backend.base_url,
        graphiql = config.graphql.graphiql,
        "spindle gateway listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "version": state.version,
    }))
}
