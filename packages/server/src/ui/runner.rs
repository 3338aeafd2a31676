//! Router construction and server lifecycle.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    infrastructure::{auth::JwtIdentityVerifier, repository::InMemoryMessageRepository},
};

use super::{
    handler::{
        get_room_messages, get_room_presence, health_check, issue_session, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    InvalidAddress(#[from] std::net::AddrParseError),

    #[error("Failed to bind: {0}")]
    Bind(std::io::Error),

    #[error("Server terminated: {0}")]
    Serve(std::io::Error),
}

/// Build the router over an existing state.
pub fn build_app(state: Arc<AppState>) -> Router {
    let mut api = Router::new()
        .route("/health", get(health_check))
        .route("/rooms/{room_id}", get(get_room_presence))
        .route("/rooms/{room_id}/messages", get(get_room_messages));
    if state.dev_login {
        api = api.route("/sessions", post(issue_session));
    }

    Router::new()
        .route("/ws/chat/{room_id}", get(websocket_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind, serve and block until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.addr()?;

    let repository = Arc::new(InMemoryMessageRepository::new());
    let verifier = Arc::new(JwtIdentityVerifier::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl(),
    ));
    let state = Arc::new(AppState::new(
        repository,
        verifier,
        usize::from(config.history_limit),
        config.dev_login,
    ));
    if config.dev_login {
        tracing::warn!("Development login is enabled at POST /api/sessions");
    }

    let app = build_app(state);

    let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server stopped");
    Ok(())
}
