//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
};

use crate::{
    domain::{RoomId, UserId},
    infrastructure::dto::http::{
        HistoryQuery, MessageDto, RoomPresenceDto, SessionRequest, SessionResponse,
    },
    ui::state::AppState,
    usecase::HistoryError,
};

/// Extract `<token>` from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Live presence of a room
pub async fn get_room_presence(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomPresenceDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let connections = state.registry.connection_count(&room_id).await;
    let users = state
        .registry
        .users(&room_id)
        .await
        .into_iter()
        .map(UserId::into_string)
        .collect();

    Ok(Json(RoomPresenceDto {
        id: room_id.into_string(),
        connections,
        users,
    }))
}

/// Most recent messages of a room, oldest first
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<HistoryQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<MessageDto>>, StatusCode> {
    let token = bearer_token(&headers);
    let limit = query.limit.unwrap_or(state.history_limit);

    match state
        .history_usecase()
        .execute(token.as_deref(), room_id, limit)
        .await
    {
        Ok(messages) => Ok(Json(messages)),
        Err(e) => {
            tracing::warn!("History fetch rejected: {}", e);
            Err(match e {
                HistoryError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                HistoryError::InvalidRoom(_) | HistoryError::InvalidLimit { .. } => {
                    StatusCode::BAD_REQUEST
                }
                HistoryError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            })
        }
    }
}

/// Development login: issue a token for any user id
pub async fn issue_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let user_id = UserId::new(request.user_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let access_token = state.verifier.issue(&user_id).await.map_err(|e| {
        tracing::error!("Failed to issue token for '{}': {}", user_id, e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    tracing::info!("Issued development token for '{}'", user_id);

    Ok(Json(SessionResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
